//! Next-tick hazard projection: which cells will be flame after one more
//! resolved tick, computed without touching committed state.

use serde::{Deserialize, Serialize};

use crate::grid::Pos;
use crate::physics::{propagate_blast, synchronized_fuses};
use crate::world::WorldSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardGrid {
    width: u8,
    hot: Vec<bool>,
}

impl HazardGrid {
    fn cold(width: u8, height: u8) -> Self {
        Self {
            width,
            hot: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn is_hot(&self, pos: Pos) -> bool {
        self.hot[pos.y as usize * self.width as usize + pos.x as usize]
    }

    pub fn hot_count(&self) -> usize {
        self.hot.iter().filter(|h| **h).count()
    }
}

/// Replay the detonation tracing for every bomb whose chain-synchronized
/// fuse runs out on the next tick. Answers "if I stand here now, do I die
/// next tick?".
pub fn project_hazards(world: &WorldSnapshot) -> HazardGrid {
    let grid = &world.grid;
    if world.bombs.is_empty() {
        return HazardGrid::cold(grid.width(), grid.height());
    }

    let forced = synchronized_fuses(grid, &world.bombs);
    let seeds: Vec<usize> = forced
        .iter()
        .enumerate()
        .filter(|(_, fuse)| **fuse <= 1)
        .map(|(i, _)| i)
        .collect();
    if seeds.is_empty() {
        return HazardGrid::cold(grid.width(), grid.height());
    }

    let wave = propagate_blast(grid, &world.bombs, &seeds);
    HazardGrid {
        width: grid.width(),
        hot: wave.flames,
    }
}
