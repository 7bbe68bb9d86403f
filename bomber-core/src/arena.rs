//! Seeded arena generation for self-play episodes. Same seed, same arena.

use crate::constants::{
    BOX_BOMB_ITEM_PCT, BOX_DENSITY_PCT, BOX_RANGE_ITEM_PCT, GRID_HEIGHT, GRID_WIDTH, MAX_AGENTS,
    SPAWN_CLEARANCE, STARTING_BLAST_RANGE, STARTING_BOMB_CAPACITY,
};
use crate::grid::{BoxContent, Grid, Pos, Tile};
use crate::rng::SeededRng;
use crate::world::{AgentState, WorldSnapshot};

fn spawn_corners(width: u8, height: u8) -> [Pos; MAX_AGENTS] {
    [
        Pos::new(0, 0),
        Pos::new(width - 1, height - 1),
        Pos::new(0, height - 1),
        Pos::new(width - 1, 0),
    ]
}

fn near_spawn(pos: Pos, corners: &[Pos]) -> bool {
    corners
        .iter()
        .any(|corner| corner.manhattan(pos) <= SPAWN_CLEARANCE as u32)
}

fn roll_content(rng: &mut SeededRng) -> BoxContent {
    let roll = rng.next_int(100);
    if roll < BOX_RANGE_ITEM_PCT {
        BoxContent::RangeUp
    } else if roll < BOX_RANGE_ITEM_PCT + BOX_BOMB_ITEM_PCT {
        BoxContent::BombUp
    } else {
        BoxContent::Empty
    }
}

/// Build a standard arena: pillar walls on odd-odd cells, boxes scattered
/// point-symmetrically so the corner spawns are fair, spawn pockets kept
/// clear. `agent_count` agents (1..=MAX_AGENTS) take the corners in order;
/// agent 0 is the planning agent.
pub fn generate(seed: u32, agent_count: usize) -> WorldSnapshot {
    let width = GRID_WIDTH;
    let height = GRID_HEIGHT;
    let mut rng = SeededRng::new(seed);
    let mut grid = Grid::new(width, height);
    let corners = spawn_corners(width, height);

    for y in 0..height {
        for x in 0..width {
            if x % 2 == 1 && y % 2 == 1 {
                grid.set_tile(Pos::new(x, y), Tile::Wall);
            }
        }
    }

    // Fill half the arena, mirroring each decision through the center.
    for y in 0..height {
        for x in 0..width {
            let pos = Pos::new(x, y);
            let mirror = Pos::new(width - 1 - x, height - 1 - y);
            let mirror_rank =
                (mirror.y as usize * width as usize + mirror.x as usize) as isize;
            let rank = (y as usize * width as usize + x as usize) as isize;
            if rank > mirror_rank {
                continue;
            }
            if grid.tile(pos) != Tile::Floor {
                continue;
            }
            if near_spawn(pos, &corners) || near_spawn(mirror, &corners) {
                continue;
            }
            if rng.chance(BOX_DENSITY_PCT) {
                let content = roll_content(&mut rng);
                grid.set_tile(pos, Tile::Box(content));
                if mirror != pos {
                    grid.set_tile(mirror, Tile::Box(content));
                }
            }
        }
    }

    let agent_count = agent_count.clamp(1, MAX_AGENTS);
    let agents = (0..agent_count)
        .map(|i| AgentState {
            id: i as u8,
            pos: corners[i],
            blast_range: STARTING_BLAST_RANGE,
            bombs_available: STARTING_BOMB_CAPACITY,
            bomb_capacity: STARTING_BOMB_CAPACITY,
            alive: true,
        })
        .collect();

    WorldSnapshot::new(grid, agents, 0)
}
