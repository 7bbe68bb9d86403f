//! Survival-only baseline. Never places a bomb; useful for telling safety
//! regressions apart from search regressions.

use bomber_core::{project_hazards, Direction, Move, Pos, WorldSnapshot};

use crate::bots::TurnBot;
use crate::deadline::Deadline;
use crate::moves::fallback_move;

pub struct SentinelBot;

impl SentinelBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SentinelBot {
    fn default() -> Self {
        Self::new()
    }
}

fn nearest_bomb_distance(world: &WorldSnapshot, pos: Pos) -> u32 {
    world
        .bombs
        .iter()
        .map(|bomb| bomb.pos.manhattan(pos))
        .min()
        .unwrap_or(u32::MAX)
}

impl TurnBot for SentinelBot {
    fn id(&self) -> &'static str {
        "sentinel"
    }

    fn description(&self) -> &'static str {
        "Never bombs; survival-only baseline for safety regressions."
    }

    fn choose_move(&mut self, world: &WorldSnapshot, _deadline: Deadline) -> Move {
        let hazards = project_hazards(world);
        let from = world.my_agent().pos;
        let mut best: Option<(u32, Move)> = None;

        for dir in Direction::ALL {
            let target = match dir {
                Direction::Stay => from,
                _ => match world.grid.neighbor(from, dir) {
                    Some(pos)
                        if world.grid.tile(pos).is_walkable()
                            && world.bomb_at(pos).is_none() =>
                    {
                        pos
                    }
                    _ => continue,
                },
            };
            if hazards.is_hot(target) || world.grid.flame(target) {
                continue;
            }
            let margin = nearest_bomb_distance(world, target);
            match best {
                Some((best_margin, _)) if margin <= best_margin => {}
                _ => {
                    best = Some((
                        margin,
                        Move {
                            dir,
                            drop_bomb: false,
                        },
                    ))
                }
            }
        }

        best.map(|(_, mv)| mv)
            .unwrap_or_else(|| fallback_move(world, &hazards))
    }
}
