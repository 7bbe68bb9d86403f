//! Candidate enumeration for one turn: at most five directions, each with
//! and without a bomb, filtered through the safety analyzer.

use serde::{Deserialize, Serialize};

use bomber_core::{Direction, HazardGrid, Move, Pos, WorldSnapshot};

use crate::safety;

/// Tunable suppression thresholds. The cycle check is a heuristic, not an
/// invariant: it can reject useful moves in narrow corridors, so both knobs
/// stay adjustable.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MoveRules {
    /// How many recent committed positions participate in cycle detection.
    pub cycle_window: usize,
    /// Visits within the window after which a cell is considered a loop.
    pub cycle_repeats: usize,
}

impl Default for MoveRules {
    fn default() -> Self {
        Self {
            cycle_window: 6,
            cycle_repeats: 2,
        }
    }
}

/// Enumerate the legal, safe, non-cyclical moves, best candidates first.
/// Standing in flame switches to forced evacuation: flame-free neighbors if
/// any exist, otherwise still-dangerous ones that at least break new
/// ground.
pub fn candidate_moves(
    world: &WorldSnapshot,
    hazards: &HazardGrid,
    first_ply: bool,
    rules: &MoveRules,
) -> Vec<Move> {
    let me = world.my_agent();
    let from = me.pos;

    if world.grid.flame(from) {
        return evacuation_moves(world, hazards, rules);
    }

    let mut out = Vec::with_capacity(10);
    for dir in Direction::ALL {
        if dir != Direction::Stay {
            if let Some(target) = world.grid.neighbor(from, dir) {
                if extends_cycle(&world.recent_moves, target, rules) {
                    continue;
                }
            }
        }
        let plain = Move {
            dir,
            drop_bomb: false,
        };
        let verdict = safety::assess(world, hazards, plain, first_ply);
        if verdict.move_safe {
            out.push(plain);
            if verdict.bomb_safe {
                out.push(Move {
                    dir,
                    drop_bomb: true,
                });
            }
        }
    }
    out
}

fn evacuation_moves(world: &WorldSnapshot, hazards: &HazardGrid, rules: &MoveRules) -> Vec<Move> {
    let from = world.my_agent().pos;
    let mut calm = Vec::new();
    let mut desperate = Vec::new();

    for dir in Direction::ALL {
        if dir == Direction::Stay {
            continue;
        }
        let target = match world.grid.neighbor(from, dir) {
            Some(pos) if world.grid.tile(pos).is_walkable() && world.bomb_at(pos).is_none() => pos,
            _ => continue,
        };
        let mv = Move {
            dir,
            drop_bomb: false,
        };
        if !hazards.is_hot(target) {
            calm.push(mv);
        } else if !repeats_recent(&world.recent_moves, target, rules) {
            desperate.push(mv);
        }
    }

    if calm.is_empty() {
        desperate
    } else {
        calm
    }
}

/// A candidate extends a cycle when it walks straight back to where the
/// agent stood two commits ago, or revisits a cell the window has already
/// seen `cycle_repeats` times.
fn extends_cycle(recent: &[Pos], candidate: Pos, rules: &MoveRules) -> bool {
    if recent.len() >= 2 && recent[recent.len() - 2] == candidate {
        return true;
    }
    repeats_recent(recent, candidate, rules)
}

fn repeats_recent(recent: &[Pos], candidate: Pos, rules: &MoveRules) -> bool {
    recent
        .iter()
        .rev()
        .take(rules.cycle_window)
        .filter(|pos| **pos == candidate)
        .count()
        >= rules.cycle_repeats
}

/// Last-resort pick when no candidate survives filtering: the contract
/// still requires an action every turn, so rank the raw neighbors from
/// least to most lethal and take the best.
pub fn fallback_move(world: &WorldSnapshot, hazards: &HazardGrid) -> Move {
    let from = world.my_agent().pos;
    let mut best = Move::stay();
    let mut best_rank = u8::MAX;

    for dir in Direction::ALL {
        let target = match dir {
            Direction::Stay => from,
            _ => match world.grid.neighbor(from, dir) {
                Some(pos)
                    if world.grid.tile(pos).is_walkable() && world.bomb_at(pos).is_none() =>
                {
                    pos
                }
                _ => continue,
            },
        };
        let rank = match (world.grid.flame(target), hazards.is_hot(target)) {
            (false, false) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (true, true) => 3,
        };
        if rank < best_rank {
            best_rank = rank;
            best = Move {
                dir,
                drop_bomb: false,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomber_core::constants::{STARTING_BLAST_RANGE, STARTING_BOMB_CAPACITY};
    use bomber_core::{project_hazards, AgentState, Bomb, Grid, Tile};

    fn open_world(width: u8, height: u8, me: Pos) -> WorldSnapshot {
        WorldSnapshot::new(
            Grid::new(width, height),
            vec![AgentState {
                id: 0,
                pos: me,
                blast_range: STARTING_BLAST_RANGE,
                bombs_available: STARTING_BOMB_CAPACITY,
                bomb_capacity: STARTING_BOMB_CAPACITY,
                alive: true,
            }],
            0,
        )
    }

    #[test]
    fn open_ground_offers_moves_with_and_without_bombs() {
        let world = open_world(9, 9, Pos::new(4, 4));
        let hazards = project_hazards(&world);
        let moves = candidate_moves(&world, &hazards, true, &MoveRules::default());

        assert!(moves.len() >= 5);
        assert!(moves.iter().any(|mv| mv.drop_bomb));
        assert!(moves.iter().any(|mv| !mv.drop_bomb));
    }

    #[test]
    fn no_bomb_variants_without_a_bomb_in_stock() {
        let mut world = open_world(9, 9, Pos::new(4, 4));
        world.agents[0].bombs_available = 0;
        let hazards = project_hazards(&world);
        let moves = candidate_moves(&world, &hazards, true, &MoveRules::default());
        assert!(moves.iter().all(|mv| !mv.drop_bomb));
    }

    #[test]
    fn back_and_forth_is_suppressed() {
        let mut world = open_world(9, 1, Pos::new(2, 0));
        // committed path: (1,0) -> (2,0); stepping back west would loop
        world.recent_moves = vec![Pos::new(1, 0), Pos::new(2, 0)];
        let hazards = project_hazards(&world);
        let moves = candidate_moves(&world, &hazards, true, &MoveRules::default());
        assert!(moves
            .iter()
            .all(|mv| mv.dir != Direction::West));
        assert!(moves.iter().any(|mv| mv.dir == Direction::East));
    }

    #[test]
    fn evacuation_prefers_cells_that_stay_cold() {
        let mut world = open_world(9, 9, Pos::new(4, 4));
        world.grid.set_flame(Pos::new(4, 4));
        // a second bomb about to blow keeps the west cell hot next tick
        world.bombs.push(Bomb {
            pos: Pos::new(1, 4),
            owner: 0,
            range: 2,
            countdown: 1,
        });
        let hazards = project_hazards(&world);
        assert!(hazards.is_hot(Pos::new(3, 4)));

        let moves = candidate_moves(&world, &hazards, true, &MoveRules::default());
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| !mv.drop_bomb));
        for mv in &moves {
            let target = world.grid.neighbor(Pos::new(4, 4), mv.dir).unwrap();
            assert!(!hazards.is_hot(target), "{mv:?} lands on hot cell");
        }
    }

    #[test]
    fn evacuation_accepts_danger_when_nothing_is_cold() {
        // cross of walls leaves only east open, and east stays hot
        let mut world = open_world(5, 5, Pos::new(2, 2));
        world.grid.set_flame(Pos::new(2, 2));
        world.grid.set_tile(Pos::new(2, 1), Tile::Wall);
        world.grid.set_tile(Pos::new(2, 3), Tile::Wall);
        world.grid.set_tile(Pos::new(1, 2), Tile::Wall);
        world.bombs.push(Bomb {
            pos: Pos::new(4, 2),
            owner: 0,
            range: 4,
            countdown: 1,
        });
        let hazards = project_hazards(&world);
        assert!(hazards.is_hot(Pos::new(3, 2)));
        assert!(hazards.is_hot(Pos::new(2, 2)));

        let moves = candidate_moves(&world, &hazards, true, &MoveRules::default());
        assert_eq!(
            moves,
            vec![Move {
                dir: Direction::East,
                drop_bomb: false
            }]
        );
    }

    #[test]
    fn fallback_always_yields_something() {
        // sealed in: every neighbor is a wall
        let mut world = open_world(3, 3, Pos::new(1, 1));
        for pos in [
            Pos::new(1, 0),
            Pos::new(1, 2),
            Pos::new(0, 1),
            Pos::new(2, 1),
        ] {
            world.grid.set_tile(pos, Tile::Wall);
        }
        let hazards = project_hazards(&world);
        assert_eq!(fallback_move(&world, &hazards), Move::stay());
    }
}
