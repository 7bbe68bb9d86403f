//! Anytime beam search over simulated futures. Full branching under
//! chain-reaction physics is infeasible inside a millisecond budget, so the
//! frontier is pruned to a fixed beam, equivalent states are deduplicated,
//! and the wall-clock deadline is polled between expansion batches: expiry
//! degrades to the best node found so far, never to a missing answer.

use std::collections::HashSet;

use bomber_core::{project_hazards, resolve_tick, Move, Pos, WorldSnapshot};

use crate::bots::TurnBot;
use crate::deadline::Deadline;
use crate::moves::{candidate_moves, fallback_move, MoveRules};
use crate::score::{score, Weights};

#[derive(Clone, Copy, Debug)]
pub struct PlannerConfig {
    pub id: &'static str,
    pub description: &'static str,
    pub max_depth: u8,
    pub beam_width: usize,
    pub weights: Weights,
    pub rules: MoveRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            id: "planner",
            description: "Anytime beam search over simulated futures with dominance pruning.",
            max_depth: 24,
            beam_width: 32,
            weights: Weights::default(),
            rules: MoveRules::default(),
        }
    }
}

impl PlannerConfig {
    pub fn deep() -> Self {
        Self {
            id: "planner-deep",
            description: "Wider, deeper beam search for generous turn budgets.",
            max_depth: 48,
            beam_width: 64,
            ..Self::default()
        }
    }
}

/// Compact state summary for dominance pruning: a repeated fingerprint
/// brings no new information and is dropped. The table lives for a single
/// `select_move` call; nothing leaks across turns.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct Fingerprint {
    pos: Pos,
    blast_range: u8,
    bombs_available: u8,
    bomb_capacity: u8,
    boxes_remaining: u32,
    fuses: Vec<u8>,
}

impl Fingerprint {
    fn of(world: &WorldSnapshot) -> Self {
        let me = world.my_agent();
        let mut fuses: Vec<u8> = world.bombs.iter().map(|b| b.countdown).collect();
        fuses.sort_unstable();
        Self {
            pos: me.pos,
            blast_range: me.blast_range,
            bombs_available: me.bombs_available,
            bomb_capacity: me.bomb_capacity,
            boxes_remaining: world.boxes_remaining,
            fuses,
        }
    }
}

#[derive(Clone)]
struct PlanNode {
    world: WorldSnapshot,
    value: f64,
    first_move: Option<Move>,
}

pub struct PlannerBot {
    cfg: PlannerConfig,
}

impl PlannerBot {
    pub fn new(cfg: PlannerConfig) -> Self {
        Self { cfg }
    }

    /// Pick the move whose subtree scored best at any depth reached before
    /// the deadline. Always returns a move.
    pub fn select_move(&self, world: &WorldSnapshot, deadline: Deadline) -> Move {
        let cfg = &self.cfg;
        let mut seen: HashSet<Fingerprint> = HashSet::new();
        seen.insert(Fingerprint::of(world));

        let mut frontier = vec![PlanNode {
            world: world.clone(),
            value: score(world, &cfg.weights),
            first_move: None,
        }];
        let mut best: Option<(f64, Move)> = None;

        'depths: for depth in 0..cfg.max_depth {
            let first_ply = depth == 0;
            let mut expanded: Vec<PlanNode> = Vec::new();

            for node in &frontier {
                if deadline.expired() {
                    break 'depths;
                }
                let hazards = project_hazards(&node.world);
                for mv in candidate_moves(&node.world, &hazards, first_ply, &cfg.rules) {
                    let mut child = node.world.clone();
                    child.apply_move(child.me, mv);
                    resolve_tick(&mut child);
                    child.depth = child.depth.saturating_add(1);
                    if child.dead {
                        continue;
                    }
                    if !seen.insert(Fingerprint::of(&child)) {
                        continue;
                    }

                    let value = score(&child, &cfg.weights);
                    let first = node.first_move.unwrap_or(mv);
                    match best {
                        Some((best_value, _)) if value <= best_value => {}
                        _ => best = Some((value, first)),
                    }
                    expanded.push(PlanNode {
                        world: child,
                        value,
                        first_move: Some(first),
                    });
                }
            }

            if expanded.is_empty() {
                break;
            }
            expanded.sort_by(|a, b| b.value.total_cmp(&a.value));
            expanded.truncate(cfg.beam_width);
            frontier = expanded;
        }

        best.map(|(_, mv)| mv).unwrap_or_else(|| {
            let hazards = project_hazards(world);
            fallback_move(world, &hazards)
        })
    }
}

impl TurnBot for PlannerBot {
    fn id(&self) -> &'static str {
        self.cfg.id
    }

    fn description(&self) -> &'static str {
        self.cfg.description
    }

    fn choose_move(&mut self, world: &WorldSnapshot, deadline: Deadline) -> Move {
        self.select_move(world, deadline)
    }
}
