//! Depth-1 baseline: same generator and heuristic as the planner, no tree.

use bomber_core::{project_hazards, resolve_tick, Move, WorldSnapshot};

use crate::bots::TurnBot;
use crate::deadline::Deadline;
use crate::moves::{candidate_moves, fallback_move, MoveRules};
use crate::score::{score, Weights};

pub struct GreedyBot {
    weights: Weights,
    rules: MoveRules,
}

impl GreedyBot {
    pub fn new() -> Self {
        Self {
            weights: Weights::default(),
            rules: MoveRules::default(),
        }
    }
}

impl Default for GreedyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnBot for GreedyBot {
    fn id(&self) -> &'static str {
        "greedy"
    }

    fn description(&self) -> &'static str {
        "Depth-1 baseline: best immediate outcome under the same heuristic."
    }

    fn choose_move(&mut self, world: &WorldSnapshot, _deadline: Deadline) -> Move {
        let hazards = project_hazards(world);
        let mut best: Option<(f64, Move)> = None;

        for mv in candidate_moves(world, &hazards, true, &self.rules) {
            let mut child = world.clone();
            child.apply_move(child.me, mv);
            resolve_tick(&mut child);
            if child.dead {
                continue;
            }
            let value = score(&child, &self.weights);
            match best {
                Some((best_value, _)) if value <= best_value => {}
                _ => best = Some((value, mv)),
            }
        }

        best.map(|(_, mv)| mv)
            .unwrap_or_else(|| fallback_move(world, &hazards))
    }
}
