pub mod greedy;
pub mod sentinel;

use bomber_core::{Move, WorldSnapshot};

use crate::deadline::Deadline;
use crate::planner::{PlannerBot, PlannerConfig};

/// One decision per turn: a fresh snapshot in, a move out, inside the
/// deadline. Bots hold no world state of their own; `reset` only reseeds
/// whatever internal tie-breaking they carry.
pub trait TurnBot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, _seed: u32) {}
    fn choose_move(&mut self, world: &WorldSnapshot, deadline: Deadline) -> Move;
}

pub fn bot_ids() -> Vec<&'static str> {
    vec!["planner", "planner-deep", "greedy", "sentinel"]
}

pub fn describe_bots() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "planner",
            "Anytime beam search over simulated futures with dominance pruning.",
        ),
        (
            "planner-deep",
            "Wider, deeper beam search for generous turn budgets.",
        ),
        (
            "greedy",
            "Depth-1 baseline: best immediate outcome under the same heuristic.",
        ),
        (
            "sentinel",
            "Never bombs; survival-only baseline for safety regressions.",
        ),
    ]
}

pub fn create_bot(id: &str) -> Option<Box<dyn TurnBot>> {
    match id {
        "planner" => Some(Box::new(PlannerBot::new(PlannerConfig::default()))),
        "planner-deep" => Some(Box::new(PlannerBot::new(PlannerConfig::deep()))),
        "greedy" => Some(Box::new(greedy::GreedyBot::new())),
        "sentinel" => Some(Box::new(sentinel::SentinelBot::new())),
        _ => None,
    }
}
