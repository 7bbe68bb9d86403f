use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use serde::Serialize;

use bomber_core::arena;
use bomber_core::constants::MAX_AGENTS;
use bomber_core::{resolve_tick, Action, AgentId, WorldSnapshot};

use crate::bots::{create_bot, TurnBot};
use crate::deadline::Deadline;

/// Grace beyond the turn budget before a turn counts as overrun: one
/// expansion step of slack, mirroring the planner's polling granularity.
const OVERRUN_SLACK: Duration = Duration::from_millis(5);

#[derive(Clone, Copy, Debug)]
pub struct EpisodeConfig {
    pub max_turns: u32,
    pub turn_budget: Duration,
    pub opponents: usize,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            turn_budget: Duration::from_millis(40),
            opponents: 1,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub bot_id: String,
    pub seed: u32,
    pub turns: u32,
    pub boxes_destroyed: u32,
    pub items_collected: u32,
    pub boxes_remaining: u32,
    pub survived: bool,
    pub deadline_overruns: u32,
}

#[derive(Clone, Debug)]
pub struct EpisodeArtifact {
    pub metrics: RunMetrics,
    pub actions: Vec<Action>,
}

/// Play one self-play episode on a generated arena: the bot under test in
/// corner 0, baseline opponents in the remaining corners, one resolved tick
/// per turn after everyone has moved.
pub fn run_episode(bot_id: &str, seed: u32, config: &EpisodeConfig) -> Result<EpisodeArtifact> {
    let mut bot = create_bot(bot_id).ok_or_else(|| anyhow!("unknown bot '{bot_id}'"))?;
    run_episode_instance(bot.as_mut(), seed, config)
}

pub fn run_episode_instance(
    bot: &mut dyn TurnBot,
    seed: u32,
    config: &EpisodeConfig,
) -> Result<EpisodeArtifact> {
    bot.reset(seed);

    let agent_count = (1 + config.opponents).min(MAX_AGENTS);
    let mut world = arena::generate(seed, agent_count);
    world
        .validate_invariants()
        .map_err(|rule| anyhow!("initial invariant failure: {rule}"))?;

    let mut opponents: Vec<Box<dyn TurnBot>> = Vec::with_capacity(agent_count - 1);
    for _ in 1..agent_count {
        opponents.push(create_bot("greedy").ok_or_else(|| anyhow!("baseline bot missing"))?);
    }

    let mut actions = Vec::new();
    let mut overruns = 0u32;
    let mut turns = 0u32;

    while turns < config.max_turns && !world.dead && world.boxes_remaining > 0 {
        let deadline = Deadline::after(config.turn_budget);
        let started = Instant::now();
        let mv = bot.choose_move(&world, deadline);
        if started.elapsed() > config.turn_budget + OVERRUN_SLACK {
            overruns += 1;
        }
        actions.push(mv.to_action(world.my_agent().pos, &world.grid));
        world.apply_move(world.me, mv);

        for (slot, opponent) in opponents.iter_mut().enumerate() {
            let opp_id = (slot + 1) as AgentId;
            let alive = world.agent(opp_id).is_some_and(|a| a.alive);
            if !alive {
                continue;
            }
            let view = opponent_view(&world, opp_id);
            let opp_mv = opponent.choose_move(&view, Deadline::after(config.turn_budget));
            world.apply_move(opp_id, opp_mv);
        }

        resolve_tick(&mut world);
        turns += 1;
    }

    Ok(EpisodeArtifact {
        metrics: RunMetrics {
            bot_id: bot.id().to_string(),
            seed,
            turns,
            boxes_destroyed: world.boxes_destroyed,
            items_collected: world.items_collected,
            boxes_remaining: world.boxes_remaining,
            survived: !world.dead,
            deadline_overruns: overruns,
        },
        actions,
    })
}

/// Re-center the snapshot on an opponent so a baseline bot can drive it.
/// The move history belongs to the planning agent, so it is restarted from
/// the opponent's own cell.
fn opponent_view(world: &WorldSnapshot, id: AgentId) -> WorldSnapshot {
    let mut view = world.clone();
    view.me = id;
    view.recent_moves.clear();
    if let Some(agent) = view.agent(id) {
        let pos = agent.pos;
        view.push_recent(pos);
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bot_ids_are_rejected() {
        let err = run_episode("no-such-bot", 1, &EpisodeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown bot"));
    }

    #[test]
    fn an_episode_terminates_and_reports_metrics() {
        let config = EpisodeConfig {
            max_turns: 40,
            turn_budget: Duration::from_millis(5),
            opponents: 1,
        };
        let artifact = run_episode("greedy", 0xDEAD_BEEF, &config).expect("episode runs");
        assert_eq!(artifact.metrics.bot_id, "greedy");
        assert!(artifact.metrics.turns <= 40);
        assert_eq!(artifact.actions.len(), artifact.metrics.turns as usize);
    }
}
