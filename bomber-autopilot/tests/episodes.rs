use std::time::Duration;

use anyhow::Result;
use bomber_autopilot::benchmark::{resolve_bots, run_benchmark, BenchmarkConfig};
use bomber_autopilot::bots::bot_ids;
use bomber_autopilot::runner::{run_episode, EpisodeConfig};

#[test]
fn all_bots_complete_episodes_on_smoke_seed() -> Result<()> {
    let config = EpisodeConfig {
        max_turns: 30,
        turn_budget: Duration::from_millis(10),
        opponents: 1,
    };
    for bot in bot_ids() {
        let artifact = run_episode(bot, 0xDEAD_BEEF, &config)?;
        assert_eq!(artifact.metrics.bot_id, bot, "bot id mismatch for {bot}");
        assert!(artifact.metrics.turns > 0, "bot={bot}");
        assert!(artifact.metrics.turns <= 30, "bot={bot}");
    }
    Ok(())
}

#[test]
fn episodes_are_deterministic_given_generous_budgets() -> Result<()> {
    // deadlines only matter under time pressure; with slack the same bot on
    // the same seed must replay the same episode
    let config = EpisodeConfig {
        max_turns: 20,
        turn_budget: Duration::from_millis(250),
        opponents: 1,
    };
    let a = run_episode("greedy", 0xC0FF_EE11, &config)?;
    let b = run_episode("greedy", 0xC0FF_EE11, &config)?;
    assert_eq!(a.actions, b.actions);
    assert_eq!(a.metrics.boxes_destroyed, b.metrics.boxes_destroyed);
    Ok(())
}

#[test]
fn benchmark_smoke_outputs_expected_metadata() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        bots: vec!["greedy".to_string(), "sentinel".to_string()],
        seeds: vec![0xDEAD_BEEF, 0xC0FF_EE11],
        max_turns: 20,
        turn_budget: Duration::from_millis(5),
        opponents: 1,
        out_dir: tmp.path().to_path_buf(),
        jobs: None,
    })?;

    assert_eq!(report.run_count, 4);
    assert_eq!(report.bot_rankings.len(), 2);
    assert!(tmp.path().join("summary.json").exists());
    Ok(())
}

#[test]
fn bot_resolution_validates_ids() -> Result<()> {
    assert_eq!(resolve_bots(None)?.len(), bot_ids().len());
    assert_eq!(resolve_bots(Some("greedy,planner"))?.len(), 2);
    assert!(resolve_bots(Some("greedy,bogus")).is_err());
    Ok(())
}
