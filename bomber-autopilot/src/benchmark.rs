use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bots::bot_ids;
use crate::runner::{run_episode, EpisodeConfig, RunMetrics};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub bot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub turns: u32,
    pub boxes_destroyed: u32,
    pub items_collected: u32,
    pub survived: bool,
    pub deadline_overruns: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotRanking {
    pub bot_id: String,
    pub avg_boxes: f64,
    pub max_boxes: u32,
    pub avg_items: f64,
    pub avg_turns: f64,
    pub survival_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_turns: u32,
    pub run_count: usize,
    pub jobs: Option<usize>,
    pub bot_rankings: Vec<BotRanking>,
    pub runs: Vec<RunRecord>,
}

pub struct BenchmarkConfig {
    pub bots: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_turns: u32,
    pub turn_budget: Duration,
    pub opponents: usize,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

/// Expand an optional comma-separated bot list; `None` means the full
/// roster.
pub fn resolve_bots(selection: Option<&str>) -> Result<Vec<String>> {
    let Some(selection) = selection else {
        return Ok(bot_ids().iter().map(|id| id.to_string()).collect());
    };
    let mut out = Vec::new();
    for raw in selection.split(',') {
        let id = raw.trim();
        if id.is_empty() {
            continue;
        }
        if !bot_ids().contains(&id) {
            let available = bot_ids().join(", ");
            return Err(anyhow!("unknown bot '{id}'. available: {available}"));
        }
        out.push(id.to_string());
    }
    if out.is_empty() {
        return Err(anyhow!("no bots selected"));
    }
    Ok(out)
}

/// Run every (bot, seed) pair, in parallel across episodes, and aggregate
/// per-bot rankings. The report is also written to `<out_dir>/summary.json`.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let episode = EpisodeConfig {
        max_turns: config.max_turns,
        turn_budget: config.turn_budget,
        opponents: config.opponents,
    };

    let pairs: Vec<(String, u32)> = config
        .bots
        .iter()
        .flat_map(|bot| config.seeds.iter().map(move |seed| (bot.clone(), *seed)))
        .collect();

    let run_one = |(bot, seed): &(String, u32)| -> Result<RunMetrics> {
        let artifact = run_episode(bot, *seed, &episode)
            .with_context(|| format!("benchmark run failed for bot={bot} seed={seed:#x}"))?;
        Ok(artifact.metrics)
    };

    let results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| pairs.par_iter().map(run_one).collect())
    } else {
        pairs.par_iter().map(run_one).collect()
    };

    let mut metrics = Vec::with_capacity(results.len());
    for result in results {
        metrics.push(result?);
    }

    let mut bot_rankings = Vec::with_capacity(config.bots.len());
    for bot in &config.bots {
        let rows: Vec<&RunMetrics> = metrics.iter().filter(|m| &m.bot_id == bot).collect();
        if rows.is_empty() {
            continue;
        }
        let n = rows.len() as f64;
        bot_rankings.push(BotRanking {
            bot_id: bot.clone(),
            avg_boxes: rows.iter().map(|m| m.boxes_destroyed as f64).sum::<f64>() / n,
            max_boxes: rows.iter().map(|m| m.boxes_destroyed).max().unwrap_or(0),
            avg_items: rows.iter().map(|m| m.items_collected as f64).sum::<f64>() / n,
            avg_turns: rows.iter().map(|m| m.turns as f64).sum::<f64>() / n,
            survival_rate: rows.iter().filter(|m| m.survived).count() as f64 / n,
        });
    }
    bot_rankings.sort_by(|a, b| {
        b.avg_boxes
            .total_cmp(&a.avg_boxes)
            .then_with(|| b.survival_rate.total_cmp(&a.survival_rate))
    });

    let runs: Vec<RunRecord> = metrics
        .iter()
        .map(|m| RunRecord {
            bot_id: m.bot_id.clone(),
            seed: m.seed,
            seed_hex: format!("{:#010x}", m.seed),
            turns: m.turns,
            boxes_destroyed: m.boxes_destroyed,
            items_collected: m.items_collected,
            survived: m.survived,
            deadline_overruns: m.deadline_overruns,
        })
        .collect();

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_turns: config.max_turns,
        run_count: runs.len(),
        jobs: config.jobs,
        bot_rankings,
        runs,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}
