use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use bomber_autopilot::benchmark::{resolve_bots, run_benchmark, BenchmarkConfig};
use bomber_autopilot::bots::{bot_ids, create_bot, describe_bots, TurnBot};
use bomber_autopilot::deadline::Deadline;
use bomber_autopilot::runner::{run_episode, EpisodeConfig};
use bomber_autopilot::util::{parse_seed, parse_seed_csv, seed_sequence, seed_to_hex};
use bomber_core::WorldSnapshot;

#[derive(Parser, Debug)]
#[command(name = "bomber-autopilot")]
#[command(about = "Deterministic bomb-grid planning lab: per-turn decisions, episodes, benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available bots
    ListBots,
    /// Decide one turn from a JSON snapshot file
    Plan {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "planner")]
        bot: String,
        #[arg(long, default_value_t = 40)]
        budget_ms: u64,
    },
    /// Play one full self-play episode on a generated arena
    Run {
        #[arg(long, default_value = "planner")]
        bot: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
        #[arg(long, default_value_t = 40)]
        budget_ms: u64,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
    },
    /// Run a multi-seed benchmark across one or more bots
    Benchmark {
        #[arg(long)]
        bots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
        #[arg(long, default_value_t = 40)]
        budget_ms: u64,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    match command {
        Commands::ListBots => {
            for (id, description) in describe_bots() {
                println!("{id:14} {description}");
            }
        }
        Commands::Plan {
            input,
            bot,
            budget_ms,
        } => {
            let mut bot = create_bot(&bot).ok_or_else(|| {
                let available = bot_ids().join(", ");
                anyhow!("unknown bot. available: {available}")
            })?;
            let bytes = fs::read(&input)
                .with_context(|| format!("failed reading {}", input.display()))?;
            let world: WorldSnapshot = serde_json::from_slice(&bytes)
                .with_context(|| format!("failed parsing snapshot {}", input.display()))?;
            world
                .validate_invariants()
                .map_err(|rule| anyhow!("snapshot violates {rule}"))?;

            let deadline = Deadline::after(Duration::from_millis(budget_ms));
            let mv = bot.choose_move(&world, deadline);
            let action = mv.to_action(world.my_agent().pos, &world.grid);

            println!("bot={}", bot.id());
            println!("turn={}", world.turn);
            println!("action={}", serde_json::to_string(&action)?);
        }
        Commands::Run {
            bot,
            seed,
            max_turns,
            budget_ms,
            opponents,
        } => {
            let seed = parse_seed(&seed)?;
            let config = EpisodeConfig {
                max_turns,
                turn_budget: Duration::from_millis(budget_ms),
                opponents,
            };
            let artifact = run_episode(&bot, seed, &config)?;

            println!("bot={}", artifact.metrics.bot_id);
            println!("seed={}", seed_to_hex(seed));
            println!("turns={}", artifact.metrics.turns);
            println!("boxes_destroyed={}", artifact.metrics.boxes_destroyed);
            println!("items_collected={}", artifact.metrics.items_collected);
            println!("boxes_remaining={}", artifact.metrics.boxes_remaining);
            println!("survived={}", artifact.metrics.survived);
            println!("deadline_overruns={}", artifact.metrics.deadline_overruns);
        }
        Commands::Benchmark {
            bots,
            seeds,
            seed_start,
            seed_count,
            max_turns,
            budget_ms,
            opponents,
            out_dir,
            jobs,
        } => {
            let bots = resolve_bots(bots.as_deref())?;
            let seeds = if let Some(csv) = seeds.as_deref() {
                parse_seed_csv(csv)?
            } else {
                let start = match seed_start.as_deref() {
                    Some(raw) => parse_seed(raw)?,
                    None => 0xA57E_0001,
                };
                seed_sequence(start, seed_count)
            };
            let out_dir = out_dir.unwrap_or_else(|| {
                PathBuf::from(format!("benchmarks/{}", timestamp_suffix()))
            });

            let report = run_benchmark(BenchmarkConfig {
                bots,
                seeds,
                max_turns,
                turn_budget: Duration::from_millis(budget_ms),
                opponents,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("top bots:");
            for (idx, bot) in report.bot_rankings.iter().enumerate() {
                println!(
                    "  {}. {}  avg_boxes={:.2} max_boxes={} avg_items={:.2} avg_turns={:.1} survival={:.0}%",
                    idx + 1,
                    bot.bot_id,
                    bot.avg_boxes,
                    bot.max_boxes,
                    bot.avg_items,
                    bot.avg_turns,
                    bot.survival_rate * 100.0,
                );
            }
        }
    }

    Ok(())
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
