//! Train command - Train a MENACE agent against a fixed opponent

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::load_agent;
use crate::{
    adapters::repository_for,
    app::AgentConfig,
    cli::output::{print_kv, print_results, print_section},
    menace::{MenaceAgent, ReinforcementValues, SavedMenaceAgent, TrainingMetadata},
    pipeline::{
        JsonlObserver, OpponentKind, ParallelConfig, ProgressObserver, ReportObserver,
        TrainingConfig, TrainingPipeline, TrainingResult, train_parallel,
    },
    ports::{AgentRepository, Observer},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train a MENACE agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Opponent to train against (random or optimal)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: OpponentKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Output file for trained agent (.json, or .msgpack for MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Continue training a previously saved agent
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// JSON file with agent settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Beads per cell in a new matchbox
    #[arg(long)]
    pub initial_beads: Option<u32>,

    /// Reward schedule (3,1,-1 or win=3,draw=1,loss=-1)
    #[arg(long)]
    pub reward: Option<ReinforcementValues>,

    /// Which token the agent controls (`x` or `o`); X always opens
    #[arg(long, default_value = "x", value_parser = Player::parse)]
    pub agent_player: Player,

    /// Log cumulative results every N games (0 disables)
    #[arg(long, default_value_t = 100)]
    pub report_every: usize,

    /// Number of parallel workers sharing one state table
    #[arg(long, short = 'w', default_value_t = 1)]
    pub workers: usize,

    /// Write one JSON line per game to this file
    #[arg(long)]
    pub game_log: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct SummaryStats {
    total_games: usize,
    wins: usize,
    draws: usize,
    losses: usize,
    win_rate: f64,
    draw_rate: f64,
    loss_rate: f64,
}

impl From<&TrainingResult> for SummaryStats {
    fn from(result: &TrainingResult) -> Self {
        Self {
            total_games: result.total_games,
            wins: result.wins,
            draws: result.draws,
            losses: result.losses,
            win_rate: result.win_rate(),
            draw_rate: result.draw_rate(),
            loss_rate: result.loss_rate(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: SummaryStats,
    history: &'a [crate::pipeline::IntervalSummary],
    opponent: String,
    agent_player: Player,
    config: AgentConfig,
    states: usize,
}

/// Summary targets without a `.json` extension get one; a directory target
/// (trailing separator) gets `training_summary.json` inside it.
fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(args: &TrainArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => AgentConfig::default(),
    };
    if let Some(beads) = args.initial_beads {
        config.initial_beads = beads;
    }
    if let Some(reward) = args.reward {
        config.reinforcement = reward;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    if args.workers == 0 {
        bail!("--workers must be at least 1");
    }
    let mut config = resolve_config(&args)?;

    let (mut agent, mut metadata) = match &args.resume {
        Some(path) => {
            let (saved, mut agent) = load_agent(path, config.seed)?;
            let saved_beads = agent.table().initial_beads();
            if let Some(beads) = args.initial_beads.filter(|&beads| beads != saved_beads) {
                bail!(
                    "--initial-beads {beads} conflicts with {}, which was trained with {saved_beads} initial beads",
                    path.display()
                );
            }
            if args.config.is_some() && config.initial_beads != saved_beads {
                log::warn!(
                    "ignoring initial_beads={} from the config file; {} keeps {saved_beads}",
                    config.initial_beads,
                    path.display()
                );
            }
            config.initial_beads = saved_beads;
            if args.reward.is_some() || args.config.is_some() {
                agent.set_reinforcement_values(config.reinforcement);
            }
            log::info!(
                "resuming {} ({} games trained, {} states)",
                path.display(),
                agent.games_trained(),
                agent.table().len()
            );
            (agent, saved.metadata)
        }
        None => (
            MenaceAgent::builder().config(config).build()?,
            TrainingMetadata::default(),
        ),
    };

    print_section("MENACE training");
    print_kv("Opponent", &args.opponent.to_string());
    print_kv("Games", &args.games.to_string());
    print_kv("Agent plays", &args.agent_player.to_string());
    print_kv("Initial beads", &agent.table().initial_beads().to_string());
    let values = agent.reinforcement_values();
    print_kv(
        "Rewards",
        &format!("win={} draw={} loss={}", values.win, values.draw, values.loss),
    );
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let training = TrainingConfig {
        num_games: args.games,
        agent_player: args.agent_player,
        report_every: args.report_every,
    };

    let mut observers: Vec<Box<dyn Observer>> =
        vec![Box::new(ReportObserver::new(args.report_every))];
    if args.progress {
        observers.push(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.game_log {
        observers.push(Box::new(JsonlObserver::new(path)?));
    }

    let result = if args.workers > 1 {
        let previous = agent.games_trained();
        let reinforcement = agent.reinforcement_values();
        let parallel = ParallelConfig {
            training,
            workers: args.workers,
            seed: config.seed,
        };
        let opponent = args.opponent;
        let (table, result) = train_parallel(
            agent.into_table(),
            reinforcement,
            &parallel,
            observers,
            |_, seed| opponent.build(Some(seed)),
        )?;
        agent = MenaceAgent::builder()
            .with_table(table)
            .reinforcement(reinforcement)
            .games_trained(previous + result.total_games)
            .build()?;
        result
    } else {
        let mut opponent = args
            .opponent
            .build(config.seed.map(|seed| seed.wrapping_add(1)));
        let mut pipeline = observers
            .into_iter()
            .fold(TrainingPipeline::new(training), TrainingPipeline::with_observer);
        pipeline.run(&mut agent, opponent.as_mut())?
    };

    print_section("Results");
    print_results(&result);
    let stats = agent.table().stats();
    print_kv("States", &stats.states.to_string());
    print_kv("Depleted states", &stats.depleted_states.to_string());

    if let Some(path) = &args.summary {
        write_summary(path, &args, &config, &result, stats.states)?;
    }

    if let Some(path) = &args.output {
        let opponent = args.opponent.to_string();
        if !metadata.opponents.contains(&opponent) {
            metadata.opponents.push(opponent);
        }
        metadata.seed = config.seed;
        metadata.agent_player = Some(args.agent_player);

        let saved = SavedMenaceAgent::from_agent(&agent, metadata);
        repository_for(path)
            .save(&saved, path)
            .with_context(|| format!("Failed to save agent to {}", path.display()))?;
        println!("\nSaved agent to {}", path.display());
    }

    Ok(())
}

fn write_summary(
    path: &Path,
    args: &TrainArgs,
    config: &AgentConfig,
    result: &TrainingResult,
    states: usize,
) -> Result<()> {
    let summary = TrainingSummaryFile {
        training: SummaryStats::from(result),
        history: &result.history,
        opponent: args.opponent.to_string(),
        agent_player: args.agent_player,
        config: *config,
        states,
    };
    let path = sanitize_summary_path(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    to_writer_pretty(file, &summary)?;
    log::info!("wrote training summary to {}", path.display());
    Ok(())
}
