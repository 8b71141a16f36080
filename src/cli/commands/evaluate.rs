//! Evaluate command - Play a trained agent without letting it learn

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_agent;
use crate::{
    cli::output::{print_kv, print_results, print_section},
    pipeline::{OpponentKind, evaluate},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent")]
pub struct EvaluateArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', default_value = "optimal")]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which token the evaluated agent controls (defaults to the one it trained as)
    #[arg(long, value_parser = Player::parse)]
    pub agent_player: Option<Player>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let (saved, mut agent) = load_agent(&args.agent, args.seed)?;
    let agent_player = args
        .agent_player
        .or(saved.metadata.agent_player)
        .unwrap_or(Player::X);
    let mut opponent = args
        .opponent
        .build(args.seed.map(|seed| seed.wrapping_add(1)));

    print_section("MENACE evaluation");
    print_kv("Agent", &args.agent.display().to_string());
    print_kv("Games trained", &agent.games_trained().to_string());
    if !saved.metadata.opponents.is_empty() {
        print_kv("Trained against", &saved.metadata.opponents.join(", "));
    }
    print_kv("Opponent", opponent.name());
    print_kv("Agent plays", &agent_player.to_string());

    let result = evaluate(&mut agent, opponent.as_mut(), args.games, agent_player)?;
    log::info!(
        "evaluated {} games against {}: {} wins, {} draws, {} losses",
        result.total_games,
        args.opponent,
        result.wins,
        result.draws,
        result.losses
    );

    print_section("Results");
    print_results(&result);
    Ok(())
}
