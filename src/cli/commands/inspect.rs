//! Inspect command - Show what a saved agent has learned

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::load_agent;
use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    menace::MenaceAgent,
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved agent")]
pub struct InspectArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Board to look up, nine characters of X, O and . (e.g. "X...O....")
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// List every stored state with its bead counts
    #[arg(long, default_value_t = false)]
    pub states: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let (saved, agent) = load_agent(&args.agent, None)?;
    let stats = agent.stats();

    print_section("MENACE agent");
    print_kv("File", &args.agent.display().to_string());
    print_kv("Format version", &saved.version.to_string());
    print_kv("Games trained", &format_number(stats.games_trained));
    print_kv("States", &format_number(stats.table.states));
    print_kv("Total beads", &stats.table.total_beads.to_string());
    print_kv("Average entropy", &format!("{:.3}", stats.table.avg_entropy));
    print_kv("Depleted states", &stats.table.depleted_states.to_string());
    print_kv("Initial beads", &agent.table().initial_beads().to_string());
    let values = agent.reinforcement_values();
    print_kv(
        "Rewards",
        &format!("win={} draw={} loss={}", values.win, values.draw, values.loss),
    );

    if let Some(raw) = &args.board {
        let board = Board::from_string(raw).with_context(|| format!("Invalid board '{raw}'"))?;
        print_board(&agent, &board);
    }

    if args.states {
        print_subsection("States");
        for (key, matchbox) in agent.table().iter() {
            let beads: Vec<String> = matchbox.beads().iter().map(u32::to_string).collect();
            println!("  {key}  [{}]", beads.join(", "));
        }
    }

    Ok(())
}

fn print_board(agent: &MenaceAgent, board: &Board) {
    let ctx = board.canonical_context();
    print_subsection("Board");
    println!("{board}");
    print_kv("Canonical key", ctx.key.as_str());
    print_kv(
        "Symmetry",
        &format!(
            "{}rotate {} deg",
            if ctx.transform.reflection { "mirror, then " } else { "" },
            ctx.transform.rotation
        ),
    );

    let Some(matchbox) = agent.table().get(&ctx.key) else {
        println!("  State not visited yet");
        return;
    };
    let beads: Vec<String> = matchbox.beads().iter().map(u32::to_string).collect();
    print_kv("Beads (canonical)", &format!("[{}]", beads.join(", ")));

    for (pos, probability) in agent.move_distribution(board) {
        print_kv(
            &format!("Cell {pos}"),
            &format!("{:.1}%", probability * 100.0),
        );
    }
}
