use clap::Parser;
use menace::{
    adapters::repository_for,
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        inspect::{self, InspectArgs},
        train::{TrainArgs, execute},
    },
    ports::AgentRepository,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "menace-train",
        "--games",
        "5",
        "--opponent",
        "random",
        "--seed",
        "1",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 5);
    assert_eq!(parsed["opponent"], "random");
    assert_eq!(parsed["config"]["initial_beads"], 4);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "menace-train",
        "--games",
        "3",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 3);
}

#[test]
fn config_file_and_flags_reach_the_saved_agent() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("agent.json");
    std::fs::write(
        &config_path,
        r#"{ "initial_beads": 6, "reinforcement": { "win": 2, "draw": 1, "loss": -1 } }"#,
    )
    .unwrap();
    let output = tmp.path().join("trained.json");

    let args = parse_args([
        "menace-train",
        "--games",
        "20",
        "--seed",
        "5",
        "--config",
        config_path.to_str().unwrap(),
        "--reward",
        "win=4",
        "--output",
        output.to_str().unwrap(),
    ]);
    execute(args).unwrap();

    let saved = repository_for(&output).load(&output).unwrap();
    assert_eq!(saved.config.initial_beads, 6);
    assert_eq!(saved.config.reinforcement.win, 4);
    assert_eq!(saved.config.reinforcement.draw, 1);
    assert_eq!(saved.metadata.games_trained, 20);
    assert_eq!(saved.metadata.opponents, vec!["random".to_string()]);
    assert_eq!(saved.table.initial_beads(), 6);
}

#[test]
fn resume_parallel_then_evaluate_and_inspect() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("first.msgpack");
    let second = tmp.path().join("second.json");

    execute(parse_args([
        "menace-train",
        "--games",
        "30",
        "--seed",
        "9",
        "--output",
        first.to_str().unwrap(),
    ]))
    .unwrap();

    execute(parse_args([
        "menace-train",
        "--games",
        "40",
        "--workers",
        "2",
        "--opponent",
        "optimal",
        "--resume",
        first.to_str().unwrap(),
        "--output",
        second.to_str().unwrap(),
    ]))
    .unwrap();

    let saved = repository_for(&second).load(&second).unwrap();
    assert_eq!(saved.metadata.games_trained, 70);
    assert_eq!(
        saved.metadata.opponents,
        vec!["random".to_string(), "optimal".to_string()]
    );

    evaluate::execute(EvaluateArgs::parse_from([
        "menace-evaluate",
        second.to_str().unwrap(),
        "--games",
        "10",
        "--seed",
        "3",
    ]))
    .unwrap();

    inspect::execute(InspectArgs::parse_from([
        "menace-inspect",
        second.to_str().unwrap(),
        "--board",
        "X...O....",
        "--states",
    ]))
    .unwrap();
}

#[test]
fn inspect_rejects_a_malformed_board() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("agent.json");
    execute(parse_args([
        "menace-train",
        "--games",
        "1",
        "--output",
        output.to_str().unwrap(),
    ]))
    .unwrap();

    let result = inspect::execute(InspectArgs::parse_from([
        "menace-inspect",
        output.to_str().unwrap(),
        "--board",
        "XX",
    ]));
    assert!(result.is_err());
}

#[test]
fn parallel_training_keeps_history_and_game_log() {
    let tmp = tempdir().unwrap();
    let game_log = tmp.path().join("games.jsonl");
    let summary = tmp.path().join("summary.json");

    execute(parse_args([
        "menace-train",
        "--games",
        "200",
        "--workers",
        "2",
        "--seed",
        "1",
        "--report-every",
        "50",
        "--game-log",
        game_log.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]))
    .unwrap();

    let log = std::fs::read_to_string(&game_log).unwrap();
    let game_nums: Vec<u64> = log
        .lines()
        .map(|line| {
            let record: serde_json::Value = serde_json::from_str(line).unwrap();
            record["game_num"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(game_nums, (1..=200).collect::<Vec<_>>());

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["training"]["total_games"], 200);
    let history = parsed["history"].as_array().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[3]["games"], 200);
}

#[test]
fn resume_refuses_a_different_initial_bead_count() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("first.json");
    execute(parse_args([
        "menace-train",
        "--games",
        "5",
        "--initial-beads",
        "6",
        "--output",
        first.to_str().unwrap(),
    ]))
    .unwrap();

    let conflicting = execute(parse_args([
        "menace-train",
        "--games",
        "5",
        "--initial-beads",
        "3",
        "--resume",
        first.to_str().unwrap(),
    ]));
    assert!(conflicting.is_err());

    let config_path = tmp.path().join("agent.json");
    std::fs::write(&config_path, r#"{ "initial_beads": 2 }"#).unwrap();
    let second = tmp.path().join("second.json");
    execute(parse_args([
        "menace-train",
        "--games",
        "5",
        "--config",
        config_path.to_str().unwrap(),
        "--resume",
        first.to_str().unwrap(),
        "--output",
        second.to_str().unwrap(),
    ]))
    .unwrap();

    let saved = repository_for(&second).load(&second).unwrap();
    assert_eq!(saved.table.initial_beads(), 6);
    assert_eq!(saved.config.initial_beads, 6);
    assert_eq!(saved.metadata.games_trained, 10);
}
