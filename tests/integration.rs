//! Integration tests for blifs

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use blifs::format::{self, read_board, write_board};
use blifs::random::{self, RandomSpec, SeedSource};
use blifs::{engine, BlifsError, Board, Outcome, RuleTable, Simulation};
use tempfile::tempdir;

const CONWAY: &str = "0 0 1 1 0 0 0 0 0\n0 0 0 1 0 0 0 0 0\n";

fn board_from(text: &str) -> Board {
    read_board(text.as_bytes()).expect("valid board")
}

fn live(board: &Board) -> Vec<(usize, usize)> {
    board.live_cells().collect()
}

#[test]
fn test_blinker_from_files() {
    let dir = tempdir().unwrap();
    let board_path = dir.path().join("blinker.txt");
    let rules_path = dir.path().join("conway.txt");
    fs::write(&board_path, "5 5\n1 2\n2 2\n3 2\n").unwrap();
    fs::write(&rules_path, CONWAY).unwrap();

    let board = format::load_board(&board_path).unwrap();
    let rules = format::load_rules(&rules_path).unwrap();
    let horizontal = live(&board);
    let mut sim = Simulation::new(board, Some(rules));

    assert!(sim.step().unwrap());
    assert_eq!(live(sim.board()), vec![(2, 1), (2, 2), (2, 3)]);

    assert!(sim.step().unwrap());
    assert_eq!(live(sim.board()), horizontal);
    assert_eq!(sim.stats().generation, 2);
}

#[test]
fn test_glider_wraps_around_the_torus() {
    let glider = board_from("8 8\n1 0\n2 1\n0 2\n1 2\n2 2\n");
    let start = live(&glider);
    let mut sim = Simulation::new(glider, Some(RuleTable::conway()));

    // One diagonal cell every 4 generations, 8 cells to come back
    let outcome = sim.run(32, &mut ()).unwrap();
    assert_eq!(outcome, Outcome::Exhausted { generations: 32 });
    assert_eq!(live(sim.board()), start);
    assert_eq!(sim.board().live_count(), 5);
}

#[test]
fn test_live_count_matches_scan_on_random_boards() {
    let spec: RandomSpec = "48:32:3".parse().unwrap();
    for seed in [1, 2, 3] {
        let mut board = random::generate(&spec, SeedSource::Fixed(seed)).unwrap();
        let rules: RuleTable = "B36/S23".parse().unwrap();
        for _ in 0..100 {
            let (delta, _) = engine::step(&board, &rules);
            engine::apply(&mut board, &delta);
            assert_eq!(board.live_count(), board.count_live_scan());
        }
    }
}

#[test]
fn test_no_births_is_static_after_one_step() {
    // Nothing can be born without a create rule
    let rules: RuleTable = "B/S2".parse().unwrap();
    let board = board_from("6 6\n0 0\n1 0\n0 1\n4 4\n");
    let mut sim = Simulation::new(board, Some(rules));

    let outcome = sim.run(50, &mut ()).unwrap();
    assert_eq!(outcome, Outcome::Static { generations: 0 });
    // The corner cells have two neighbors each and survive; the lone one dies
    assert_eq!(live(sim.board()), vec![(0, 0), (0, 1), (1, 0)]);
    assert_eq!(sim.board().live_count(), 3);
}

#[test]
fn test_still_life_is_static_and_unchanged() {
    let beehive = board_from("7 6\n2 1\n3 1\n1 2\n4 2\n2 3\n3 3\n");
    let before = beehive.clone();
    let mut sim = Simulation::new(beehive, Some(RuleTable::conway()));

    let outcome = sim.run(10, &mut ()).unwrap();
    assert_eq!(outcome, Outcome::Static { generations: 0 });
    assert_eq!(sim.board(), &before);
}

#[test]
fn test_board_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("random.txt");
    let spec: RandomSpec = "37:23:4".parse().unwrap();
    let board = random::generate(&spec, SeedSource::Fixed(2024)).unwrap();

    format::save_board(&board, &path).unwrap();
    let loaded = format::load_board(&path).unwrap();

    assert_eq!((loaded.width(), loaded.height()), (37, 23));
    assert_eq!(live(&loaded), live(&board));
    assert_eq!(loaded, board);
}

#[test]
fn test_zero_iterations_pass_through() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    let text = "6 4\n0 3\n2 0\n2 1\n5 3\n";
    fs::write(&input, text).unwrap();

    let board = format::load_board(&input).unwrap();
    let mut sim = Simulation::new(board, None);
    let outcome = sim.run(0, &mut ()).unwrap();
    assert_eq!(outcome, Outcome::Exhausted { generations: 0 });

    format::save_board(sim.board(), &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), text);
}

#[test]
fn test_written_board_is_column_major() {
    let board = board_from("3 3\n2 2\n0 1\n1 0\n0 0\n");
    let mut out = Vec::new();
    write_board(&board, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "3 3\n0 0\n0 1\n1 0\n2 2\n");
}

#[test]
fn test_malformed_inputs_are_rejected() {
    assert!(matches!(
        read_board("4 4\n4 0\n".as_bytes()),
        Err(BlifsError::MalformedBoardFile { .. })
    ));
    assert!(matches!(
        "0 0 1 1 0 0 0 0 0".parse::<RuleTable>(),
        Err(BlifsError::MalformedRulesFile { .. })
    ));
    assert!(matches!(
        "4x4".parse::<RandomSpec>(),
        Err(BlifsError::InvalidRandomSpec(_))
    ));
    assert!(matches!(
        Board::new(0, 3),
        Err(BlifsError::AllocationError { .. })
    ));
}

#[test]
fn test_missing_rules_fail_before_running() {
    let board = board_from("3 3\n1 1\n");
    let mut sim = Simulation::new(board.clone(), None);
    assert!(matches!(
        sim.run(1, &mut ()),
        Err(BlifsError::MissingInput(_))
    ));
    assert_eq!(sim.board(), &board);
}

#[test]
fn test_random_fraction_over_large_board() {
    let spec = RandomSpec {
        width: 500,
        height: 400,
        divisor: Some(8),
    };
    let board = random::generate(&spec, SeedSource::Fixed(99)).unwrap();
    let fraction = board.live_count() as f64 / board.area() as f64;
    assert!((fraction - 0.125).abs() < 0.005, "fraction was {fraction}");
}

#[test]
fn test_clock_seeded_boards_are_valid() {
    let spec: RandomSpec = "20:20".parse().unwrap();
    let board = random::generate(&spec, SeedSource::Clock).unwrap();
    assert_eq!(board.live_count(), board.count_live_scan());
    assert!(board.live_count() <= 400);
}

fn blifs(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blifs"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run blifs")
}

#[test]
fn test_exit_unknown_flag_is_one() {
    let dir = tempdir().unwrap();
    let out = blifs(&["--bogus"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_exit_missing_board_is_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("rules.txt"), CONWAY).unwrap();
    let out = blifs(&["-r", "rules.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Input board file required"));
    // Fatal errors also go through the logger
    assert!(stderr.contains("ERROR"), "no log record in {stderr:?}");
}

#[test]
fn test_exit_missing_rules_is_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("board.txt"), "3 3\n1 1\n").unwrap();
    let out = blifs(&["-b", "board.txt", "-n", "2"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_exit_bad_random_spec_is_one() {
    let dir = tempdir().unwrap();
    let out = blifs(&["-g", "10x10", "-o", "f.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("f.txt").exists());
}

#[test]
fn test_exit_out_of_bounds_board_is_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("board.txt"), "4 4\n1 1\n4 2\n").unwrap();
    fs::write(dir.path().join("rules.txt"), CONWAY).unwrap();
    let out = blifs(&["-b", "board.txt", "-r", "rules.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_exit_help_and_explain_are_zero() {
    let dir = tempdir().unwrap();
    let out = blifs(&["--help"], dir.path());
    assert_eq!(out.status.code(), Some(0));

    let out = blifs(&["--explain", "board"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("(Board file help)"));
}

#[test]
fn test_exit_zero_iterations_without_rules_is_zero() {
    let dir = tempdir().unwrap();
    let text = "5 3\n0 0\n4 2\n";
    fs::write(dir.path().join("board.txt"), text).unwrap();
    let out = blifs(&["-b", "board.txt", "-n", "0", "-o", "out.txt"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "0....\n.....\n....0\n[READ (5*3) BOARD, ALIVE: 2/15]\n"
    );
    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), text);
}

#[test]
fn test_exit_simulation_writes_final_board() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("board.txt"), "5 5\n1 2\n2 2\n3 2\n").unwrap();
    fs::write(dir.path().join("rules.txt"), CONWAY).unwrap();
    let out = blifs(
        &["-b", "board.txt", "-r", "rules.txt", "-n", "3", "-s", "-o", "out.txt"],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "5 5\n2 1\n2 2\n2 3\n"
    );
}

#[test]
fn test_exit_seeded_generation_is_reproducible() {
    let dir = tempdir().unwrap();
    for name in ["a.txt", "b.txt"] {
        let out = blifs(&["-g", "12:8:3", "--seed", "5", "-s", "-o", name], dir.path());
        assert_eq!(out.status.code(), Some(0));
    }
    let a = fs::read_to_string(dir.path().join("a.txt")).unwrap();
    let b = fs::read_to_string(dir.path().join("b.txt")).unwrap();
    assert!(a.starts_with("12 8\n"));
    assert_eq!(a, b);
}
