//! Soulboard -- experiment driver for the board simulator and solver.
//!
//! Runs a seeded experiment: pick the best move, apply it, accumulate the
//! cascade score, render the board, until the board is stuck or the turn
//! limit is reached. Progress and the summary go to stderr; board renders
//! go to stdout.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --rows N        Board rows (default: 2)
//!   --cols N        Board columns (default: 7)
//!   --seed N        Refill generator seed (default: 0)
//!   --turns N       Maximum number of turns (default: 50)
//!   --orb-bonus N   Exploration bonus per cleared orb (default: 9)
//!   --policy FILE   JSON shape-kind -> weight map (default: built-in)
//!   --shapes LIST   Comma-separated active shape kinds (default loadout)
//!   --quiet         Suppress per-turn output and board renders

use std::env;
use std::fs;
use std::process;

use soulboard::board::Board;
use soulboard::resolve;
use soulboard::search::{self, cascade_score, PriorityConfig, SelectError, DEFAULT_ORB_BONUS};
use soulboard::shape::{ShapeKind, ShapeSet};

struct ExperimentConfig {
    rows: usize,
    cols: usize,
    seed: u64,
    turns: usize,
    orb_bonus: i64,
    policy: PriorityConfig,
    shapes: Option<ShapeSet>,
    quiet: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            rows: 2,
            cols: 7,
            seed: 0,
            turns: 50,
            orb_bonus: DEFAULT_ORB_BONUS,
            policy: reference_policy(),
            shapes: None,
            quiet: false,
        }
    }
}

/// The reference tuning: dig weights for the default skill loadout.
fn reference_policy() -> PriorityConfig {
    let mut policy = PriorityConfig::new();
    policy.set(ShapeKind::Single, 10);
    policy.set(ShapeKind::Pair, 50);
    policy.set(ShapeKind::Square, 100);
    policy.set(ShapeKind::FourL, 80);
    policy.set(ShapeKind::FourI, 80);
    policy
}

fn parse_shapes(list: &str) -> Result<ShapeSet, String> {
    let mut kinds = Vec::new();
    for name in list.split(',') {
        match ShapeKind::from_name(name.trim()) {
            Some(kind) => kinds.push(kind),
            None => return Err(format!("unknown shape kind '{}'", name.trim())),
        }
    }
    Ok(ShapeSet::from_kinds(&kinds))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = ExperimentConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                config.rows = args[i].parse().expect("invalid --rows value");
            }
            "--cols" => {
                i += 1;
                config.cols = args[i].parse().expect("invalid --cols value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--turns" => {
                i += 1;
                config.turns = args[i].parse().expect("invalid --turns value");
            }
            "--orb-bonus" => {
                i += 1;
                config.orb_bonus = args[i].parse().expect("invalid --orb-bonus value");
            }
            "--policy" => {
                i += 1;
                let text = fs::read_to_string(&args[i]).expect("failed to read policy file");
                config.policy =
                    serde_json::from_str(&text).expect("failed to parse policy file");
            }
            "--shapes" => {
                i += 1;
                match parse_shapes(&args[i]) {
                    Ok(set) => config.shapes = Some(set),
                    Err(e) => {
                        eprintln!("{}", e);
                        process::exit(1);
                    }
                }
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let shapes = config.shapes.unwrap_or_default();
    let mut board = Board::with_shapes(config.rows, config.cols, config.seed, shapes);

    if !config.quiet {
        eprintln!(
            "Experiment: {}x{} board, seed {}, up to {} turns, orb bonus {}",
            config.rows, config.cols, config.seed, config.turns, config.orb_bonus
        );
        println!("{}", board.render_text());
    }

    let mut total: i64 = 0;
    let mut turns_played = 0usize;

    for turn in 1..=config.turns {
        let mv = match search::select_best(&board, &config.policy, config.orb_bonus) {
            Ok(mv) => mv,
            Err(SelectError::NoValidMove) => {
                if !config.quiet {
                    eprintln!("turn {}: board is stuck, ending experiment", turn);
                }
                break;
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };

        let trace = resolve::apply(&mut board, mv).expect("selected move must apply");
        let score = cascade_score(&trace, &config.policy, config.orb_bonus);
        total += score;
        turns_played += 1;

        if !config.quiet {
            let orbs: usize = trace.iter().map(|m| m.cells.len()).sum();
            eprintln!(
                "turn {}: {} cleared {} group(s) / {} orb(s) for {}",
                turn,
                mv,
                trace.len(),
                orbs,
                score
            );
            println!("{}", board.render_text());
        }
    }

    eprintln!(
        "Played {} turn(s), total score {}, mean {:.1} per turn",
        turns_played,
        total,
        total as f64 / turns_played.max(1) as f64
    );
}

fn print_usage() {
    eprintln!("Usage: soulboard [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --rows N        Board rows (default: 2)");
    eprintln!("  --cols N        Board columns (default: 7)");
    eprintln!("  --seed N        Refill generator seed (default: 0)");
    eprintln!("  --turns N       Maximum number of turns (default: 50)");
    eprintln!("  --orb-bonus N   Exploration bonus per cleared orb (default: 9)");
    eprintln!("  --policy FILE   JSON shape-kind -> weight map (default: built-in)");
    eprintln!("  --shapes LIST   Comma-separated active shape kinds (default loadout)");
    eprintln!("  --quiet         Suppress per-turn output and board renders");
    eprintln!("  --help          Show this help");
}
