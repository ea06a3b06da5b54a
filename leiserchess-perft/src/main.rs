//! Leiserchess Perft
//!
//! Counts move-tree leaves from a position, depth by depth, cross-checking
//! the fast move generator against the reference generator.
//!
//! ```text
//! perft [--depth N] [--divide] [--no-check] ["<fen>"]
//! ```

mod stats;

use std::env;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use leiserchess_core::{count_leaves, count_leaves_unchecked, divide, Position, START_FEN};

use crate::stats::{DepthResult, PerftStats};

/// Command line options.
#[derive(Debug, PartialEq)]
struct Options {
    depth: u32,
    divide: bool,
    check: bool,
    fen: String,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        depth: 4,
        divide: false,
        check: true,
        fen: START_FEN.to_string(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--depth" => {
                let value = iter.next().ok_or("--depth needs a value")?;
                options.depth = value
                    .parse()
                    .map_err(|_| format!("invalid depth: {value}"))?;
            }
            "--divide" => options.divide = true,
            "--no-check" => options.check = false,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            fen => options.fen = fen.to_string(),
        }
    }
    Ok(options)
}

fn count(pos: &Position, depth: u32, check: bool) -> u64 {
    if check {
        count_leaves(pos, depth)
    } else {
        count_leaves_unchecked(pos, depth)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: perft [--depth N] [--divide] [--no-check] [\"<fen>\"]");
            return ExitCode::FAILURE;
        }
    };
    let pos = match Position::from_fen(&options.fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Leiserchess Perft");
    println!("=================");
    println!("Position: {}", options.fen);
    println!(
        "Mode: {}",
        if options.check { "fast vs reference generator" } else { "fast generator only" }
    );
    println!("{}", pos);

    // Set up SIGINT handler; the run stops after the current depth
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, stopping after this depth...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let mut stats = PerftStats::new();
    let mut split = Vec::new();
    for depth in 1..=options.depth {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let start = Instant::now();
        let leaves = if options.divide && depth == options.depth {
            split = divide(&pos, depth, options.check);
            split.iter().map(|&(_, n)| n).sum()
        } else {
            count(&pos, depth, options.check)
        };
        stats.record(DepthResult {
            depth,
            leaves,
            elapsed: start.elapsed(),
        });
    }

    if !split.is_empty() {
        println!("\nDivide at depth {}:", options.depth);
        for (mv, leaves) in split {
            println!("  {:<6} {}", mv.to_string(), leaves);
        }
    }

    println!("\n=================");
    stats.print_summary();
    ExitCode::SUCCESS
}
