//! Play the Tower of Hanoi in the terminal, or watch it get solved.
//!
//! The disks start stacked on peg 0 and the goal is to move the whole stack onto the center peg,
//! one disk at a time, never putting a larger disk on a smaller one.

use std::io;

use clap::{ArgEnum, Parser};
use log::{info, warn};

use hanoi_tower::hanoi_solver::{HanoiSolver, HanoiSolverOptions};
use hanoi_tower::move_prompt::MovePrompt;
use hanoi_tower::puzzle_state::{check_target_peg, PuzzleState};
use hanoi_tower::session::{run_interactive, Session, SessionStatus};
use hanoi_tower::tower_renderer::{ConsoleRenderer, TowerRenderer};
use hanoi_tower::tower_renderer_factory::TowerRendererFactory;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Play,
    Solve,
}

#[derive(Parser, Debug)]
#[clap(name = "hanoi")]
struct Opts {
    /// Number of disks (levels) to start with.
    num_disks: usize,

    #[clap(arg_enum, default_value = "play", ignore_case = true)]
    mode: Mode,

    /// Only show the first and last tower while solving. Has no effect in play mode.
    #[clap(short, long)]
    quiet: bool,

    /// Peg the stack has to end up on, 1 (center) or 2 (right).
    #[clap(long, default_value = "1")]
    target_peg: usize,
}

const BANNER: &str = r#"
  _____                               __   _   _                   _
 |_   _|____      _____ _ __    ___  / _| | | | | __ _ _ __   ___ (_)
   | |/ _ \ \ /\ / / _ \ '__|  / _ \| |_  | |_| |/ _` | '_ \ / _ \| |
   | | (_) \ V  V /  __/ |    | (_) |  _| |  _  | (_| | | | | (_) | |
   |_|\___/ \_/\_/ \___|_|     \___/|_|   |_| |_|\__,_|_| |_|\___/|_|
"#;

const INTRODUCTION: &str = "\
Welcome to the Tower Of Hanoi Game. You are given a wooden board with three tall
pegs in a row. Wooden disks are stacked in decreasing diameter on the left peg.
The objective is to move the stack of disks from the left peg to the center peg
in the same order as they began. Disks are moved from peg to peg, one at a time,
and a larger disk cannot be placed on a smaller disk.

Let's begin!
";

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let state = PuzzleState::new(opts.num_disks)?;
    info!("Starting {:?} with {} disks", opts.mode, opts.num_disks);
    if opts.quiet && opts.mode == Mode::Play {
        warn!("--quiet only applies to solve mode");
    }

    let state = match opts.mode {
        Mode::Play => play(state, opts.target_peg)?,
        Mode::Solve => solve(state, opts.target_peg, opts.quiet)?,
    };

    println!(
        "\nIt took you {} moves with {} levels.\n",
        state.move_count(),
        state.num_disks());
    Ok(())
}

fn play(state: PuzzleState, target_peg: usize) -> anyhow::Result<PuzzleState> {
    let mut session = Session::new(state, target_peg)?;
    println!("{BANNER}\n");
    println!("{INTRODUCTION}");

    let mut renderer = ConsoleRenderer::new(io::stdout());
    let mut prompt = MovePrompt::stdio();
    if run_interactive(&mut session, &mut prompt, &mut renderer)? != SessionStatus::Solved {
        println!("\nGave up.");
    }
    Ok(session.into_state())
}

fn solve(mut state: PuzzleState, target_peg: usize, quiet: bool) -> anyhow::Result<PuzzleState> {
    check_target_peg(target_peg)?;

    let mut console = ConsoleRenderer::new(io::stdout());
    console.show_message("\nSolving the Tower of Hanoi puzzle automatically...")?;
    console.show_tower(state.snapshot())?;

    let options = HanoiSolverOptions::to_target(state.num_disks(), target_peg);
    let mut renderer = TowerRendererFactory::new_maybe_quiet(quiet).create_renderer();
    HanoiSolver::apply(&mut state, options, renderer.as_mut())?;

    if quiet {
        console.show_tower(state.snapshot())?;
    }
    Ok(state)
}
