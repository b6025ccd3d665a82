use std::io::{self, BufWriter};

use clap::Parser;
use log::info;

use hanoi_tower::hanoi_solver::{write_moves, HanoiSolver, HanoiSolverOptions};

#[derive(Parser, Debug)]
#[clap(name = "moves_generator")]
struct Opts {
  #[clap(short = 'n', long, default_value = "4")]
  num_disks: usize,

  #[clap(short, long, default_value = "0")]
  src_peg: usize,

  #[clap(short, long, default_value = "1")]
  dst_peg: usize,

  /// Print the moves as a JSON array instead of one "src dst" pair per line.
  #[clap(long)]
  json: bool,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let opts: Opts = Opts::parse();

  let moves = HanoiSolver::moves(HanoiSolverOptions::between(
    opts.num_disks,
    opts.src_peg,
    opts.dst_peg))?;
  info!("Generating {} moves for {} disks", moves.remaining(), opts.num_disks);

  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());
  write_moves(&mut out, moves, opts.json)?;
  Ok(())
}
