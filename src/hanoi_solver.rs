use std::io::{self, Write};

use derive_new::new;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::puzzle_state::{IllegalMove, PuzzleError, PuzzleState, NUM_PEGS};
use crate::tower_renderer::TowerRenderer;

/// Largest stack whose move count (2^n - 1) still fits in a `u64`.
pub const MAX_SOLVABLE_DISKS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HanoiSolverOptions {
  pub num_disks: usize,
  pub src_peg: usize,
  pub dst_peg: usize,
  pub aux_peg: usize,
}

impl HanoiSolverOptions {
  /// Move everything from peg 0 to the center peg.
  pub fn standard(num_disks: usize) -> Self {
    Self { num_disks, src_peg: 0, dst_peg: 1, aux_peg: 2 }
  }

  /// Move everything from peg 0 to `dst_peg`, staging on whichever peg is left over.
  pub fn to_target(num_disks: usize, dst_peg: usize) -> Self {
    Self::between(num_disks, 0, dst_peg)
  }

  pub fn between(num_disks: usize, src_peg: usize, dst_peg: usize) -> Self {
    let aux_peg = (0..NUM_PEGS).find(|&p| p != src_peg && p != dst_peg).unwrap_or(NUM_PEGS);
    Self { num_disks, src_peg, dst_peg, aux_peg }
  }

  fn validate(&self) -> Result<(), SolverError> {
    let pegs = [self.src_peg, self.dst_peg, self.aux_peg];
    let in_range = pegs.iter().all(|&p| p < NUM_PEGS);
    let distinct = self.src_peg != self.dst_peg &&
        self.dst_peg != self.aux_peg &&
        self.aux_peg != self.src_peg;
    if !in_range || !distinct {
      return Err(SolverError::InvalidPegs {
        src_peg: self.src_peg,
        dst_peg: self.dst_peg,
        aux_peg: self.aux_peg,
      });
    }
    if self.num_disks > MAX_SOLVABLE_DISKS {
      return Err(SolverError::TooManyDisks(self.num_disks));
    }
    Ok(())
  }
}

#[derive(new, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskMove {
  pub src_peg: usize,
  pub dst_peg: usize,
}

pub struct HanoiSolution {
  pub required_moves: Vec<DiskMove>,
}

#[derive(Error, Debug)]
pub enum SolverError {
  #[error("pegs {src_peg}, {dst_peg}, {aux_peg} are not a permutation of 0, 1, 2")]
  InvalidPegs { src_peg: usize, dst_peg: usize, aux_peg: usize },

  #[error("{0} disks is more than the {} that can be counted", MAX_SOLVABLE_DISKS)]
  TooManyDisks(usize),

  /// The solver generated a move the puzzle refused.  This only happens when the puzzle wasn't
  /// in the arrangement the options describe.
  #[error("move #{move_index} ({} -> {}) was rejected: {reason}", .disk_move.src_peg, .disk_move.dst_peg)]
  Inconsistent { move_index: u64, disk_move: DiskMove, reason: IllegalMove },

  #[error("solution left the puzzle unsolved after {0} moves")]
  Unsolved(u64),

  #[error(transparent)]
  Puzzle(#[from] PuzzleError),

  #[error("renderer failed: {0}")]
  Render(anyhow::Error),
}

/// Number of moves in the optimal solution for `num_disks` disks.
pub fn total_moves(num_disks: usize) -> u64 {
  match num_disks {
    0 => 0,
    n if n >= 64 => u64::MAX,
    n => (1u64 << n) - 1,
  }
}

pub struct HanoiSolver;

impl HanoiSolver {
  /// Lazily produce the optimal moves.  Calling this again starts over; a clone of the iterator
  /// resumes from the same point.
  pub fn moves(options: HanoiSolverOptions) -> Result<HanoiMoves, SolverError> {
    options.validate()?;
    return Ok(HanoiMoves::new_internal(options));
  }

  /// Collect every move and check the result by replaying it against a fresh puzzle.
  pub fn solve(options: HanoiSolverOptions) -> Result<HanoiSolution, SolverError> {
    let required_moves: Vec<DiskMove> = HanoiSolver::moves(options)?.collect();
    HanoiSolver::validate_solution(&options, &required_moves)?;
    return Ok(HanoiSolution { required_moves });
  }

  /// Drive `state` through the optimal solution, showing the tower after every move.  Returns
  /// the number of moves applied.
  pub fn apply(
      state: &mut PuzzleState,
      options: HanoiSolverOptions,
      renderer: &mut dyn TowerRenderer) -> Result<u64, SolverError> {
    let moves = HanoiSolver::moves(options)?;
    info!("Applying {} moves for {} disks", total_moves(options.num_disks), options.num_disks);

    let mut applied = 0;
    for disk_move in moves {
      state.try_move(disk_move.src_peg, disk_move.dst_peg)
          .map_err(|reason| SolverError::Inconsistent { move_index: applied + 1, disk_move, reason })?;
      applied += 1;
      renderer.show_tower(state.snapshot()).map_err(SolverError::Render)?;
    }

    if options.num_disks > 0 && !state.is_solved(options.dst_peg) {
      return Err(SolverError::Unsolved(applied));
    }
    Ok(applied)
  }

  fn validate_solution(options: &HanoiSolverOptions, required_moves: &[DiskMove]) -> Result<(), SolverError> {
    if options.num_disks == 0 {
      return Ok(());
    }
    let mut other = PuzzleState::new(options.num_disks)?;
    if options.src_peg != 0 {
      // Replays always start from peg 0, so relabel pegs to match.
      let relabel = |p: usize| match p {
        p if p == options.src_peg => 0,
        0 => options.src_peg,
        p => p,
      };
      let dst_peg = relabel(options.dst_peg);
      return HanoiSolver::replay(&mut other, required_moves, relabel, dst_peg);
    }
    return HanoiSolver::replay(&mut other, required_moves, |p| p, options.dst_peg);
  }

  fn replay(
      state: &mut PuzzleState,
      required_moves: &[DiskMove],
      relabel: impl Fn(usize) -> usize,
      dst_peg: usize) -> Result<(), SolverError> {
    for (i, &disk_move) in required_moves.iter().enumerate() {
      state.try_move(relabel(disk_move.src_peg), relabel(disk_move.dst_peg))
          .map_err(|reason| SolverError::Inconsistent { move_index: i as u64 + 1, disk_move, reason })?;
    }
    if !state.is_solved(dst_peg) {
      return Err(SolverError::Unsolved(state.move_count()));
    }
    debug!("Validated {} moves", required_moves.len());
    Ok(())
  }
}

#[derive(Clone)]
enum Frame {
  Solve { num_disks: usize, src_peg: usize, dst_peg: usize, aux_peg: usize },
  Move(DiskMove),
}

/// Iterator over the optimal moves.  Unrolls the recursion onto an explicit stack so it can be
/// paused between moves; depth never exceeds twice the number of disks.
#[derive(Clone)]
pub struct HanoiMoves {
  options: HanoiSolverOptions,
  stack: Vec<Frame>,
  remaining: u64,
}

impl HanoiMoves {
  fn new_internal(options: HanoiSolverOptions) -> Self {
    let mut stack = Vec::with_capacity(options.num_disks * 2 + 1);
    stack.push(Frame::Solve {
      num_disks: options.num_disks,
      src_peg: options.src_peg,
      dst_peg: options.dst_peg,
      aux_peg: options.aux_peg,
    });
    return HanoiMoves { options, stack, remaining: total_moves(options.num_disks) };
  }

  /// Start over from the first move.
  pub fn restart(&mut self) {
    *self = HanoiMoves::new_internal(self.options);
  }

  pub fn remaining(&self) -> u64 {
    self.remaining
  }
}

impl Iterator for HanoiMoves {
  type Item = DiskMove;

  fn next(&mut self) -> Option<DiskMove> {
    while let Some(frame) = self.stack.pop() {
      match frame {
        Frame::Move(disk_move) => {
          self.remaining = self.remaining.saturating_sub(1);
          return Some(disk_move);
        }
        Frame::Solve { num_disks: 0, .. } => {}
        Frame::Solve { num_disks, src_peg, dst_peg, aux_peg } => {
          // Pushed in reverse: clear the smaller disks onto aux, move the largest, then bring the
          // smaller disks back on top of it.
          self.stack.push(Frame::Solve { num_disks: num_disks - 1, src_peg: aux_peg, dst_peg, aux_peg: src_peg });
          self.stack.push(Frame::Move(DiskMove::new(src_peg, dst_peg)));
          self.stack.push(Frame::Solve { num_disks: num_disks - 1, src_peg, dst_peg: aux_peg, aux_peg: dst_peg });
        }
      }
    }
    None
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match usize::try_from(self.remaining) {
      Ok(n) => (n, Some(n)),
      Err(_) => (usize::MAX, None),
    }
  }
}

/// Stream `moves` to `out` one at a time, either as `src dst` lines or as a JSON array.  Nothing
/// is collected, so this works for stacks far too large to hold in memory.  Returns the number of
/// moves written.
pub fn write_moves<W: Write>(
    out: &mut W,
    moves: impl Iterator<Item = DiskMove>,
    json: bool) -> io::Result<u64> {
  let mut written = 0u64;
  if json {
    out.write_all(b"[")?;
  }
  for disk_move in moves {
    if json {
      let separator: &[u8] = if written == 0 { b"\n  " } else { b",\n  " };
      out.write_all(separator)?;
      serde_json::to_writer(&mut *out, &disk_move)?;
    } else {
      writeln!(out, "{} {}", disk_move.src_peg, disk_move.dst_peg)?;
    }
    written += 1;
  }
  if json {
    let close: &[u8] = if written == 0 { b"]\n" } else { b"\n]\n" };
    out.write_all(close)?;
  }
  out.flush()?;
  return Ok(written);
}

#[cfg(test)]
mod tests {
  use crate::tower_renderer::TowerRenderer;
  use crate::puzzle_state::Snapshot;

  use super::*;

  #[derive(Default)]
  struct CountingRenderer {
    towers_shown: usize,
  }

  impl TowerRenderer for CountingRenderer {
    fn show_tower(&mut self, _snapshot: Snapshot<'_>) -> anyhow::Result<()> {
      self.towers_shown += 1;
      Ok(())
    }

    fn show_message(&mut self, _message: &str) -> anyhow::Result<()> {
      Ok(())
    }
  }

  fn pairs(moves: &[DiskMove]) -> Vec<(usize, usize)> {
    moves.iter().map(|m| (m.src_peg, m.dst_peg)).collect()
  }

  #[test]
  fn test_zero_disks_yields_nothing() {
    let solution = HanoiSolver::solve(HanoiSolverOptions::standard(0)).unwrap();
    assert!(solution.required_moves.is_empty());
  }

  #[test]
  fn test_move_counts_are_optimal() {
    for n in 0..=12 {
      let moves = HanoiSolver::moves(HanoiSolverOptions::standard(n)).unwrap();
      assert_eq!(moves.size_hint(), (total_moves(n) as usize, Some(total_moves(n) as usize)));
      assert_eq!(moves.count() as u64, (1u64 << n) - 1, "n = {n}");
    }
  }

  #[test]
  fn test_matches_scripted_four_disk_solution() {
    let expected = vec![
      (0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2), (0, 1),
      (2, 1), (2, 0), (1, 0), (2, 1), (0, 2), (0, 1), (2, 1),
    ];
    let solution = HanoiSolver::solve(HanoiSolverOptions::standard(4)).unwrap();
    assert_eq!(pairs(&solution.required_moves), expected);
  }

  #[test]
  fn test_apply_solves_fresh_state() {
    for n in 1..=10 {
      let mut state = PuzzleState::new(n).unwrap();
      let mut renderer = CountingRenderer::default();
      let applied = HanoiSolver::apply(&mut state, HanoiSolverOptions::standard(n), &mut renderer).unwrap();
      assert_eq!(applied, total_moves(n));
      assert_eq!(state.move_count(), total_moves(n));
      assert_eq!(renderer.towers_shown as u64, applied);
      assert!(state.is_solved(1));
      let expected: Vec<usize> = (1..=n).rev().collect();
      assert_eq!(state.snapshot().peg(1), Some(expected.as_slice()));
    }
  }

  #[test]
  fn test_apply_to_other_target() {
    let mut state = PuzzleState::new(5).unwrap();
    let options = HanoiSolverOptions::to_target(5, 2);
    assert_eq!(options.aux_peg, 1);
    HanoiSolver::apply(&mut state, options, &mut CountingRenderer::default()).unwrap();
    assert!(state.is_solved(2));
  }

  #[test]
  fn test_apply_surfaces_mismatched_state() {
    let mut state = PuzzleState::new(3).unwrap();
    let result = HanoiSolver::apply(&mut state, HanoiSolverOptions::standard(4), &mut CountingRenderer::default());
    match result {
      Err(SolverError::Inconsistent { reason, .. }) => {
        assert!(matches!(reason, IllegalMove::EmptyPeg(_) | IllegalMove::LargerOntoSmaller { .. }));
      }
      Err(e) => panic!("unexpected error: {e}"),
      Ok(n) => panic!("unexpectedly applied {n} moves"),
    }
  }

  #[test]
  fn test_invalid_pegs_rejected() {
    let bad = [
      HanoiSolverOptions { num_disks: 3, src_peg: 0, dst_peg: 0, aux_peg: 2 },
      HanoiSolverOptions { num_disks: 3, src_peg: 1, dst_peg: 1, aux_peg: 1 },
      HanoiSolverOptions { num_disks: 3, src_peg: 0, dst_peg: 1, aux_peg: 3 },
    ];
    for options in bad {
      assert!(matches!(HanoiSolver::moves(options), Err(SolverError::InvalidPegs { .. })));
    }
    assert!(matches!(
      HanoiSolver::moves(HanoiSolverOptions::standard(65)),
      Err(SolverError::TooManyDisks(65))));
  }

  #[test]
  fn test_other_source_peg_validates() {
    let solution = HanoiSolver::solve(HanoiSolverOptions::between(3, 2, 0)).unwrap();
    assert_eq!(solution.required_moves.len(), 7);
    assert_eq!(solution.required_moves[0], DiskMove::new(2, 0));
  }

  #[test]
  fn test_restartable() {
    let mut moves = HanoiSolver::moves(HanoiSolverOptions::standard(5)).unwrap();
    let first_pass: Vec<DiskMove> = moves.clone().collect();
    moves.by_ref().take(10).for_each(drop);
    assert_eq!(moves.remaining(), 21);
    let resumed = moves.clone();
    assert_eq!(resumed.collect::<Vec<_>>(), first_pass[10..].to_vec());
    moves.restart();
    assert_eq!(moves.collect::<Vec<_>>(), first_pass);
  }

  #[test]
  fn test_json_shape() {
    let json = serde_json::to_string(&DiskMove::new(0, 2)).unwrap();
    assert_eq!(json, r#"{"src_peg":0,"dst_peg":2}"#);
  }

  #[test]
  fn test_apply_reports_unsolved_stack() {
    // Three disks' worth of moves only clears the top of a four disk stack.
    let mut state = PuzzleState::new(4).unwrap();
    let result = HanoiSolver::apply(&mut state, HanoiSolverOptions::standard(3), &mut CountingRenderer::default());
    assert!(matches!(result, Err(SolverError::Unsolved(7))));
    assert_eq!(state.snapshot().peg(0), Some(&[4][..]));
    assert_eq!(state.snapshot().peg(1), Some(&[3, 2, 1][..]));
  }

  #[test]
  fn test_write_moves_text() {
    let mut out = Vec::new();
    let moves = HanoiSolver::moves(HanoiSolverOptions::standard(2)).unwrap();
    assert_eq!(write_moves(&mut out, moves, false).unwrap(), 3);
    assert_eq!(String::from_utf8(out).unwrap(), "0 2\n0 1\n2 1\n");
  }

  #[test]
  fn test_write_moves_json() {
    let mut out = Vec::new();
    let moves = HanoiSolver::moves(HanoiSolverOptions::between(2, 2, 0)).unwrap();
    write_moves(&mut out, moves, true).unwrap();
    let text = String::from_utf8(out).unwrap();
    let parsed: Vec<DiskMove> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, vec![DiskMove::new(2, 1), DiskMove::new(2, 0), DiskMove::new(1, 0)]);

    let mut empty = Vec::new();
    write_moves(&mut empty, HanoiSolver::moves(HanoiSolverOptions::standard(0)).unwrap(), true).unwrap();
    assert_eq!(String::from_utf8(empty).unwrap(), "[]\n");
  }

  #[test]
  fn test_write_moves_streams_large_stack() {
    let mut moves = HanoiSolver::moves(HanoiSolverOptions::standard(40)).unwrap();
    let mut out = Vec::new();
    assert_eq!(write_moves(&mut out, moves.by_ref().take(3), false).unwrap(), 3);
    assert_eq!(String::from_utf8(out).unwrap(), "0 2\n0 1\n2 1\n");
    assert_eq!(moves.remaining(), total_moves(40) - 3);
  }

  #[test]
  fn test_large_stack_is_lazy() {
    let mut moves = HanoiSolver::moves(HanoiSolverOptions::standard(64)).unwrap();
    assert_eq!(moves.remaining(), u64::MAX);
    assert_eq!(moves.next(), Some(DiskMove::new(0, 2)));
    assert_eq!(moves.next(), Some(DiskMove::new(0, 1)));
  }
}
