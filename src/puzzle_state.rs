use log::{debug, trace};
use thiserror::Error;

pub const NUM_PEGS: usize = 3;
pub const START_PEG: usize = 0;

#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum PuzzleError {
  #[error("number of disks must be at least 1")]
  NoDisks,
  #[error("target peg {0} must be 1 or 2")]
  InvalidTargetPeg(usize),
}

#[derive(Error, PartialEq, Eq, Copy, Clone, Debug)]
pub enum IllegalMove {
  #[error("peg {0} does not exist")]
  InvalidPeg(usize),
  #[error("from and to pegs cannot be the same")]
  SamePeg,
  #[error("peg {0} has no disks")]
  EmptyPeg(usize),
  #[error("disk {disk} cannot be placed on smaller disk {onto}")]
  LargerOntoSmaller { disk: usize, onto: usize },
}

/// The stack always starts on [`START_PEG`], so any other peg is a valid goal.
pub fn check_target_peg(target_peg: usize) -> Result<(), PuzzleError> {
  if target_peg >= NUM_PEGS || target_peg == START_PEG {
    return Err(PuzzleError::InvalidTargetPeg(target_peg));
  }
  Ok(())
}

/// Owns the disks on all three pegs.  Each peg is a stack stored bottom to top, and the only way
/// to change one is through [`PuzzleState::try_move`], which refuses anything that would put a
/// larger disk on a smaller one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PuzzleState {
  num_disks: usize,
  pegs: [Vec<usize>; NUM_PEGS],
  num_moves: u64,
}

impl PuzzleState {
  pub fn new(num_disks: usize) -> Result<Self, PuzzleError> {
    if num_disks < 1 {
      return Err(PuzzleError::NoDisks);
    }
    let mut me = PuzzleState {
      num_disks,
      pegs: [Vec::with_capacity(num_disks), Vec::with_capacity(num_disks), Vec::with_capacity(num_disks)],
      num_moves: 0,
    };
    me.reset();
    Ok(me)
  }

  /// Put every disk back on the start peg, largest at the bottom, and forget all moves.
  pub fn reset(&mut self) {
    for peg in &mut self.pegs {
      peg.clear();
    }
    self.pegs[START_PEG].extend((1..=self.num_disks).rev());
    self.num_moves = 0;
  }

  pub fn num_disks(&self) -> usize {
    self.num_disks
  }

  pub fn move_count(&self) -> u64 {
    self.num_moves
  }

  pub fn top_disk(&self, peg: usize) -> Option<usize> {
    self.pegs.get(peg).and_then(|p| p.last().copied())
  }

  pub fn check_move(&self, from: usize, to: usize) -> Result<(), IllegalMove> {
    for peg in [from, to] {
      if peg >= NUM_PEGS {
        return Err(IllegalMove::InvalidPeg(peg));
      }
    }
    if from == to {
      return Err(IllegalMove::SamePeg);
    }
    let disk = self.top_disk(from).ok_or(IllegalMove::EmptyPeg(from))?;
    match self.top_disk(to) {
      Some(onto) if onto < disk => Err(IllegalMove::LargerOntoSmaller { disk, onto }),
      _ => Ok(()),
    }
  }

  /// Move the top disk of `from` onto `to`.  Nothing changes unless the move is legal.
  pub fn try_move(&mut self, from: usize, to: usize) -> Result<(), IllegalMove> {
    if let Err(e) = self.check_move(from, to) {
      debug!("Rejected move {from} -> {to}: {e}");
      return Err(e);
    }

    // check_move already proved the source is non-empty.
    if let Some(disk) = self.pegs[from].pop() {
      self.pegs[to].push(disk);
      self.num_moves += 1;
      trace!("Moved disk {disk} from {from} to {to} (move #{})", self.num_moves);
    }
    Ok(())
  }

  pub fn apply_move(&mut self, from: usize, to: usize) -> bool {
    self.try_move(from, to).is_ok()
  }

  pub fn is_solved(&self, target_peg: usize) -> bool {
    // Ordering holds on every peg at all times, so holding every disk is enough.
    self.pegs.get(target_peg).map_or(false, |peg| peg.len() == self.num_disks)
  }

  pub fn snapshot(&self) -> Snapshot<'_> {
    Snapshot { num_disks: self.num_disks, pegs: &self.pegs }
  }
}

/// Read-only view of the pegs, handed to renderers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot<'a> {
  num_disks: usize,
  pegs: &'a [Vec<usize>; NUM_PEGS],
}

impl<'a> Snapshot<'a> {
  pub fn num_disks(&self) -> usize {
    self.num_disks
  }

  /// Disks on `peg`, bottom to top, or `None` if there is no such peg.
  pub fn peg(&self, peg: usize) -> Option<&'a [usize]> {
    self.pegs.get(peg).map(Vec::as_slice)
  }

  pub fn pegs(&self) -> impl Iterator<Item = &'a [usize]> + 'a {
    self.pegs.iter().map(|p| p.as_slice())
  }

  /// Disk at `level` (0 is the bottom) of `peg`, or `None` when that slot is empty.
  pub fn disk_at(&self, peg: usize, level: usize) -> Option<usize> {
    self.pegs.get(peg).and_then(|p| p.get(level).copied())
  }
}
