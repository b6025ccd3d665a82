use log::{debug, info};
use thiserror::Error;

use crate::move_prompt::MoveSource;
use crate::puzzle_state::{check_target_peg, IllegalMove, PuzzleError, PuzzleState};
use crate::tower_renderer::TowerRenderer;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SessionStatus {
  InProgress,
  Solved,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MoveOutcome {
  Moved,
  Solved,
  Rejected(IllegalMove),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
  #[error("puzzle is already solved")]
  AlreadySolved,
}

/// A game played one move at a time.  Completion is only checked after a move succeeds, and once
/// solved the session refuses further moves.
pub struct Session {
  state: PuzzleState,
  target_peg: usize,
  status: SessionStatus,
}

impl Session {
  pub fn new(state: PuzzleState, target_peg: usize) -> Result<Self, PuzzleError> {
    check_target_peg(target_peg)?;
    Ok(Self { state, target_peg, status: SessionStatus::InProgress })
  }

  pub fn state(&self) -> &PuzzleState {
    &self.state
  }

  pub fn into_state(self) -> PuzzleState {
    self.state
  }

  pub fn status(&self) -> SessionStatus {
    self.status
  }

  pub fn target_peg(&self) -> usize {
    self.target_peg
  }

  pub fn submit_move(&mut self, from: usize, to: usize) -> Result<MoveOutcome, SessionError> {
    if self.status == SessionStatus::Solved {
      return Err(SessionError::AlreadySolved);
    }
    if let Err(reason) = self.state.try_move(from, to) {
      return Ok(MoveOutcome::Rejected(reason));
    }
    if self.state.is_solved(self.target_peg) {
      info!("Solved in {} moves", self.state.move_count());
      self.status = SessionStatus::Solved;
      return Ok(MoveOutcome::Solved);
    }
    Ok(MoveOutcome::Moved)
  }
}

/// Play until the puzzle is solved or `source` runs dry.  Returns the final status.
pub fn run_interactive(
    session: &mut Session,
    source: &mut dyn MoveSource,
    renderer: &mut dyn TowerRenderer) -> anyhow::Result<SessionStatus> {
  while session.status() == SessionStatus::InProgress {
    renderer.show_tower(session.state().snapshot())?;
    let (from, to) = match source.next_move()? {
      Some(next) => next,
      None => {
        debug!("Move source exhausted after {} moves", session.state().move_count());
        return Ok(session.status());
      }
    };
    match session.submit_move(from, to)? {
      MoveOutcome::Rejected(IllegalMove::SamePeg) => {
        renderer.show_message("\nERROR: from and to pegs cannot be the same. Try again.\n")?;
      }
      MoveOutcome::Rejected(_) => {
        renderer.show_message("\nERROR: Invalid move. Try again.\n")?;
      }
      MoveOutcome::Moved | MoveOutcome::Solved => {}
    }
  }

  renderer.show_tower(session.state().snapshot())?;
  renderer.show_message("\nSUCCESS!!! You won!\n")?;
  Ok(session.status())
}
