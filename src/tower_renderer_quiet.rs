use log::trace;

use crate::puzzle_state::Snapshot;
use crate::tower_renderer::TowerRenderer;

/// Renderer that only shows up in trace logs.
#[derive(Debug, Default)]
pub struct QuietRenderer {
  towers_skipped: u64,
}

impl QuietRenderer {
  pub fn towers_skipped(&self) -> u64 {
    self.towers_skipped
  }
}

impl TowerRenderer for QuietRenderer {
  fn show_tower(&mut self, snapshot: Snapshot<'_>) -> anyhow::Result<()> {
    self.towers_skipped += 1;
    trace!("show_tower: {:?}", snapshot.pegs().collect::<Vec<_>>());
    Ok(())
  }

  fn show_message(&mut self, message: &str) -> anyhow::Result<()> {
    trace!("show_message: {message}");
    Ok(())
  }
}
