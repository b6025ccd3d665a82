use std::io;

use crate::tower_renderer::{ConsoleRenderer, TowerRenderer};
use crate::tower_renderer_quiet::QuietRenderer;

#[derive(Default)]
pub struct TowerRendererFactory {
  quiet: bool,
}

impl TowerRendererFactory {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn new_maybe_quiet(quiet: bool) -> Self {
    Self { quiet }
  }

  pub fn create_renderer(&self) -> Box<dyn TowerRenderer> {
    if self.quiet {
      Box::new(QuietRenderer::default())
    } else {
      Box::new(ConsoleRenderer::new(io::stdout()))
    }
  }
}
