use std::io::Write;

use crate::puzzle_state::{Snapshot, NUM_PEGS};

/// Hook for everything the puzzle wants to show the player.  Drivers call it after each move so
/// the same loop can run silently in tests and noisily on a terminal.
pub trait TowerRenderer {
  fn show_tower(&mut self, snapshot: Snapshot<'_>) -> anyhow::Result<()>;
  fn show_message(&mut self, message: &str) -> anyhow::Result<()>;
}

/// Draws the pegs as ASCII art, for example with 4 disks on peg 0:
///
/// ```text
/// Level
///  4     -|-         |          |
///  3    --|--        |          |
///  2   ---|---       |          |
///  1  ----|----      |          |
///    -----+----------+----------+-----
/// Peg     0          1          2
/// ```
///
/// Every peg column is `2 * (num_disks + 1) + 1` characters wide (trailing spaces included) so
/// that all levels line up.
pub fn render_tower(snapshot: Snapshot<'_>) -> String {
  let num_disks = snapshot.num_disks();
  let mut out = String::from("Level\n");
  for level in (0..num_disks).rev() {
    out.push_str(&format!("{:2} ", level + 1));
    for peg in 0..NUM_PEGS {
      let disk = snapshot.disk_at(peg, level).unwrap_or(0);
      let padding = " ".repeat(num_disks - disk + 1);
      let half = "-".repeat(disk);
      out.push_str(&padding);
      out.push_str(&half);
      out.push('|');
      out.push_str(&half);
      out.push_str(&padding);
    }
    out.push('\n');
  }

  let base_half = "-".repeat(num_disks + 1);
  let label_half = " ".repeat(num_disks + 1);
  out.push_str("   ");
  for _ in 0..NUM_PEGS {
    out.push_str(&format!("{base_half}+{base_half}"));
  }
  out.push('\n');
  out.push_str("Peg");
  for peg in 0..NUM_PEGS {
    out.push_str(&format!("{label_half}{peg}{label_half}"));
  }
  out.push('\n');
  out
}

pub struct ConsoleRenderer<W: Write> {
  out: W,
}

impl<W: Write> ConsoleRenderer<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> TowerRenderer for ConsoleRenderer<W> {
  fn show_tower(&mut self, snapshot: Snapshot<'_>) -> anyhow::Result<()> {
    writeln!(self.out)?;
    write!(self.out, "{}", render_tower(snapshot))?;
    writeln!(self.out)?;
    self.out.flush()?;
    Ok(())
  }

  fn show_message(&mut self, message: &str) -> anyhow::Result<()> {
    writeln!(self.out, "{message}")?;
    self.out.flush()?;
    Ok(())
  }
}
