use std::io;
use std::io::{BufRead, Write};

use log::debug;

use crate::puzzle_state::NUM_PEGS;

/// Where the interactive loop gets its next move from.  `Ok(None)` means no more moves will ever
/// arrive (for example stdin was closed).
pub trait MoveSource {
  fn next_move(&mut self) -> anyhow::Result<Option<(usize, usize)>>;
}

/// Ask for an integer in `min..=max` until one is given.  Returns `None` at end of input.
pub fn prompt_int<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    min: i64,
    max: i64) -> io::Result<Option<i64>> {
  let mut line = String::new();
  loop {
    write!(output, "{message} ({min} - {max}) ")?;
    output.flush()?;

    line.clear();
    if input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    match line.trim().parse::<i64>() {
      Ok(value) if (min..=max).contains(&value) => return Ok(Some(value)),
      Ok(value) => debug!("{value} is outside {min}..={max}"),
      Err(e) => debug!("Couldn't parse {:?}: {e}", line.trim()),
    }
  }
}

pub struct MovePrompt<R, W> {
  input: R,
  output: W,
}

impl<R: BufRead, W: Write> MovePrompt<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  fn prompt_peg(&mut self, message: &str) -> io::Result<Option<usize>> {
    let peg = prompt_int(&mut self.input, &mut self.output, message, 0, NUM_PEGS as i64 - 1)?;
    // Bounded to 0..NUM_PEGS, so the cast can't wrap.
    Ok(peg.map(|p| p as usize))
  }
}

impl MovePrompt<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> MoveSource for MovePrompt<R, W> {
  fn next_move(&mut self) -> anyhow::Result<Option<(usize, usize)>> {
    let from = match self.prompt_peg("\nMove disk FROM peg")? {
      Some(from) => from,
      None => return Ok(None),
    };
    let to = match self.prompt_peg("          TO   peg")? {
      Some(to) => to,
      None => return Ok(None),
    };
    Ok(Some((from, to)))
  }
}
