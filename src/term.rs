use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

/// Raw mode and the alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, including on panic.
pub struct TermGuard<W: Write> {
    out: W,
}

impl<W: Write> TermGuard<W> {
    pub fn new(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on an early return still restores through Drop.
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TermGuard<W> {
    fn drop(&mut self) {
        let _ = restore(&mut self.out);
    }
}

/// Runs every restore step even when an earlier one fails; reports the first error.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let steps = [
        out.execute(Show).map(|_| ()),
        out.execute(LeaveAlternateScreen).map(|_| ()),
        terminal::disable_raw_mode(),
    ];
    steps.into_iter().collect()
}
