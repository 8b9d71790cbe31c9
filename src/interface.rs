use std::io::{self, Write};

use console::style;

pub struct Interface {
    quiet: u8,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Interface {
    pub fn new(quiet: u8) -> Self {
        Self::with_writers(quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// `quiet` 1 hides progress messages, 2 hides errors too. Write errors
    /// on either writer are ignored, as with `println!`.
    pub fn with_writers(quiet: u8, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self { quiet, out, err }
    }

    pub fn silent() -> Self {
        Self::with_writers(u8::MAX, Box::new(io::sink()), Box::new(io::sink()))
    }

    pub fn info<M: AsRef<str>>(&mut self, message: M) {
        if self.quiet < 1 {
            let _ = writeln!(self.out, "{}", message.as_ref());
        }
    }

    pub fn command<M: AsRef<str>>(&mut self, command: M) {
        if self.quiet < 1 {
            let _ = writeln!(self.out, "{} {}", style("$").dim(), style(command.as_ref()).cyan());
        }
    }

    pub fn success<M: AsRef<str>>(&mut self, message: M) {
        if self.quiet < 1 {
            let _ = writeln!(self.out, "{}", style(message.as_ref()).green().bold());
        }
    }

    pub fn error<M: AsRef<str>>(&mut self, message: M) {
        if self.quiet < 2 {
            let _ = writeln!(self.err, "{}", style(message.as_ref()).red());
        }
    }
}

impl Default for Interface {
    fn default() -> Self {
        Self::new(0)
    }
}
