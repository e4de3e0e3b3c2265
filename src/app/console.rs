use std::fmt::Display;
use std::io::Write;

use crossterm::style::{Color, Stylize};

use crate::error::AppResult;
use crate::system::banner::{rule, write_banner};

/// Inline status markers used in report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Fail,
    Warn,
    Unknown,
}

impl Marker {
    const fn symbol(self) -> &'static str {
        match self {
            Marker::Ok => "✓",
            Marker::Fail => "✗",
            Marker::Warn => "⚠",
            Marker::Unknown => "?",
        }
    }

    const fn color(self) -> Color {
        match self {
            Marker::Ok => Color::Green,
            Marker::Fail => Color::Red,
            Marker::Warn => Color::Yellow,
            Marker::Unknown => Color::Grey,
        }
    }
}

/// Human-readable report sink.
pub struct Console<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> Console<W> {
    pub const fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one line.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn line(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn blank(&mut self) -> AppResult<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Top-level banner, shaded when color is on.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn banner(&mut self, title: &str) -> AppResult<()> {
        write_banner(&mut self.out, title, self.use_color)?;
        Ok(())
    }

    /// Section header preceded by an empty line and followed by one.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn header(&mut self, title: &str) -> AppResult<()> {
        self.blank()?;
        let title = if self.use_color {
            title.bold().to_string()
        } else {
            title.to_owned()
        };
        writeln!(self.out, "{}\n  {}\n{}\n", rule(), title, rule())?;
        Ok(())
    }

    #[must_use]
    pub fn mark(&self, marker: Marker) -> String {
        if self.use_color {
            marker.symbol().with(marker.color()).to_string()
        } else {
            marker.symbol().to_owned()
        }
    }

    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn flush(&mut self) -> AppResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
