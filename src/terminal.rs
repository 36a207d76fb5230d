//! Styled terminal output using crossterm

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
    terminal,
    tty::IsTty,
};
use unicode_width::UnicodeWidthChar;

use codelight::syntax::{flatten, Color, Span, StyleId};
use codelight::{LineState, Result};

/// Writes highlighted lines to stdout
pub struct Terminal {
    out: Stdout,
    /// Maximum display columns per line (None = no limit)
    width: Option<usize>,
}

impl Terminal {
    /// Create a terminal writer
    ///
    /// Without an explicit width, lines are cut at the terminal width when
    /// stdout is a terminal and left alone otherwise.
    pub fn new(width: Option<usize>) -> Result<Self> {
        let out = io::stdout();
        let width = match width {
            Some(width) => Some(width),
            None if out.is_tty() => Some(usize::from(terminal::size()?.0)),
            None => None,
        };
        Ok(Self { out, width })
    }

    /// Write a plain line
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text), Print("\n"))?;
        Ok(())
    }

    /// Paint a line, applying spans in order so later spans win
    pub fn paint_line(&mut self, line: &str, spans: &[Span]) -> Result<()> {
        let styles = flatten(line, spans);
        let max_width = self.width.unwrap_or(usize::MAX);
        let mut width = 0;
        let mut run = String::new();
        let mut run_style = None;

        for (pos, ch) in line.char_indices() {
            let ch_width = ch.width().unwrap_or(1);
            if width + ch_width > max_width {
                break;
            }
            width += ch_width;

            if styles[pos] != run_style && !run.is_empty() {
                self.write_run(&run, run_style)?;
                run.clear();
            }
            run_style = styles[pos];
            run.push(ch);
        }
        if !run.is_empty() {
            self.write_run(&run, run_style)?;
        }

        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    /// Print the spans of a line instead of painting them
    pub fn dump_line(
        &mut self,
        number: usize,
        line: &str,
        spans: &[Span],
        end_state: LineState,
    ) -> Result<()> {
        let state = if end_state.is_in_comment() { "comment" } else { "code" };
        queue!(self.out, Print(format!("{:>4} [{}] {:?}\n", number, state, line)))?;
        for span in spans {
            queue!(
                self.out,
                Print(format!(
                    "       {:<9} {:>3}..{:<3} {:?}\n",
                    span.style.name(),
                    span.start,
                    span.end,
                    span.text(line)
                ))
            )?;
        }
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn write_run(&mut self, text: &str, style: Option<StyleId>) -> Result<()> {
        let style = style.map(|id| id.default_style()).unwrap_or_default();
        if style.is_default() {
            queue!(self.out, Print(text))?;
            return Ok(());
        }

        queue!(self.out, SetForegroundColor(to_crossterm(style.fg)))?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Map a palette color onto crossterm's
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}
