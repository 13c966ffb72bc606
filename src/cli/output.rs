//! Colored terminal output for the command line tool.
//!
//! Human-facing status lines go to stderr so that stdout carries nothing but
//! command results (the rendered script, the plan). Colors are used only when
//! stderr is a terminal.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes status messages honouring the verbose and quiet switches.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color: color_choice(io::stderr().is_terminal()),
        }
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.color)
    }

    fn status(&self, style: Option<(&str, ColorSpec)>, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_line(&mut self.stderr(), style, message)
    }

    /// Detail shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.status(Some(("  ", dimmed())), message)
    }

    /// Warning, suppressed by `--quiet`.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.status(Some(("warning: ", colored(Color::Yellow, true))), message)
    }

    /// Error line; always shown.
    pub fn error(&self, message: &str) -> io::Result<()> {
        write_line(
            &mut self.stderr(),
            Some(("error: ", colored(Color::Red, true))),
            message,
        )
    }

    /// Completion message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.status(Some(("✓ ", colored(Color::Green, true))), message)
    }

    /// Step in progress.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.status(Some(("→ ", colored(Color::Cyan, false))), message)
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stderr = self.stderr();
        writeln!(stderr)?;
        stderr.set_color(ColorSpec::new().set_bold(true))?;
        write!(stderr, "{title}")?;
        stderr.reset()?;
        writeln!(stderr)
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.status(Some(("    ", ColorSpec::new())), message)
    }

    /// Command result on stdout; never colored or suppressed.
    pub fn result(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// `Auto` on a terminal, `Never` when stderr is redirected.
fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn colored(color: Color, bold: bool) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(bold);
    spec
}

fn dimmed() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_dimmed(true);
    spec
}

/// Writes `prefix` in its color, then the message uncolored.
fn write_line<W: WriteColor>(
    out: &mut W,
    style: Option<(&str, ColorSpec)>,
    message: &str,
) -> io::Result<()> {
    if let Some((prefix, spec)) = style {
        out.set_color(&spec)?;
        write!(out, "{prefix}")?;
        out.reset()?;
    }
    writeln!(out, "{message}")
}
