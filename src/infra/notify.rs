//! Terminal rendition of the host's modal message box.

use owo_colors::OwoColorize;

use crate::core::host::{Notice, Notifier};

/// Prints notices: info to stdout, warnings and errors to stderr
#[derive(Debug, Clone)]
pub struct TerminalNotifier
{
    quiet: bool,
    color: bool,
}

impl TerminalNotifier
{
    pub fn new(
        quiet: bool,
        color: bool,
    ) -> Self
    {
        Self { quiet, color }
    }

    /// Prefix plus message, colored when enabled
    pub fn render(
        &self,
        notice: &Notice,
    ) -> String
    {
        let (tag, msg) = match notice
        {
            Notice::Info(m) => ("ok", m),
            Notice::Warning(m) => ("warning", m),
            Notice::Error(m) => ("error", m),
        };

        if !self.color
        {
            return format!("{tag}: {msg}");
        }

        match notice
        {
            Notice::Info(_) => format!("{}: {msg}", tag.green()),
            Notice::Warning(_) => format!("{}: {msg}", tag.yellow()),
            Notice::Error(_) => format!("{}: {msg}", tag.red().bold()),
        }
    }
}

impl Notifier for TerminalNotifier
{
    fn notify(
        &mut self,
        notice: Notice,
    )
    {
        let line = self.render(&notice);
        match notice
        {
            Notice::Info(_) if self.quiet => {}
            Notice::Info(_) => println!("{line}"),
            Notice::Warning(_) | Notice::Error(_) => eprintln!("{line}"),
        }
    }
}
