//! Host collaborators other than the sequence provider: the user
//! notification channel and the CSV file chooser.

use serde::Serialize;

/// One user-facing message. The only feedback channel an operation has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice
{
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice
{
    pub fn message(&self) -> &str
    {
        match self
        {
            Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Blocking message sink (a modal dialog in a real host)
pub trait Notifier
{
    fn notify(
        &mut self,
        notice: Notice,
    );
}

/// Collects notices in memory; used by tests and by `--json` output
#[derive(Debug, Default)]
pub struct MemoryNotifier
{
    pub notices: Vec<Notice>,
}

impl Notifier for MemoryNotifier
{
    fn notify(
        &mut self,
        notice: Notice,
    )
    {
        self.notices
            .push(notice);
    }
}

/// "Open file" dialog restricted to CSV documents.
///
/// `Ok(None)` means the user cancelled.
pub trait CsvSource
{
    fn open_csv(&mut self) -> std::io::Result<Option<String>>;
}

/// In-memory CSV text; `None` behaves like a cancelled dialog
impl CsvSource for Option<String>
{
    fn open_csv(&mut self) -> std::io::Result<Option<String>>
    {
        Ok(self.take())
    }
}
