//! Raw command builder

/// A store command the uniform cache surface does not expose
///
/// Built by name plus positional arguments and forwarded verbatim by
/// `raw_operate`:
///
/// ```
/// use kvc_domain::RawCommand;
///
/// let cmd = RawCommand::new("SETNX").arg("lock:job-7").arg("worker-2");
/// assert_eq!(cmd.name(), "SETNX");
/// assert_eq!(cmd.args().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    name: String,
    args: Vec<Vec<u8>>,
}

impl RawCommand {
    /// Start a command with the given name (e.g. `"SETNX"`)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append a string or binary argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<[u8]>) -> Self {
        self.args.push(arg.as_ref().to_vec());
        self
    }

    /// Append an integer argument
    #[must_use]
    pub fn arg_int(self, arg: i64) -> Self {
        self.arg(arg.to_string())
    }

    /// Command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments
    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }

    /// A command needs a non-blank name
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
