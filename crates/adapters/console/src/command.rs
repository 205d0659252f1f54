//! Console command parsing.

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show battery level, active bounds and the last error.
    Status,
    /// Replace both bounds. Values stay as typed; validation happens in
    /// the bounds store.
    Set {
        min: String,
        max: String,
    },
    Help,
    /// Terminate the daemon.
    Quit,
    /// Blank line.
    Empty,
    /// Anything else, with a hint for the user.
    Invalid(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Self::Empty;
        };
        let args: Vec<&str> = words.collect();
        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("status" | "show", []) => Self::Status,
            ("set", [min, max]) => Self::Set {
                min: (*min).to_string(),
                max: (*max).to_string(),
            },
            ("set", _) => Self::Invalid("usage: set <min> <max>".to_string()),
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (other, _) => Self::Invalid(format!("unknown command `{other}`, try `help`")),
        }
    }
}
