//! # battm-adapter-console
//!
//! Line-oriented settings surface for the terminal.
//!
//! Shows the battery level published by the [`BatteryGauge`](battm_app::gauge::BatteryGauge),
//! the active bounds, and the last validation error; `set <min> <max>`
//! writes through the [`BoundsStore`]. Invalid input is reported and
//! remembered until the next successful `set`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `battm-app` and `battm-domain`.

mod command;

pub use command::Command;

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};
use tokio::sync::watch;

use battm_app::bounds_store::{BoundsStore, SaveStatus};
use battm_app::gauge::format_level;
use battm_app::ports::SettingsRepository;
use battm_domain::bounds::BoundsCandidate;
use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

const HELP: &str = "\
commands:
  status            show battery level and charge bounds
  set <min> <max>   change the charge bounds (0 <= min < max <= 100)
  help              show this help
  quit              stop the battery monitor";

/// Why the console stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The user asked to terminate the daemon.
    Quit,
    /// Input reached end-of-file.
    Closed,
}

/// Terminal settings surface.
pub struct Console<R> {
    store: Arc<BoundsStore<R>>,
    gauge: watch::Receiver<Option<Sample>>,
    last_error: Option<String>,
}

impl<R: SettingsRepository + Send + Sync> Console<R> {
    pub fn new(store: Arc<BoundsStore<R>>, gauge: watch::Receiver<Option<Sample>>) -> Self {
        Self {
            store,
            gauge,
            last_error: None,
        }
    }

    /// The validation error currently shown to the user, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Read commands from `input` until `quit` or end-of-file, writing
    /// replies to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` or writing `output` fails.
    pub async fn run<I, O>(&mut self, input: I, mut output: O) -> io::Result<ConsoleExit>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        write_block(&mut output, &self.status()).await?;
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;
            let Some(line) = lines.next_line().await? else {
                tracing::debug!("console input closed");
                return Ok(ConsoleExit::Closed);
            };
            let command = Command::parse(&line);
            if command == Command::Quit {
                tracing::info!("quit requested from console");
                return Ok(ConsoleExit::Quit);
            }
            let reply = self.execute(command).await;
            write_block(&mut output, &reply).await?;
        }
    }

    /// Execute one command and return the text to show.
    pub async fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Status => self.status(),
            Command::Set { min, max } => self.set(&min, &max).await,
            Command::Help => HELP.to_string(),
            Command::Quit | Command::Empty => String::new(),
            Command::Invalid(hint) => hint,
        }
    }

    async fn set(&mut self, min: &str, max: &str) -> String {
        let result = match BoundsCandidate::parse(min, max) {
            Ok(candidate) => self.store.set(candidate).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(status) => {
                self.last_error = None;
                let bounds = self.store.get();
                match status {
                    SaveStatus::Persisted => format!(
                        "Settings saved. Max charge: {}%, Min charge: {}%",
                        bounds.max_charge(),
                        bounds.min_charge()
                    ),
                    SaveStatus::NotPersisted(err) => format!(
                        "warning: settings applied (max {}%, min {}%) but not saved: {}",
                        bounds.max_charge(),
                        bounds.min_charge(),
                        describe(&err)
                    ),
                }
            }
            Err(err) => {
                let message = format!("Invalid settings: {err}.");
                self.last_error = Some(message.clone());
                message
            }
        }
    }

    fn status(&self) -> String {
        let sample = *self.gauge.borrow();
        let bounds = self.store.get();
        let mut text = format_level(sample);
        if let Some(sample) = sample {
            text.push_str(if sample.power_plugged() {
                " (plugged in)"
            } else {
                " (on battery)"
            });
        }
        text.push_str(&format!(
            "\nMax charge: {}%\nMin charge: {}%",
            bounds.max_charge(),
            bounds.min_charge()
        ));
        if let Some(err) = &self.last_error {
            text.push_str("\nError: ");
            text.push_str(err);
        }
        text
    }
}

/// The error followed by its underlying cause, if any.
fn describe(err: &BattmError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

async fn write_block<O: AsyncWrite + Unpin>(output: &mut O, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}
