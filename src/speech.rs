//! Read-aloud support.
//!
//! Speech is delegated to a host program (`say`, `espeak`, ...). Every request
//! runs on its own background task, and one lock around the engine call keeps
//! overlapping requests from playing at the same time.

use crate::config::SpeechConfig;
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("failed to start speech program {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("speech program {program:?} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Blocking say-and-wait call into a speech backend.
pub trait SpeechEngine: Send + Sync {
    fn say(&self, text: &str) -> Result<(), SpeechError>;
}

/// Speaks through a host program, passing the text as the last argument
/// after a `--` separator.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    /// `--` ends option parsing so text like "- Markets fell" is spoken, not parsed.
    fn command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg("--").arg(text);
        command
    }
}

impl SpeechEngine for CommandEngine {
    fn say(&self, text: &str) -> Result<(), SpeechError> {
        let status = self
            .command(text)
            .status()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Serialises speech requests onto a single engine.
#[derive(Clone)]
pub struct Speaker {
    engine: Arc<dyn SpeechEngine>,
    speak_lock: Arc<AsyncMutex<()>>,
}

impl Speaker {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            speak_lock: Arc::new(AsyncMutex::new(())),
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(Arc::new(CommandEngine::new(config)))
    }

    /// Schedule `text` to be spoken and return immediately.
    ///
    /// The task waits for any earlier request to finish before it starts.
    /// Errors are logged; there is no cancellation and no timeout.
    pub fn speak(&self, text: String) -> JoinHandle<()> {
        let engine = self.engine.clone();
        let lock = self.speak_lock.clone();

        tokio::spawn(async move {
            let _guard = lock.lock().await;
            tracing::info!("reading aloud ({} chars)", text.len());

            let result = tokio::task::spawn_blocking(move || engine.say(&text)).await;
            match result {
                Ok(Ok(())) => tracing::debug!("read aloud finished"),
                Ok(Err(e)) => tracing::warn!("read aloud failed: {e}"),
                Err(e) => tracing::warn!("read aloud task panicked: {e}"),
            }
        })
    }
}
