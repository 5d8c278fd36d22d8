#![allow(dead_code)]

use async_trait::async_trait;
use newsbrief::agent::{AgentError, Completion};
use newsbrief::speech::{SpeechEngine, SpeechError};
use std::sync::Mutex;

/// Completion backend that returns a fixed reply and records every prompt.
pub struct ScriptedCompletion {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Completion for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(AgentError::RequestFailed)
    }
}

/// Speech engine that only remembers what it was asked to say.
#[derive(Default)]
pub struct SilentEngine {
    pub spoken: Mutex<Vec<String>>,
}

impl SpeechEngine for SilentEngine {
    fn say(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
