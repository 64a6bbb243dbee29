//! Configuration types for the quiz engine
//!
//! This module defines the tunable knobs of the engine. The defaults match
//! the shipped product behavior: ten questions per round, a half-second
//! pause between feedback and the next question.

use serde::{Deserialize, Serialize};

/// Default number of questions per round
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Default pause between feedback and the next question, in milliseconds
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 500;

/// Default capacity of the engine's event channel
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 32;

/// Quiz engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Number of questions to aim for in one round (1..=10)
    #[serde(default = "default_question_count")]
    pub question_count: usize,

    /// Pause between answer feedback and the next question, in milliseconds
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Capacity of the bounded event channel handed to the consumer
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

fn default_reveal_delay_ms() -> u64 {
    DEFAULT_REVEAL_DELAY_MS
}

fn default_event_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}

impl QuizConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }

    /// Validate the configuration
    ///
    /// The question count is capped at ten: there are ten question types
    /// and a round never repeats a correct answer, so larger rounds cannot
    /// be filled reliably.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.question_count == 0 || self.question_count > DEFAULT_QUESTION_COUNT {
            return Err(crate::Error::config(format!(
                "question_count must be between 1 and {}, got {}",
                DEFAULT_QUESTION_COUNT, self.question_count
            )));
        }

        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config(
                "event_channel_capacity must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new()
    }
}
