// # quiz-core
//
// Core library for the GeoQuiz trivia engine.
//
// ## Architecture Overview
//
// This library turns a flat list of country records into playable quiz
// rounds:
// - **CountrySource**: Trait for supplying the country list
// - **QuestionGenerator**: Builds one batch of up to ten non-repeating
//   multiple-choice questions
// - **QuizSession**: Cursor + score state machine over a fixed batch
// - **QuizEngine**: Drives a round for a consumer via an event channel,
//   pacing the reveal of each next question
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Sourcing, generation, session state, and
//    orchestration are independent pieces
// 2. **Event-Driven**: Consumers subscribe to a channel; the engine never
//    calls back into UI code
// 3. **Injectable Randomness**: Every random choice flows through a
//    caller-provided RNG, so rounds are reproducible under test
// 4. **Library-First**: The terminal front end is one consumer among many

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod session;
pub mod source;
pub mod traits;

// Re-export core types for convenience
pub use config::QuizConfig;
pub use engine::{QuizEngine, QuizEvent};
pub use error::{Error, Result};
pub use generator::{Question, QuestionGenerator, QuestionType};
pub use session::QuizSession;
pub use source::StaticCountrySource;
pub use traits::{CountryRecord, CountrySource};
