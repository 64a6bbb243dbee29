//! Quiz engine
//!
//! The QuizEngine drives one play session for a consumer:
//! - generates a fresh question batch on every start
//! - owns the current [`QuizSession`] exclusively
//! - emits question/feedback/completion events over a bounded channel
//! - paces the reveal of the next question after feedback
//!
//! ## Event flow
//!
//! ```text
//! start()          ──► Question(1)
//! choose(option)   ──► Feedback(1) ─┐
//!                                   │ reveal delay
//! (timer fires)    ──► Question(2) ◄┘
//! ...
//! choose(option)   ──► Feedback(n) ──► Finished(score, total)
//! ```
//!
//! For one session, `Question(k)` always precedes `Feedback(k)`, which
//! always precedes `Question(k+1)` or `Finished`. All events travel through
//! a single channel, so the consumer observes them in emission order.
//!
//! ## Pacing and restarts
//!
//! The pause between feedback and the next question is the engine's only
//! asynchronous element, implemented as a one-shot spawned task. Each
//! session carries a generation number; the task re-checks it after
//! sleeping and drops its event when a restart has moved the engine on.
//! While a reveal is pending, further `choose()` calls are ignored, so
//! double-taps cannot corrupt the score.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::RngCore;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::QuizConfig;
use crate::error::Result;
use crate::generator::{Question, QuestionGenerator};
use crate::session::QuizSession;
use crate::traits::CountryRecord;

/// Events emitted by the QuizEngine
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    /// A new question is ready to be shown
    Question {
        question: Question,
        /// Fraction of the round already answered, 0.0 to 1.0
        progress: f32,
    },

    /// Immediate verdict for a submitted answer
    Feedback {
        is_correct: bool,
        chosen: String,
        /// The correct option of the question that was just answered
        correct_answer: String,
    },

    /// The round is over
    Finished { score: usize, total: usize },
}

/// Reveal bookkeeping shared with the pacing task
struct PacingState {
    /// Bumped on every `start()`; stale reveal tasks compare against it
    generation: u64,
    /// True between feedback and the paced question that follows it
    reveal_pending: bool,
}

/// Drives quiz rounds over a fixed country snapshot
///
/// ## Lifecycle
///
/// 1. Create with [`QuizEngine::new()`] and hand the receiver to the consumer
/// 2. Call [`QuizEngine::start()`] for a fresh round (any number of times)
/// 3. Call [`QuizEngine::choose()`] once per shown question
///
/// The engine owns its session exclusively; consumers observe it only
/// through events and the read-only accessors.
pub struct QuizEngine {
    /// Country snapshot the generator draws from
    countries: Vec<CountryRecord>,

    /// Engine settings (question count, reveal delay, channel capacity)
    config: QuizConfig,

    /// Injected randomness; a seeded RNG makes rounds reproducible
    rng: Box<dyn RngCore + Send>,

    /// The round in progress
    session: QuizSession,

    /// Shared with spawned reveal tasks
    pacing: Arc<Mutex<PacingState>>,

    /// Event sender towards the consumer
    event_tx: mpsc::Sender<QuizEvent>,
}

impl QuizEngine {
    /// Create a new quiz engine
    ///
    /// # Parameters
    ///
    /// - `countries`: the records questions are built from (order matters
    ///   for population tie-breaking)
    /// - `config`: engine settings, validated here
    /// - `rng`: random source for type order, picks, and option shuffles
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields quiz
    /// events. No round runs until [`QuizEngine::start()`] is called.
    pub fn new(
        countries: Vec<CountryRecord>,
        config: QuizConfig,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<(Self, mpsc::Receiver<QuizEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let engine = Self {
            countries,
            config,
            rng,
            session: QuizSession::default(),
            pacing: Arc::new(Mutex::new(PacingState {
                generation: 0,
                reveal_pending: false,
            })),
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Start a fresh round
    ///
    /// Generates a new batch, replaces the session, and emits the first
    /// `Question`, or `Finished { 0, 0 }` when the data set cannot supply
    /// a single question. Restarting invalidates any reveal still pending
    /// from the previous round.
    pub fn start(&mut self) {
        {
            let mut pacing = self.pacing.lock().unwrap();
            pacing.generation += 1;
            pacing.reveal_pending = false;
        }

        let batch = QuestionGenerator::new(&self.countries)
            .generate_batch(self.config.question_count, self.rng.as_mut());
        info!(questions = batch.len(), "starting quiz round");
        self.session = QuizSession::new(batch);

        match self.session.current() {
            Some(question) => {
                let event = QuizEvent::Question {
                    question: question.clone(),
                    progress: self.session.progress(),
                };
                self.emit_event(event);
            }
            None => {
                self.emit_event(QuizEvent::Finished { score: 0, total: 0 });
            }
        }
    }

    /// Submit the option the player chose for the current question
    ///
    /// Emits `Feedback` immediately, then either `Finished` (synchronously)
    /// or, after the reveal delay, the next `Question`. Calls are ignored
    /// with a warning while a reveal is pending or once the round is over.
    pub fn choose(&mut self, option: &str) {
        let mut pacing = self.pacing.lock().unwrap();
        if pacing.reveal_pending {
            warn!("answer ignored, next question reveal is already pending");
            return;
        }

        let Some(question) = self.session.current() else {
            warn!("answer ignored, round is already finished");
            return;
        };
        // Captured before submit advances the cursor.
        let correct_answer = question.correct_answer.clone();

        let is_correct = self.session.submit(option);
        self.emit_event(QuizEvent::Feedback {
            is_correct,
            chosen: option.to_string(),
            correct_answer,
        });

        if self.session.is_finished() {
            self.emit_event(QuizEvent::Finished {
                score: self.session.correct_count(),
                total: self.session.total(),
            });
            return;
        }

        let Some(next) = self.session.current() else {
            return;
        };
        let event = QuizEvent::Question {
            question: next.clone(),
            progress: self.session.progress(),
        };

        pacing.reveal_pending = true;
        let generation = pacing.generation;
        drop(pacing);

        let tx = self.event_tx.clone();
        let shared = Arc::clone(&self.pacing);
        let delay = Duration::from_millis(self.config.reveal_delay_ms);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut pacing = shared.lock().unwrap();
            if pacing.generation != generation {
                debug!("dropping stale question reveal from a previous round");
                return;
            }
            pacing.reveal_pending = false;

            if tx.try_send(event).is_err() {
                warn!("event channel full, dropping question event");
            }
        });
    }

    /// Index of the question currently shown (equals the answered count)
    pub fn current_question_index(&self) -> usize {
        self.session.cursor()
    }

    /// Number of questions in the current round
    pub fn total_questions(&self) -> usize {
        self.session.total()
    }

    /// Correct answers so far in the current round
    pub fn score(&self) -> usize {
        self.session.correct_count()
    }

    /// Emit an engine event
    fn emit_event(&self, event: QuizEvent) {
        // A full channel means the consumer stopped draining; dropping is
        // preferable to blocking the play flow.
        if self.event_tx.try_send(event).is_err() {
            warn!("event channel full, dropping event");
        }
    }
}
