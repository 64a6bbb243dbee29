//! Quiz session state machine
//!
//! A session is a cursor over a fixed question batch plus a running
//! correct-answer count. The only mutation path is [`QuizSession::submit`];
//! everything else is a read-only accessor. A session is never reused: the
//! engine replaces it wholesale on every restart.

use crate::generator::Question;

/// One playthrough's progress over a fixed question batch
///
/// Active while `cursor < questions.len()`, Finished once the cursor
/// reaches the end. A session built from an empty batch is Finished from
/// the start.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    cursor: usize,
    correct_count: usize,
}

impl QuizSession {
    /// Create a session over a question batch
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            cursor: 0,
            correct_count: 0,
        }
    }

    /// The question awaiting an answer, or `None` once Finished
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// Fraction of questions answered, 0.0 to 1.0
    ///
    /// An empty session reports 1.0: there is nothing left to answer.
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            return 1.0;
        }
        self.cursor as f32 / self.questions.len() as f32
    }

    /// Submit an answer for the current question
    ///
    /// Compares by exact string equality, bumps the correct count on a
    /// match, and always advances the cursor. Returns whether the answer
    /// was correct. Submitting to a Finished session is a no-op returning
    /// `false`.
    pub fn submit(&mut self, answer: &str) -> bool {
        let Some(question) = self.current() else {
            return false;
        };

        let is_correct = answer == question.correct_answer;
        if is_correct {
            self.correct_count += 1;
        }
        self.cursor += 1;
        is_correct
    }

    /// Whether every question has been answered
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Number of correctly answered questions so far
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Index of the current question (equals the answered count)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of questions in the batch
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::QuestionType;

    fn question(correct: &str) -> Question {
        Question {
            question_type: QuestionType::CapitalToCountry,
            text: format!("Which country has the capital {}?", correct),
            correct_answer: correct.to_string(),
            options: vec![
                correct.to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            flag: None,
        }
    }

    #[test]
    fn correct_answer_advances_both_counters() {
        let mut session = QuizSession::new(vec![question("Oslo"), question("Lima")]);

        assert!(session.submit("Oslo"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.correct_count(), 1);
        assert!(!session.is_finished());
    }

    #[test]
    fn wrong_answer_advances_only_the_cursor() {
        let mut session = QuizSession::new(vec![question("Oslo"), question("Lima")]);

        assert!(!session.submit("Bergen"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn progress_is_monotonic_and_reaches_one() {
        let mut session =
            QuizSession::new(vec![question("A"), question("B"), question("C"), question("D")]);

        let mut last = session.progress();
        assert_eq!(last, 0.0);

        while !session.is_finished() {
            session.submit("whatever");
            let p = session.progress();
            assert!(p >= last);
            last = p;
        }
        assert_eq!(last, 1.0);
        assert_eq!(session.cursor(), session.total());
    }

    #[test]
    fn empty_session_is_finished_with_full_progress() {
        let session = QuizSession::new(Vec::new());

        assert!(session.is_finished());
        assert_eq!(session.progress(), 1.0);
        assert!(session.current().is_none());
    }

    #[test]
    fn submit_after_finish_is_a_noop() {
        let mut session = QuizSession::new(vec![question("Oslo")]);
        assert!(session.submit("Oslo"));
        assert!(session.is_finished());

        assert!(!session.submit("Oslo"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.correct_count(), 1);
    }
}
