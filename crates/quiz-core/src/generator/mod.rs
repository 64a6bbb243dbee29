//! Question generation
//!
//! One [`QuestionGenerator`] turns a snapshot of country records into a
//! batch of up to ten multiple-choice questions, each with four options and
//! one correct answer, and no two questions sharing a correct answer.
//!
//! ## Batch assembly
//!
//! 1. The ten question types are shuffled and attempted once each. A type
//!    whose preconditions fail (not enough usable data) is skipped without
//!    retry.
//! 2. If the batch is still short, a bounded fallback loop draws random
//!    types and keeps results whose correct answer has not been used yet.
//!    The loop gives up after [`MAX_FALLBACK_ATTEMPTS`] draws so small data
//!    sets degrade into a shorter round instead of spinning.
//!
//! All randomness flows through the caller's `RngCore`, so a seeded RNG
//! reproduces a batch exactly.

use std::collections::HashSet;

use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::traits::CountryRecord;

/// Options shown per question, correct answer included
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Incorrect options sampled per question
const DISTRACTOR_COUNT: usize = OPTIONS_PER_QUESTION - 1;

/// Hard cap on fallback draws when the first pass comes up short
pub const MAX_FALLBACK_ATTEMPTS: usize = 100;

/// The ten trivia templates a question can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// "Which country has this flag?" (flag image shown, pick the country)
    FlagToCountry,
    /// "Which flag belongs to X?" (options are flag references)
    CountryToFlag,
    /// "Which country has the capital X?"
    CapitalToCountry,
    /// "What is the capital of X?"
    CountryToCapital,
    /// "Which country is in the X region?"
    RegionToCountry,
    /// "Which region does X belong to?"
    CountryToRegion,
    /// "Which country has a population closest to N?"
    ClosestPopulation,
    /// "Which country has the largest population?"
    LargestPopulation,
    /// "Which currency does X use?"
    CountryToCurrency,
    /// "What is the phone code of X?"
    CountryToPhoneCode,
}

impl QuestionType {
    /// All variants, in declaration order
    pub const ALL: [QuestionType; 10] = [
        QuestionType::FlagToCountry,
        QuestionType::CountryToFlag,
        QuestionType::CapitalToCountry,
        QuestionType::CountryToCapital,
        QuestionType::RegionToCountry,
        QuestionType::CountryToRegion,
        QuestionType::ClosestPopulation,
        QuestionType::LargestPopulation,
        QuestionType::CountryToCurrency,
        QuestionType::CountryToPhoneCode,
    ];
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Template this question was built from
    pub question_type: QuestionType,

    /// Display text, e.g. "What is the capital of Norway?"
    pub text: String,

    /// The correct option, verbatim as it appears in `options`
    pub correct_answer: String,

    /// Exactly four pairwise-distinct options containing `correct_answer`
    pub options: Vec<String>,

    /// Flag image reference; populated only for [`QuestionType::FlagToCountry`]
    pub flag: Option<String>,
}

/// Builds one batch of questions from a country snapshot
///
/// A generator is created per round with an empty used-answer set and is
/// consumed by [`QuestionGenerator::generate_batch`]. The used-answer set
/// is what keeps correct answers unique within a batch: every accepted
/// question records its answer, and builders refuse values already taken.
pub struct QuestionGenerator<'a> {
    countries: &'a [CountryRecord],
    used_answers: HashSet<String>,
}

impl<'a> QuestionGenerator<'a> {
    /// Create a generator over a country snapshot
    pub fn new(countries: &'a [CountryRecord]) -> Self {
        Self {
            countries,
            used_answers: HashSet::new(),
        }
    }

    /// Produce up to `target` questions
    ///
    /// Returns fewer than `target` when the data set cannot support more
    /// distinct-answer questions; an empty slice yields an empty batch.
    /// Acceptance order is preserved: first-pass questions in shuffled type
    /// order, then fallback questions in draw order.
    pub fn generate_batch(mut self, target: usize, rng: &mut dyn RngCore) -> Vec<Question> {
        let mut questions = Vec::with_capacity(target);

        let mut types = QuestionType::ALL;
        types.shuffle(rng);

        for question_type in types {
            if questions.len() >= target {
                break;
            }
            match self.build_question(question_type, rng) {
                Some(question) => {
                    self.used_answers.insert(question.correct_answer.clone());
                    questions.push(question);
                }
                None => {
                    debug!(?question_type, "question type skipped, not enough data");
                }
            }
        }

        // Some types failed. Draw random types until the batch is full,
        // keeping only unused correct answers. Bounded so a sparse data
        // set cannot loop forever.
        let mut fallback_attempts = 0;
        while questions.len() < target && fallback_attempts < MAX_FALLBACK_ATTEMPTS {
            fallback_attempts += 1;
            if let Some(&question_type) = QuestionType::ALL.choose(rng)
                && let Some(question) = self.build_question(question_type, rng)
                && !self.used_answers.contains(&question.correct_answer)
            {
                self.used_answers.insert(question.correct_answer.clone());
                questions.push(question);
            }
        }

        if questions.len() < target {
            info!(
                generated = questions.len(),
                target, "data set too small for a full round"
            );
        }

        questions
    }

    /// Build a single question of one type
    ///
    /// Returns `None` when the data set cannot satisfy the type's
    /// preconditions (that is never an error). Exposed so consumers and
    /// targeted tests can exercise one template against a known data set;
    /// batch assembly goes through [`QuestionGenerator::generate_batch`].
    pub fn build_question(
        &self,
        question_type: QuestionType,
        rng: &mut dyn RngCore,
    ) -> Option<Question> {
        match question_type {
            QuestionType::FlagToCountry => self.flag_to_country(rng),
            QuestionType::CountryToFlag => self.country_to_flag(rng),
            QuestionType::CapitalToCountry => self.capital_to_country(rng),
            QuestionType::CountryToCapital => self.country_to_capital(rng),
            QuestionType::RegionToCountry => self.region_to_country(rng),
            QuestionType::CountryToRegion => self.country_to_region(rng),
            QuestionType::ClosestPopulation => self.closest_population(rng),
            QuestionType::LargestPopulation => self.largest_population(rng),
            QuestionType::CountryToCurrency => self.country_to_currency(rng),
            QuestionType::CountryToPhoneCode => self.country_to_phone_code(rng),
        }
    }

    fn flag_to_country(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !self.is_used(&c.name))?;
        let options = self.name_options(&country.name, rng)?;

        Some(Question {
            question_type: QuestionType::FlagToCountry,
            text: "Which country has this flag?".to_string(),
            correct_answer: country.name.clone(),
            options,
            flag: Some(country.flag.clone()),
        })
    }

    fn country_to_flag(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !self.is_used(&c.name))?;
        let pool = self.countries.iter().map(|c| c.flag.clone());
        let options = sample_options(&country.flag, pool, rng)?;

        Some(Question {
            question_type: QuestionType::CountryToFlag,
            text: format!("Which flag belongs to {}?", country.name),
            correct_answer: country.flag.clone(),
            options,
            flag: None,
        })
    }

    fn capital_to_country(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !c.capital.is_empty() && !self.is_used(&c.name))?;
        let options = self.name_options(&country.name, rng)?;

        Some(Question {
            question_type: QuestionType::CapitalToCountry,
            text: format!("Which country has the capital {}?", country.capital),
            correct_answer: country.name.clone(),
            options,
            flag: None,
        })
    }

    fn country_to_capital(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !c.capital.is_empty() && !self.is_used(&c.capital))?;
        let pool = self.countries.iter().map(|c| c.capital.clone());
        let options = sample_options(&country.capital, pool, rng)?;

        Some(Question {
            question_type: QuestionType::CountryToCapital,
            text: format!("What is the capital of {}?", country.name),
            correct_answer: country.capital.clone(),
            options,
            flag: None,
        })
    }

    /// Both the correct answer and the distractors come from one region,
    /// so the question has no giveaway odd-one-out.
    fn region_to_country(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let pivot = self.pick(rng, |c| !c.region.is_empty() && !self.is_used(&c.name))?;

        let group: Vec<&CountryRecord> = self
            .countries
            .iter()
            .filter(|c| c.region == pivot.region)
            .collect();
        if group.len() < OPTIONS_PER_QUESTION {
            return None;
        }

        let unused: Vec<&CountryRecord> = group
            .iter()
            .copied()
            .filter(|c| !self.is_used(&c.name))
            .collect();
        let correct = unused.choose(rng).copied()?;

        let pool = group.iter().map(|c| c.name.clone());
        let options = sample_options(&correct.name, pool, rng)?;

        Some(Question {
            question_type: QuestionType::RegionToCountry,
            text: format!("Which country is in the {} region?", pivot.region),
            correct_answer: correct.name.clone(),
            options,
            flag: None,
        })
    }

    fn country_to_region(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !c.region.is_empty() && !self.is_used(&c.region))?;
        let pool = self.countries.iter().map(|c| c.region.clone());
        let options = sample_options(&country.region, pool, rng)?;

        Some(Question {
            question_type: QuestionType::CountryToRegion,
            text: format!("Which region does {} belong to?", country.name),
            correct_answer: country.region.clone(),
            options,
            flag: None,
        })
    }

    /// Distractors are the three countries numerically nearest to the
    /// pivot's population. The sort is stable: ties keep original order.
    fn closest_population(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let pivot = self.pick(rng, |c| !self.is_used(&c.name))?;

        let mut ranked: Vec<&CountryRecord> = self.countries.iter().collect();
        ranked.sort_by_key(|c| c.population.abs_diff(pivot.population));

        let mut seen = HashSet::new();
        let nearest: Vec<String> = ranked
            .iter()
            .filter(|c| c.name != pivot.name)
            .filter(|c| seen.insert(c.name.clone()))
            .take(DISTRACTOR_COUNT)
            .map(|c| c.name.clone())
            .collect();
        if nearest.len() < DISTRACTOR_COUNT {
            return None;
        }

        let mut options = nearest;
        options.push(pivot.name.clone());
        options.shuffle(rng);

        Some(Question {
            question_type: QuestionType::ClosestPopulation,
            text: format!(
                "Which country has a population closest to {}?",
                format_population(pivot.population)
            ),
            correct_answer: pivot.name.clone(),
            options,
            flag: None,
        })
    }

    /// The correct answer is the country with the strictly highest
    /// population; on exact ties the earliest record wins. Options are the
    /// top four by population.
    fn largest_population(&self, rng: &mut dyn RngCore) -> Option<Question> {
        if self.countries.len() < OPTIONS_PER_QUESTION {
            return None;
        }

        let mut ranked: Vec<&CountryRecord> = self.countries.iter().collect();
        ranked.sort_by(|a, b| b.population.cmp(&a.population));

        let correct = ranked[0];
        if self.is_used(&correct.name) {
            return None;
        }

        let mut options: Vec<String> = ranked[..OPTIONS_PER_QUESTION]
            .iter()
            .map(|c| c.name.clone())
            .collect();
        options.shuffle(rng);

        Some(Question {
            question_type: QuestionType::LargestPopulation,
            text: "Which country has the largest population?".to_string(),
            correct_answer: correct.name.clone(),
            options,
            flag: None,
        })
    }

    fn country_to_currency(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country = self.pick(rng, |c| !c.currency.is_empty() && !self.is_used(&c.currency))?;
        let pool = self.countries.iter().map(|c| c.currency.clone());
        let options = sample_options(&country.currency, pool, rng)?;

        Some(Question {
            question_type: QuestionType::CountryToCurrency,
            text: format!("Which currency does {} use?", country.name),
            correct_answer: country.currency.clone(),
            options,
            flag: None,
        })
    }

    fn country_to_phone_code(&self, rng: &mut dyn RngCore) -> Option<Question> {
        let country =
            self.pick(rng, |c| !c.phone_code.is_empty() && !self.is_used(&c.phone_code))?;
        let pool = self.countries.iter().map(|c| c.phone_code.clone());
        let options = sample_options(&country.phone_code, pool, rng)?;

        Some(Question {
            question_type: QuestionType::CountryToPhoneCode,
            text: format!("What is the phone code of {}?", country.name),
            correct_answer: country.phone_code.clone(),
            options,
            flag: None,
        })
    }

    /// Uniformly pick a record matching `pred`
    fn pick(
        &self,
        rng: &mut dyn RngCore,
        pred: impl Fn(&CountryRecord) -> bool,
    ) -> Option<&'a CountryRecord> {
        let candidates: Vec<&CountryRecord> =
            self.countries.iter().filter(|c| pred(c)).collect();
        candidates.choose(rng).copied()
    }

    /// Option set whose distractors are other country names
    fn name_options(&self, correct: &str, rng: &mut dyn RngCore) -> Option<Vec<String>> {
        let pool = self.countries.iter().map(|c| c.name.clone());
        sample_options(correct, pool, rng)
    }

    fn is_used(&self, value: &str) -> bool {
        self.used_answers.contains(value)
    }
}

/// Sample three distractors from `pool` and mix in the correct answer
///
/// The pool is deduplicated by value and stripped of empty strings and of
/// the correct answer itself, so the four returned options are always
/// pairwise distinct. Returns `None` when fewer than three usable values
/// remain.
fn sample_options(
    correct: &str,
    pool: impl Iterator<Item = String>,
    rng: &mut dyn RngCore,
) -> Option<Vec<String>> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for value in pool {
        if value.is_empty() || value == correct {
            continue;
        }
        if seen.insert(value.clone()) {
            candidates.push(value);
        }
    }
    if candidates.len() < DISTRACTOR_COUNT {
        return None;
    }

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .cloned()
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    Some(options)
}

/// Group digits with commas, e.g. 5421241 -> "5,421,241"
fn format_population(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn population_formatting_groups_thousands() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1_000), "1,000");
        assert_eq!(format_population(5_421_241), "5,421,241");
        assert_eq!(format_population(1_402_112_000), "1,402,112,000");
    }

    #[test]
    fn all_types_are_distinct() {
        let unique: HashSet<_> = QuestionType::ALL.iter().collect();
        assert_eq!(unique.len(), QuestionType::ALL.len());
    }

    #[test]
    fn sampling_needs_three_usable_distractors() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let thin = vec!["a".to_string(), "b".to_string()];
        assert!(sample_options("x", thin.into_iter(), &mut rng).is_none());

        // Duplicates and empties don't count towards the three.
        let padded = vec![
            "a".to_string(),
            "a".to_string(),
            "".to_string(),
            "x".to_string(),
            "b".to_string(),
        ];
        assert!(sample_options("x", padded.into_iter(), &mut rng).is_none());
    }

    #[test]
    fn sampled_options_contain_correct_exactly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pool = ["a", "b", "c", "d", "e"].map(String::from);

        let options = sample_options("x", pool.into_iter(), &mut rng)
            .expect("pool is large enough");

        assert_eq!(options.len(), OPTIONS_PER_QUESTION);
        assert_eq!(options.iter().filter(|o| *o == "x").count(), 1);
        let unique: HashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), OPTIONS_PER_QUESTION);
    }
}
