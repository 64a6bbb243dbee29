//! Fixtures and helpers for quiz-core contract tests

#![allow(dead_code)]

use quiz_core::{CountryRecord, QuizEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// Reproducible RNG for generation tests
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Build one country record with a derived flag reference
pub fn country(
    name: &str,
    capital: &str,
    region: &str,
    population: u64,
    currency: &str,
    phone_code: &str,
) -> CountryRecord {
    CountryRecord {
        name: name.to_string(),
        capital: capital.to_string(),
        region: region.to_string(),
        population,
        currency: currency.to_string(),
        phone_code: phone_code.to_string(),
        flag: format!(
            "https://flags.example/{}.png",
            name.to_lowercase().replace(' ', "-")
        ),
    }
}

/// Fourteen countries across five regions, all attributes distinct
///
/// Rich enough for a full ten-question round: two regions (Europe, Asia)
/// have the four members a region question needs, and five distinct
/// regions feed the region option pool.
pub fn world() -> Vec<CountryRecord> {
    vec![
        country("Norway", "Oslo", "Europe", 5_421_241, "Norwegian krone", "+47"),
        country("Sweden", "Stockholm", "Europe", 10_353_442, "Swedish krona", "+46"),
        country("Finland", "Helsinki", "Europe", 5_530_719, "Euro", "+358"),
        country("Denmark", "Copenhagen", "Europe", 5_831_404, "Danish krone", "+45"),
        country("Japan", "Tokyo", "Asia", 125_800_000, "Japanese yen", "+81"),
        country("India", "New Delhi", "Asia", 1_380_004_385, "Indian rupee", "+91"),
        country("Thailand", "Bangkok", "Asia", 69_800_000, "Thai baht", "+66"),
        country("Vietnam", "Hanoi", "Asia", 97_338_579, "Vietnamese dong", "+84"),
        country("Brazil", "Brasília", "Americas", 212_559_417, "Brazilian real", "+55"),
        country("Peru", "Lima", "Americas", 32_971_854, "Peruvian sol", "+51"),
        country("Canada", "Ottawa", "Americas", 38_005_238, "Canadian dollar", "+1"),
        country("Kenya", "Nairobi", "Africa", 53_771_296, "Kenyan shilling", "+254"),
        country("Morocco", "Rabat", "Africa", 36_910_560, "Moroccan dirham", "+212"),
        country("New Zealand", "Wellington", "Oceania", 5_084_300, "New Zealand dollar", "+64"),
    ]
}

/// Receive the next engine event or fail the test
pub async fn recv_event(rx: &mut mpsc::Receiver<QuizEvent>) -> QuizEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for quiz event")
        .expect("event channel closed")
}

/// Assert that no event arrives within `wait`
pub async fn assert_silent(rx: &mut mpsc::Receiver<QuizEvent>, wait: Duration) {
    let outcome = timeout(wait, rx.recv()).await;
    assert!(
        outcome.is_err(),
        "expected no event, got {:?}",
        outcome.unwrap()
    );
}
