// # Country Source Trait
//
// Defines the interface for supplying country records to the quiz engine.
//
// ## Implementations
//
// - Static (in-memory): `quiz_core::source::StaticCountrySource`
// - JSON file: `quiz-source-json` crate
// - Future: HTTP-backed REST Countries client, embedded data set
//
// ## Usage
//
// ```rust,ignore
// use quiz_core::CountrySource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* CountrySource implementation */;
//
//     let countries = source.load().await?;
//     println!("loaded {} countries", countries.len());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One country's display and trivia-relevant facts
///
/// Identity is by `name` as far as question logic is concerned; no separate
/// identifier exists. Fields the data set does not know are carried as the
/// empty string so that per-type generation preconditions can filter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Common country name, e.g. "Norway"
    pub name: String,

    /// Capital city; empty when unknown
    #[serde(default)]
    pub capital: String,

    /// Geographic region, e.g. "Europe"; empty when unknown
    #[serde(default)]
    pub region: String,

    /// Resident count
    pub population: u64,

    /// Currency display name; empty when unknown
    #[serde(default)]
    pub currency: String,

    /// International dialing code, e.g. "+47"; empty when unknown
    #[serde(default)]
    pub phone_code: String,

    /// Flag image reference (opaque URI)
    pub flag: String,
}

/// Trait for country source implementations
///
/// A source hands the engine a ready, ordered list of records. Sources own
/// all I/O concerns (files, caches, network); the engine never reaches past
/// this boundary. Implementations must be thread-safe and usable across
/// async tasks.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Load the full country list
    ///
    /// The returned order is preserved by the engine and is observable in
    /// tie-breaking (population comparisons keep the original order on
    /// exact ties).
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<CountryRecord>)`: the records, possibly empty
    /// - `Err(Error)`: if the backing data could not be read or decoded
    async fn load(&self) -> Result<Vec<CountryRecord>, crate::Error>;

    /// Short identifier for logging, e.g. "static" or "json-file"
    fn source_name(&self) -> &'static str;
}
