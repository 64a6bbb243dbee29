// # JSON File Country Source
//
// This crate provides a file-backed country source for the GeoQuiz engine.
//
// ## Purpose
//
// Decodes a REST-Countries-shaped JSON document (an array of country
// objects) from disk into `CountryRecord`s. Intended for:
// - The terminal front end, playing from a bundled data dump
// - Offline development and CI, where no fetch layer exists
//
// ## Document shape
//
// Each array element follows the public REST Countries v3 schema; only the
// fields below are read, everything else is ignored:
//
// ```json
// {
//   "name": { "common": "Norway" },
//   "capital": ["Oslo"],
//   "region": "Europe",
//   "population": 5421241,
//   "currencies": { "NOK": { "name": "Norwegian krone" } },
//   "idd": { "root": "+4", "suffixes": ["7"] },
//   "flags": { "png": "https://flagcdn.com/w320/no.png" }
// }
// ```
//
// Missing capital, region, currency, or dialing information maps to the
// empty string, so the generator's non-empty preconditions filter those
// countries out of the affected question types. Entries without a common
// name are dropped entirely.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use quiz_core::{CountryRecord, CountrySource, Error, Result};

/// Country source reading a REST-Countries-shaped JSON file
///
/// The file is re-read on every `load()`, so an updated dump is picked up
/// by the next quiz round without restarting.
///
/// A document with zero usable entries is reported as an error rather than
/// an empty country list: a file source with nothing in it is a wrong path
/// or a broken dump, and a silent 0/0 round would mask that.
pub struct JsonFileSource {
    /// Path to the JSON document
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for the document at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CountrySource for JsonFileSource {
    async fn load(&self) -> Result<Vec<CountryRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let dtos: Vec<CountryDto> = serde_json::from_slice(&bytes)?;

        let total = dtos.len();
        let records: Vec<CountryRecord> = dtos
            .into_iter()
            .filter_map(CountryDto::into_record)
            .collect();

        if records.len() < total {
            debug!(
                dropped = total - records.len(),
                "dropped entries without a common name"
            );
        }
        info!(
            countries = records.len(),
            path = %self.path.display(),
            "loaded country data"
        );

        if records.is_empty() {
            return Err(Error::source(format!(
                "no usable country entries in {}",
                self.path.display()
            )));
        }

        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}

/// Wire shape of one REST-Countries entry (fields we read)
#[derive(Debug, Deserialize)]
struct CountryDto {
    name: NameDto,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: String,
    #[serde(default)]
    population: u64,
    /// Keyed by currency code; a BTreeMap keeps "first currency" stable
    #[serde(default)]
    currencies: BTreeMap<String, CurrencyDto>,
    #[serde(default)]
    idd: IddDto,
    flags: FlagsDto,
}

#[derive(Debug, Deserialize)]
struct NameDto {
    #[serde(default)]
    common: String,
}

#[derive(Debug, Deserialize)]
struct CurrencyDto {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct IddDto {
    #[serde(default)]
    root: String,
    #[serde(default)]
    suffixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FlagsDto {
    #[serde(default)]
    png: String,
}

impl CountryDto {
    /// Flatten the wire shape into a `CountryRecord`
    ///
    /// Returns `None` for entries without a common name. Unknown optional
    /// fields become empty strings.
    fn into_record(self) -> Option<CountryRecord> {
        if self.name.common.is_empty() {
            return None;
        }

        let capital = self.capital.into_iter().next().unwrap_or_default();
        let currency = self
            .currencies
            .into_values()
            .next()
            .map(|c| c.name)
            .unwrap_or_default();

        // A dialing code needs at least a root; a lone root (large
        // countries like the US have no suffix list) is kept as-is.
        let phone_code = if self.idd.root.is_empty() {
            String::new()
        } else {
            match self.idd.suffixes.first() {
                Some(suffix) => format!("{}{}", self.idd.root, suffix),
                None => self.idd.root,
            }
        };

        Some(CountryRecord {
            name: self.name.common,
            capital,
            region: self.region,
            population: self.population,
            currency,
            phone_code,
            flag: self.flags.png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dto(value: serde_json::Value) -> CountryDto {
        serde_json::from_value(value).expect("valid test document")
    }

    #[test]
    fn full_entry_maps_every_field() {
        let record = dto(serde_json::json!({
            "name": { "common": "Norway" },
            "capital": ["Oslo"],
            "region": "Europe",
            "population": 5421241u64,
            "currencies": { "NOK": { "name": "Norwegian krone" } },
            "idd": { "root": "+4", "suffixes": ["7"] },
            "flags": { "png": "https://flagcdn.com/w320/no.png" }
        }))
        .into_record()
        .expect("named entry maps");

        assert_eq!(record.name, "Norway");
        assert_eq!(record.capital, "Oslo");
        assert_eq!(record.region, "Europe");
        assert_eq!(record.population, 5_421_241);
        assert_eq!(record.currency, "Norwegian krone");
        assert_eq!(record.phone_code, "+47");
        assert_eq!(record.flag, "https://flagcdn.com/w320/no.png");
    }

    #[test]
    fn missing_optionals_become_empty_strings() {
        let record = dto(serde_json::json!({
            "name": { "common": "Atlantis" },
            "population": 0u64,
            "flags": { "png": "https://flagcdn.com/w320/at.png" }
        }))
        .into_record()
        .expect("named entry maps");

        assert_eq!(record.capital, "");
        assert_eq!(record.region, "");
        assert_eq!(record.currency, "");
        assert_eq!(record.phone_code, "");
    }

    #[test]
    fn idd_root_without_suffixes_is_kept() {
        let record = dto(serde_json::json!({
            "name": { "common": "United States" },
            "population": 329484123u64,
            "idd": { "root": "+1" },
            "flags": { "png": "https://flagcdn.com/w320/us.png" }
        }))
        .into_record()
        .expect("named entry maps");

        assert_eq!(record.phone_code, "+1");
    }

    #[test]
    fn unnamed_entries_are_dropped() {
        let entry = dto(serde_json::json!({
            "name": { "common": "" },
            "population": 1u64,
            "flags": { "png": "x" }
        }));
        assert!(entry.into_record().is_none());
    }

    #[tokio::test]
    async fn loads_an_array_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{
                    "name": {{ "common": "Norway" }},
                    "capital": ["Oslo"],
                    "region": "Europe",
                    "population": 5421241,
                    "currencies": {{ "NOK": {{ "name": "Norwegian krone" }} }},
                    "idd": {{ "root": "+4", "suffixes": ["7"] }},
                    "flags": {{ "png": "https://flagcdn.com/w320/no.png" }}
                }},
                {{
                    "name": {{ "common": "" }},
                    "population": 1,
                    "flags": {{ "png": "x" }}
                }}
            ]"#
        )
        .expect("write test document");

        let source = JsonFileSource::new(file.path());
        let records = source.load().await.expect("document loads");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Norway");
        assert_eq!(source.source_name(), "json-file");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = JsonFileSource::new("/nonexistent/countries.json");
        assert!(source.load().await.is_err());
    }

    #[tokio::test]
    async fn malformed_document_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not an array").expect("write test document");

        let source = JsonFileSource::new(file.path());
        assert!(source.load().await.is_err());
    }
}
