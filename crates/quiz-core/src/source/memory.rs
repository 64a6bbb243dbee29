// # Static Country Source
//
// In-memory implementation of CountrySource.
//
// ## Purpose
//
// Serves a fixed list of records straight from memory. Useful for tests,
// demos, and embedding a bundled data set without touching the filesystem.

use async_trait::async_trait;

use crate::traits::{CountryRecord, CountrySource};

/// In-memory country source
///
/// `load()` clones the wrapped list; the stored order is preserved.
///
/// # Example
///
/// ```rust,ignore
/// use quiz_core::source::StaticCountrySource;
/// use quiz_core::CountrySource;
///
/// let source = StaticCountrySource::new(records);
/// let countries = source.load().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCountrySource {
    records: Vec<CountryRecord>,
}

impl StaticCountrySource {
    /// Create a source over a fixed record list
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }

    /// Number of records served
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the source is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CountrySource for StaticCountrySource {
    async fn load(&self) -> Result<Vec<CountryRecord>, crate::Error> {
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}
