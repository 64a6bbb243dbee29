//! Core traits for the quiz engine
//!
//! This module defines the abstract interface between the engine and its
//! data-supplying collaborators.
//!
//! - [`CountrySource`]: Supply the ordered country list the engine plays on

pub mod country_source;

pub use country_source::{CountryRecord, CountrySource};
