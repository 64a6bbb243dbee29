//! Country source implementations shipped with the core
//!
//! Only the in-memory source lives here; file-backed and other I/O-bound
//! sources belong in their own crates (see `quiz-source-json`).

pub mod memory;

pub use memory::StaticCountrySource;
