//! Harvesting, citation and archival naming for Swedish legal literature.
//!
//! `juridik` turns the bibliographic records published on juridikbok.se into a
//! consistent local archive. It provides:
//!
//! - Author name decomposition for both natural ("Knut Rodhe") and inverted catalog
//!   ("Rodhe, Knut, 1909-1999") notation
//! - Stable archival filenames (`1956 - bok - Rodhe - Obligationsratt.pdf`)
//! - Citations in the house reference style, full and short form
//! - Enrichment with subject terms and SAB/DDC classification from the LIBRIS union catalog
//! - A JSON catalog that round-trips every record without loss
//!
//! # Getting Started
//!
//! ```
//! use juridik::{author::parse_author_name, record::BibliographicRecord};
//!
//! let record = BibliographicRecord::new(
//!   "Obligationsrätt",
//!   vec![parse_author_name("Knut Rodhe")],
//!   "Monografi",
//!   Some("1956".to_string()),
//!   None,
//! );
//!
//! assert_eq!(record.citation_full(), "Knut Rodhe, Obligationsrätt, 1956");
//! assert_eq!(record.citation_short(), "Rodhe, Obligationsrätt");
//! assert_eq!(record.filename(), "1956 - bok - Rodhe - Obligationsratt.pdf");
//! ```
//!
//! # Module Organization
//!
//! The normalization core is pure and synchronous:
//!
//! - [`author`]: Name parsing into first/last/full components
//! - [`format`]: Filename-safe text sanitizing
//! - [`book_type`]: The controlled vocabulary of work types
//! - [`filename`]: Archival filename construction
//! - [`citation`]: House-style citation strings
//! - [`record`]: The [`record::BibliographicRecord`] entity and its derived fields
//! - [`merge`]: Folding union catalog matches into a record
//! - [`catalog`]: The persisted JSON catalog
//!
//! Around it sit the I/O collaborators:
//!
//! - [`configuration`]: TOML configuration
//! - [`retriever`]: Fetching and extracting from juridikbok.se and LIBRIS
//! - [`pdf`]: PDF download with skip-if-exists
//! - [`harvester`]: Orchestration of a complete harvesting run

#![warn(missing_docs)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod author;
pub mod book_type;
pub mod catalog;
pub mod citation;
pub mod configuration;
pub mod error;
pub mod filename;
pub mod format;
pub mod harvester;
pub mod merge;
pub mod pdf;
pub mod record;
pub mod retriever;

use crate::{
  author::Author,
  configuration::Config,
  error::*,
  record::{BibliographicRecord, Classification, SubjectTerm},
};

/// Common traits and types for ergonomic imports.
///
/// ```
/// use juridik::prelude::*;
///
/// fn example() -> Result<(), HarvestError> {
///   let config = Config::default();
///   assert!(config.concurrency > 0);
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    configuration::Config, error::HarvestError, retriever::EnrichmentSource,
  };
}
