//! Error types for the juridik library.
//!
//! Only the I/O collaborators can fail. The normalization core (names, filenames,
//! citations, merging) is total and reports degraded input as data instead: sentinel
//! values, absent fields or the `enrichment_found` flag.
//!
//! # Examples
//!
//! ```no_run
//! use juridik::{catalog::Catalog, error::HarvestError};
//!
//! # fn example() -> Result<(), HarvestError> {
//! match Catalog::load("bibliotek") {
//!   Ok(Some(catalog)) => println!("{} books", catalog.books.len()),
//!   Ok(None) => println!("No catalog yet"),
//!   Err(HarvestError::Json(e)) => println!("Catalog is corrupt: {e}"),
//!   Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`juridik`](crate) crate.
pub type Result<T> = core::result::Result<T, HarvestError>;

/// Errors that can occur while fetching, downloading or persisting records.
#[derive(Error, Debug)]
pub enum HarvestError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A remote service answered, but not with something usable.
  ///
  /// Non-success status codes and malformed payloads end up here. The string carries
  /// the status or parser message for debugging.
  #[error("API error: {0}")]
  ApiError(String),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The catalog could not be encoded or decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration could not be written.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configured or scraped URL could not be parsed or joined.
  #[error("Invalid URL: {0}")]
  InvalidUrl(String),

  /// The configuration is missing or inconsistent.
  #[error("{0}")]
  Config(String),
}
