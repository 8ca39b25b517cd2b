//! Archival filenames.
//!
//! Every downloaded work is stored as
//!
//! ```text
//! YYYY - code - Author, Author - Title[ - Nuppl].pdf
//! ```
//!
//! e.g. `1995 - bok - Tiberg, Lennhammer - Skuldebrev, vaxel och check - 7uppl.pdf`. The
//! name is a pure function of the record's year, type, authors, title and edition, so
//! re-running a harvest finds files from earlier runs under the same name.

use super::*;
use crate::{book_type::BookType, format::sanitize_for_filename};

/// Year segment used when a record has no year.
pub const UNKNOWN_YEAR: &str = "0000";

/// Maximum length of the author segment.
const MAX_AUTHOR_LENGTH: usize = 40;
/// Maximum length of the title segment.
const MAX_TITLE_LENGTH: usize = 60;
/// Maximum length of the edition number.
const MAX_EDITION_LENGTH: usize = 15;
/// Separator between segments.
const SEPARATOR: &str = " - ";

/// Builds the archival filename for `record`.
pub fn build_filename(record: &BibliographicRecord) -> String {
  let year = record.year().unwrap_or(UNKNOWN_YEAR).to_string();
  let book_type = BookType::from_label(record.book_type()).code();

  let surnames = record.authors().iter().map(|a| a.last.as_str()).collect::<Vec<_>>().join(", ");
  let authors = sanitize_for_filename(&surnames, MAX_AUTHOR_LENGTH);
  let title = sanitize_for_filename(record.title(), MAX_TITLE_LENGTH);

  let mut segments = vec![year, book_type, authors, title];
  let edition = record
    .edition()
    .map(|edition| sanitize_for_filename(edition, MAX_EDITION_LENGTH))
    .filter(|edition| !edition.is_empty());
  if let Some(edition) = edition {
    segments.push(format!("{edition}uppl"));
  }

  format!("{}.pdf", segments.join(SEPARATOR))
}
