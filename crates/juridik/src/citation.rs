//! Citations in the house reference style.
//!
//! The style follows the Swedish Supreme Court's convention for legal literature:
//!
//! ```text
//! Knut Rodhe, Obligationsrätt, 1956
//! Stefan Lindskog, Betalning, 2 uppl. 2018
//! Hugo Tiberg och Dan Lennhammer, Skuldebrev, växel och check, 7 uppl. 1995
//! ```
//!
//! A first edition is never mentioned. The short form repeats the surnames and the title
//! only: `Tiberg och Lennhammer, Skuldebrev, växel och check`.

use super::*;

/// The word joining the last two authors.
pub const CONJUNCTION: &str = "och";

/// Edition label that is left out of citations.
const FIRST_EDITION: &str = "1";

/// Builds the full citation: all full names, title, then edition and year.
pub fn build_full_citation(record: &BibliographicRecord) -> String {
  let names: Vec<&str> = record.authors().iter().map(|a| a.full.as_str()).collect();
  format!("{}, {}, {}", join_authors(&names), record.title(), year_part(record))
}

/// Builds the short citation: surnames and title, no year or edition.
pub fn build_short_citation(record: &BibliographicRecord) -> String {
  let names: Vec<&str> = record.authors().iter().map(|a| a.last.as_str()).collect();
  format!("{}, {}", join_authors(&names), record.title())
}

/// Joins names as `A`, `A och B` or `A, B och C`.
fn join_authors(names: &[&str]) -> String {
  match names {
    [] => String::new(),
    [only] => only.to_string(),
    [init @ .., last] => format!("{} {CONJUNCTION} {last}", init.join(", ")),
  }
}

/// `"{year}"` for first or unstated editions, `"{edition} uppl. {year}"` otherwise.
fn year_part(record: &BibliographicRecord) -> String {
  let year = record.year().unwrap_or_default();
  match record.edition() {
    Some(edition) if edition != FIRST_EDITION => format!("{edition} uppl. {year}"),
    _ => year.to_string(),
  }
}
