//! The controlled vocabulary of work types and their archival codes.
//!
//! juridikbok.se labels every work with a "Typ av verk". The archive abbreviates those
//! labels to short codes used as the second filename segment. Lookup is case-insensitive;
//! unknown labels pass through lower-cased and sanitized instead of being rejected.

use super::*;
use crate::format::sanitize_for_filename;

/// Maximum length of a passed-through code.
const MAX_CODE_LENGTH: usize = 15;

/// A classified work type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookType {
  /// Monographs and textbooks
  Monograph,
  /// Doctoral theses
  Thesis,
  /// Festschrifts
  Festschrift,
  /// Anthologies
  Anthology,
  /// Commentaries, including law commentaries
  Commentary,
  /// Reports
  Report,
  /// Government inquiry reports
  InquiryReport,
  /// Anything outside the vocabulary, holding the lower-cased source label
  Other(String),
}

impl BookType {
  /// Classifies a source label. An empty label is treated as a monograph.
  pub fn from_label(label: &str) -> Self {
    let label = label.trim().to_lowercase();
    match label.as_str() {
      "" | "monografi" | "lärobok" | "monograph" | "textbook" => BookType::Monograph,
      "avhandling" | "akademisk avhandling" | "doctoral thesis" => BookType::Thesis,
      "festskrift" | "festschrift" => BookType::Festschrift,
      "antologi" | "anthology" => BookType::Anthology,
      "kommentar" | "lagkommentar" | "commentary" | "law commentary" => BookType::Commentary,
      "rapport" | "report" => BookType::Report,
      "betänkande" | "government inquiry report" => BookType::InquiryReport,
      _ => BookType::Other(label),
    }
  }

  /// The archival code used in filenames.
  pub fn code(&self) -> String {
    match self {
      BookType::Monograph => "bok".to_string(),
      BookType::Thesis => "avh".to_string(),
      BookType::Festschrift => "festskrift".to_string(),
      BookType::Anthology => "antologi".to_string(),
      BookType::Commentary => "kommentar".to_string(),
      BookType::Report => "rapport".to_string(),
      BookType::InquiryReport => "betankande".to_string(),
      BookType::Other(label) => sanitize_for_filename(label, MAX_CODE_LENGTH),
    }
  }
}

impl Display for BookType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.code()) }
}
