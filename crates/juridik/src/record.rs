//! The bibliographic record and its derived fields.
//!
//! A [`BibliographicRecord`] is created once from the loosely-typed [`RawBook`] the site
//! extractor produces and is then refined in place: PDF download state and union catalog
//! enrichment are attached to it, it is never deleted. Absent data is represented by
//! `None` or empty lists, never by a missing record.
//!
//! The filename and both citations are derived from five inputs: title, authors, work
//! type, year and edition. Those inputs are private and can only be changed through
//! setters that re-derive everything, so a record never carries stale derived fields. The
//! one deliberate exception is enrichment, which re-derives the citations but keeps the
//! filename (see [`crate::merge`]).
//!
//! # Examples
//!
//! ```
//! use juridik::{author::parse_author_name, record::BibliographicRecord};
//!
//! let mut record = BibliographicRecord::new(
//!   "Betalning",
//!   vec![parse_author_name("Stefan Lindskog")],
//!   "Monografi",
//!   Some("2018".to_string()),
//!   None,
//! );
//! assert_eq!(record.citation_full(), "Stefan Lindskog, Betalning, 2018");
//!
//! record.set_edition(Some("2".to_string()));
//! assert_eq!(record.citation_full(), "Stefan Lindskog, Betalning, 2 uppl. 2018");
//! assert_eq!(record.filename(), "2018 - bok - Lindskog - Betalning - 2uppl.pdf");
//! ```

use super::*;
use crate::{
  author::parse_author_name,
  citation::{build_full_citation, build_short_citation},
  filename::build_filename,
};

/// Title substituted when the source page has none.
pub const UNTITLED: &str = "Utan titel";

/// A work harvested from juridikbok.se, optionally enriched from LIBRIS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibliographicRecord {
  /// Title without the trailing year
  title:     String,
  /// Publication year as printed
  #[serde(default, skip_serializing_if = "Option::is_none")]
  year:      Option<String>,
  /// Work type label as printed by the site
  #[serde(default)]
  book_type: String,
  /// Edition number; absent means first or unstated
  #[serde(default, skip_serializing_if = "Option::is_none")]
  edition:   Option<String>,
  /// Authors in citation order, never empty
  #[serde(deserialize_with = "deserialize_authors")]
  authors:   Vec<Author>,

  /// Archival filename
  filename:       String,
  /// Full house-style citation
  citation_full:  String,
  /// Short house-style citation
  citation_short: String,

  /// Subtitle
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subtitle:      Option<String>,
  /// The book's page on juridikbok.se
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub detail_url:    Option<String>,
  /// juridikbok.se's identifier, the path tail after `/book/`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub site_id:       Option<String>,
  /// Where the PDF can be downloaded
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_url:       Option<String>,
  /// ISBN as printed
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub isbn:          Option<String>,
  /// Persistent URN identifier
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub urn:           Option<String>,
  /// Resolver link for the URN
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub urn_url:       Option<String>,
  /// Publisher and year as printed
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub publisher:     Option<String>,
  /// Series name
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub series:        Option<String>,
  /// Subject labels assigned by juridikbok.se
  #[serde(default)]
  pub site_subjects: Vec<String>,
  /// Alternative names for the work, curated by hand
  #[serde(default)]
  pub aliases:       Vec<String>,

  /// Local PDF state
  #[serde(flatten)]
  pub download:   DownloadState,
  /// Union catalog enrichment
  #[serde(flatten)]
  pub enrichment: Enrichment,
}

/// What happened to the record's PDF on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadState {
  /// Where the PDF was stored
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_path:       Option<PathBuf>,
  /// Size in megabytes, one decimal
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_size_mb:    Option<f64>,
  /// `None` until a download was attempted
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_downloaded: Option<bool>,
  /// Message of the last failed attempt
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_error:      Option<String>,
}

/// Subject headings and classification supplied by the union catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
  /// The matched union catalog record
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub external_id:      Option<String>,
  /// Link to the matched union catalog record
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub external_url:     Option<String>,
  /// `None` before any lookup, then whether the last lookup found a match
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub enrichment_found: Option<bool>,
  /// Subject headings
  #[serde(default)]
  pub subject_terms:    Vec<SubjectTerm>,
  /// Classification codes
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classification:   Option<Classification>,
}

/// A subject heading and the vocabulary it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTerm {
  /// The heading, e.g. "Obligationsrätt"
  pub term:   String,
  /// The vocabulary, e.g. "Svenska ämnesord"; empty when not stated
  #[serde(default)]
  pub system: String,
}

/// Classification codes of a work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
  /// Dewey Decimal Classification
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ddc:             Option<String>,
  /// Universal Decimal Classification
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub udk:             Option<String>,
  /// Swedish SAB classification
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sab:             Option<String>,
  /// Heading text of the SAB code
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sab_description: Option<String>,
}

impl Classification {
  /// Whether no code was found at all.
  pub fn is_empty(&self) -> bool {
    self.ddc.is_none() && self.udk.is_none() && self.sab.is_none() && self.sab_description.is_none()
  }
}

/// Fields as extracted from the site, before any normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBook {
  /// Title with any trailing `(YYYY)` already removed
  pub title:      Option<String>,
  /// Year from the listing title or the publisher line
  pub year:       Option<String>,
  /// Subtitle
  pub subtitle:   Option<String>,
  /// Detail page URL
  pub detail_url: Option<String>,
  /// Author names in natural order
  pub authors:    Vec<String>,
  /// PDF link
  pub pdf_url:    Option<String>,
  /// ISBN
  pub isbn:       Option<String>,
  /// URN
  pub urn:        Option<String>,
  /// URN resolver link
  pub urn_url:    Option<String>,
  /// Edition
  pub edition:    Option<String>,
  /// Publisher line
  pub publisher:  Option<String>,
  /// Series
  pub series:     Option<String>,
  /// Work type label
  pub book_type:  Option<String>,
  /// Subject labels
  pub subjects:   Vec<String>,
}

impl BibliographicRecord {
  /// Creates a record and derives its filename and citations.
  ///
  /// An empty author list is replaced by the single sentinel author.
  pub fn new(
    title: impl Into<String>,
    authors: Vec<Author>,
    book_type: impl Into<String>,
    year: Option<String>,
    edition: Option<String>,
  ) -> Self {
    let mut record = Self {
      title: title.into(),
      year,
      book_type: book_type.into(),
      edition,
      authors: non_empty_authors(authors),
      filename: String::new(),
      citation_full: String::new(),
      citation_short: String::new(),
      subtitle: None,
      detail_url: None,
      site_id: None,
      pdf_url: None,
      isbn: None,
      urn: None,
      urn_url: None,
      publisher: None,
      series: None,
      site_subjects: Vec::new(),
      aliases: Vec::new(),
      download: DownloadState::default(),
      enrichment: Enrichment::default(),
    };
    record.rederive();
    record
  }

  /// Normalizes an extracted book into a record.
  ///
  /// A missing or blank title becomes [`UNTITLED`], and every author string goes through
  /// [`parse_author_name`].
  pub fn from_raw(raw: RawBook) -> Self {
    lazy_static! {
      static ref SITE_ID: Regex = Regex::new(r"/book/(.+)$").unwrap();
    }

    let title = raw
      .title
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .unwrap_or_else(|| UNTITLED.to_string());
    let authors = raw.authors.iter().map(|a| parse_author_name(a)).collect();

    let mut record =
      Self::new(title, authors, raw.book_type.unwrap_or_default(), raw.year, raw.edition);
    record.site_id = raw
      .detail_url
      .as_deref()
      .and_then(|url| SITE_ID.captures(url))
      .and_then(|cap| cap.get(1))
      .map(|m| m.as_str().to_string());
    record.subtitle = raw.subtitle;
    record.detail_url = raw.detail_url;
    record.pdf_url = raw.pdf_url;
    record.isbn = raw.isbn;
    record.urn = raw.urn;
    record.urn_url = raw.urn_url;
    record.publisher = raw.publisher;
    record.series = raw.series;
    record.site_subjects = raw.subjects;
    record
  }

  /// The title.
  pub fn title(&self) -> &str { &self.title }

  /// The year, or `None` when absent or blank.
  pub fn year(&self) -> Option<&str> { non_blank(&self.year) }

  /// The work type label as printed by the site.
  pub fn book_type(&self) -> &str { &self.book_type }

  /// The edition, or `None` when absent or blank.
  pub fn edition(&self) -> Option<&str> { non_blank(&self.edition) }

  /// The authors in citation order; never empty.
  pub fn authors(&self) -> &[Author] { &self.authors }

  /// The archival filename.
  pub fn filename(&self) -> &str { &self.filename }

  /// The full house-style citation.
  pub fn citation_full(&self) -> &str { &self.citation_full }

  /// The short house-style citation.
  pub fn citation_short(&self) -> &str { &self.citation_short }

  /// Replaces the title and re-derives.
  pub fn set_title(&mut self, title: impl Into<String>) {
    self.title = title.into();
    self.rederive();
  }

  /// Replaces the year and re-derives.
  pub fn set_year(&mut self, year: Option<String>) {
    self.year = year;
    self.rederive();
  }

  /// Replaces the work type label and re-derives.
  pub fn set_book_type(&mut self, book_type: impl Into<String>) {
    self.book_type = book_type.into();
    self.rederive();
  }

  /// Replaces the edition and re-derives.
  pub fn set_edition(&mut self, edition: Option<String>) {
    self.edition = edition;
    self.rederive();
  }

  /// Replaces all authors and re-derives. An empty list becomes the sentinel author.
  pub fn set_authors(&mut self, authors: Vec<Author>) {
    self.authors = non_empty_authors(authors);
    self.rederive();
  }

  /// Whether the site offers a PDF for this work.
  pub fn has_pdf(&self) -> bool { self.pdf_url.is_some() }

  /// Whether a union catalog match has been attached.
  pub fn is_enriched(&self) -> bool { self.enrichment.external_id.is_some() }

  /// Swaps the primary author and refreshes the citations, keeping the filename.
  pub(crate) fn replace_primary_author(&mut self, author: Author) {
    self.authors[0] = author;
    self.refresh_citations();
  }

  /// Recomputes every derived field.
  fn rederive(&mut self) {
    self.filename = build_filename(self);
    self.refresh_citations();
  }

  /// Recomputes both citations.
  fn refresh_citations(&mut self) {
    self.citation_full = build_full_citation(self);
    self.citation_short = build_short_citation(self);
  }
}

/// Trimmed view of an optional string, `None` when blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Substitutes the sentinel author for an empty list.
fn non_empty_authors(authors: Vec<Author>) -> Vec<Author> {
  if authors.is_empty() {
    vec![Author::unknown()]
  } else {
    authors
  }
}

/// Deserializes an author list, enforcing the non-empty invariant.
fn deserialize_authors<'de, D>(deserializer: D) -> std::result::Result<Vec<Author>, D::Error>
where D: serde::Deserializer<'de> {
  Vec::<Author>::deserialize(deserializer).map(non_empty_authors)
}
