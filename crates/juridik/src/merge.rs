//! Folding union catalog matches into a record.
//!
//! juridikbok.se is the primary source; LIBRIS is consulted afterwards for subject terms,
//! classification codes and, often, a more complete author name. The merge policy:
//!
//! - Identifier and classification fields are copied onto the record, replacing whatever
//!   an earlier enrichment pass left there.
//! - The primary author (index 0 only) is replaced by the LIBRIS author when LIBRIS knows
//!   a given name and the record either has none or a strictly shorter one. Co-authors
//!   are never touched.
//! - After such a replacement both citations are re-derived. The filename is not: a PDF
//!   may already be stored under it.
//! - A lookup without a match only sets the `enrichment_found` flag.
//!
//! Applying the same match twice changes nothing the second time.

use super::*;
use crate::author::parse_inverted_author_name;

/// A union catalog record matched to a harvested work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalMatch {
  /// The union catalog's record id
  pub external_id:    String,
  /// Link to the union catalog record
  pub source_url:     String,
  /// Primary creator in inverted notation, e.g. "Rodhe, Knut, 1909-1999"
  pub raw_creator:    Option<String>,
  /// Subject headings from the full record view
  pub subject_terms:  Vec<SubjectTerm>,
  /// Classification codes from the full record view
  pub classification: Option<Classification>,
}

/// Result of a single union catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
  /// A matching record was found
  Found(ExternalMatch),
  /// No candidate matched the work
  NotFound,
}

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
  /// A match was applied
  pub matched:         bool,
  /// The primary author was replaced and citations were re-derived
  pub author_upgraded: bool,
}

impl BibliographicRecord {
  /// Applies a lookup result: merges a match or records that nothing was found.
  pub fn apply_lookup(&mut self, lookup: &Lookup) -> MergeOutcome {
    match lookup {
      Lookup::Found(external) => self.merge_enrichment(external),
      Lookup::NotFound => {
        self.enrichment.enrichment_found = Some(false);
        MergeOutcome::default()
      },
    }
  }

  /// Merges a successful union catalog match into this record.
  pub fn merge_enrichment(&mut self, external: &ExternalMatch) -> MergeOutcome {
    self.enrichment.enrichment_found = Some(true);
    self.enrichment.external_id = Some(external.external_id.clone());
    self.enrichment.external_url = Some(external.source_url.clone());
    if !external.subject_terms.is_empty() {
      self.enrichment.subject_terms = external.subject_terms.clone();
    }
    if let Some(classification) = external.classification.as_ref().filter(|c| !c.is_empty()) {
      self.enrichment.classification = Some(classification.clone());
    }

    let candidate = external
      .raw_creator
      .as_deref()
      .filter(|creator| !creator.trim().is_empty())
      .map(parse_inverted_author_name);

    let author_upgraded = match candidate {
      Some(candidate) if should_upgrade(&self.authors()[0], &candidate) => {
        debug!(
          from = %self.authors()[0],
          to = %candidate,
          "Upgrading primary author from union catalog"
        );
        self.replace_primary_author(candidate);
        true
      },
      _ => false,
    };

    MergeOutcome { matched: true, author_upgraded }
  }
}

/// The author upgrade rule: the candidate must have a given name, and the current author
/// either none or a strictly shorter one (counted in characters).
fn should_upgrade(current: &Author, candidate: &Author) -> bool {
  !candidate.first.is_empty()
    && (current.first.is_empty() || candidate.first.chars().count() > current.first.chars().count())
}
