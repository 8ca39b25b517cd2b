//! The persisted catalog of harvested records.
//!
//! A harvest ends with one explicit aggregation step, [`Catalog::fold`], which takes the
//! fully processed records and computes the summary counts. The result is written as a
//! single pretty-printed JSON document:
//!
//! ```json
//! {
//!   "metadata": {
//!     "source": "juridikbok.se",
//!     "license": "CC BY-NC 4.0",
//!     "harvested_at": "2026-10-16T08:00:00Z",
//!     "total_books": 1,
//!     "books_with_pdf": 1,
//!     "books_with_enrichment": 0,
//!     "version": "2.0",
//!     "citation_format_note": "..."
//!   },
//!   "books": [ ... ]
//! }
//! ```

use super::*;

/// File name of the catalog inside the output directory.
pub const CATALOG_FILE: &str = "catalog.json";
/// Format version written to new catalogs.
pub const FORMAT_VERSION: &str = "2.0";
/// Name of the harvested source.
pub const SOURCE_NAME: &str = "juridikbok.se";
/// License the harvested works are published under.
pub const LICENSE: &str = "CC BY-NC 4.0";
/// Explanation of the citation fields, stored with every catalog.
pub const CITATION_FORMAT_NOTE: &str = "citation_full follows the Swedish Supreme Court's reference \
                                        style, e.g. \"Knut Rodhe, Obligationsrätt, 1956\"; \
                                        citation_short is \"Rodhe, Obligationsrätt\"";

/// Summary information stored alongside the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
  /// Harvested source
  pub source:                String,
  /// License of the harvested works
  pub license:               String,
  /// When the catalog was written
  pub harvested_at:          DateTime<Utc>,
  /// Number of records
  pub total_books:           usize,
  /// Records with a PDF link
  pub books_with_pdf:        usize,
  /// Records with a union catalog match
  pub books_with_enrichment: usize,
  /// Catalog format version
  pub version:               String,
  /// How to read the citation fields
  pub citation_format_note:  String,
}

/// All harvested records plus summary metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
  /// Summary information
  pub metadata: CatalogMetadata,
  /// The records in harvest order
  pub books:    Vec<BibliographicRecord>,
}

impl Catalog {
  /// Aggregates finished records into a catalog.
  pub fn fold(books: Vec<BibliographicRecord>, harvested_at: DateTime<Utc>) -> Self {
    let metadata = CatalogMetadata {
      source: SOURCE_NAME.to_string(),
      license: LICENSE.to_string(),
      harvested_at,
      total_books: books.len(),
      books_with_pdf: books.iter().filter(|b| b.has_pdf()).count(),
      books_with_enrichment: books.iter().filter(|b| b.is_enriched()).count(),
      version: FORMAT_VERSION.to_string(),
      citation_format_note: CITATION_FORMAT_NOTE.to_string(),
    };
    Self { metadata, books }
  }

  /// Location of the catalog file inside `dir`.
  pub fn path_in(dir: impl AsRef<Path>) -> PathBuf { dir.as_ref().join(CATALOG_FILE) }

  /// Writes the catalog to `{dir}/catalog.json`, creating `dir` if needed.
  #[instrument(skip(self, dir), fields(books = self.books.len()))]
  pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = Self::path_in(dir);
    let json = serde_json::to_string_pretty(self)?;
    std::fs::write(&path, json)?;
    info!(
      path = %path.display(),
      with_pdf = self.metadata.books_with_pdf,
      with_enrichment = self.metadata.books_with_enrichment,
      "Catalog saved"
    );
    Ok(path)
  }

  /// Reads `{dir}/catalog.json`, or `None` if there is none yet.
  pub fn load(dir: impl AsRef<Path>) -> Result<Option<Self>> {
    let path = Self::path_in(dir);
    if !path.exists() {
      debug!("No catalog at {}", path.display());
      return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    debug!("Loaded {} books from {}", catalog.books.len(), path.display());
    Ok(Some(catalog))
  }
}
