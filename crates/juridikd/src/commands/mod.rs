use super::*;

pub mod clean;
pub mod download;
pub mod enrich;
pub mod harvest;
pub mod init;
pub mod show;

pub use clean::clean;
pub use download::download;
pub use enrich::enrich;
pub use harvest::{harvest, HarvestOptions};
pub use init::init;
pub use show::{show, ShowOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a default configuration file
  Init,

  /// Crawl the site, download the PDFs and enrich from LIBRIS
  Harvest(HarvestOptions),

  /// Enrich the records of an existing catalog from LIBRIS
  Enrich,

  /// Download the PDFs of an existing catalog, keeping files already on disk
  Download,

  /// Print citations and archival filenames from the catalog
  Show(ShowOptions),

  /// Remove the catalog after confirmation
  Clean,
}

/// Reads the catalog from the output directory, failing if there is none.
fn load_catalog(config: &Config) -> Result<Catalog> {
  Catalog::load(&config.output_dir)?
    .ok_or_else(|| JuridikdError::MissingCatalog(config.output_dir.clone()))
}

/// Recomputes the summary and writes the catalog.
fn store(config: &Config, books: Vec<BibliographicRecord>) -> Result<Catalog> {
  let catalog = Catalog::fold(books, Utc::now());
  let path = catalog.save(&config.output_dir)?;
  debug!("Stored {} books in {}", catalog.books.len(), path.display());
  Ok(catalog)
}
