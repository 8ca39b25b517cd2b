//! A complete harvesting run.

use super::*;

/// Number of citations printed at the end of a run.
const SAMPLE_SIZE: usize = 5;

#[derive(Args, Clone)]
pub struct HarvestOptions {
  /// Skip the PDF downloads
  #[arg(long)]
  pub crawl_only: bool,

  /// Stop after this many books
  #[arg(long)]
  pub max_books: Option<usize>,
}

/// Function for the [`Commands::Harvest`] in the CLI.
///
/// The catalog is written after every stage, so an interrupted run keeps what it has.
pub async fn harvest<I: UserInteraction>(
  cli: &Cli,
  interaction: &I,
  options: HarvestOptions,
) -> Result<()> {
  let mut config = cli.load_config()?;
  if options.max_books.is_some() {
    config = config.with_max_books(options.max_books);
  }
  let harvester = Harvester::from_config(config)?;
  let config = harvester.config();

  interaction.reply(ResponseContent::Info(&format!("Crawling {}", config.site_base_url)))?;
  let books = harvester.crawl().await?;
  let mut catalog = store(config, books)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Found {} books, {} with a PDF",
    catalog.metadata.total_books, catalog.metadata.books_with_pdf
  )))?;

  if !options.crawl_only {
    interaction.reply(ResponseContent::Info("Downloading PDFs"))?;
    let downloads = harvester.download_all(&mut catalog.books).await;
    interaction.reply(ResponseContent::Downloads(&downloads))?;
    catalog = store(config, catalog.books)?;
  }

  interaction
    .reply(ResponseContent::Info(&format!("Enriching from {}", config.union_catalog_url)))?;
  let (books, enrichment) = harvester.enrich_all(catalog.books).await;
  interaction.reply(ResponseContent::Enrichment(&enrichment))?;
  catalog = store(config, books)?;

  let sample = &catalog.books[..catalog.books.len().min(SAMPLE_SIZE)];
  if !sample.is_empty() {
    interaction.reply(ResponseContent::Info("Sample citations:"))?;
    interaction.reply(ResponseContent::Records(sample))?;
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Catalog written to {}",
    Catalog::path_in(&config.output_dir).display()
  )))?;
  Ok(())
}
