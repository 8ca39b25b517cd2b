use super::*;

#[derive(Args, Clone)]
pub struct ShowOptions {
  /// Number of books to print
  #[arg(long, short, default_value_t = 10)]
  pub limit: usize,
}

/// Function for the [`Commands::Show`] in the CLI.
pub fn show<I: UserInteraction>(cli: &Cli, interaction: &I, options: ShowOptions) -> Result<()> {
  let config = cli.load_config()?;
  let catalog = load_catalog(&config)?;
  let metadata = &catalog.metadata;

  interaction.reply(ResponseContent::Info(&format!(
    "{} books, {} with a PDF, {} enriched (harvested {})",
    metadata.total_books,
    metadata.books_with_pdf,
    metadata.books_with_enrichment,
    metadata.harvested_at.format("%Y-%m-%d %H:%M")
  )))?;
  let shown = catalog.books.len().min(options.limit);
  interaction.reply(ResponseContent::Records(&catalog.books[..shown]))?;
  Ok(())
}
