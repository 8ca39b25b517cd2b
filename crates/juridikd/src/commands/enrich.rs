use super::*;

/// Function for the [`Commands::Enrich`] in the CLI.
pub async fn enrich<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let config = cli.load_config()?;
  let catalog = load_catalog(&config)?;
  let harvester = Harvester::from_config(config)?;

  interaction.reply(ResponseContent::Info(&format!(
    "Enriching {} books from {}",
    catalog.books.len(),
    harvester.config().union_catalog_url
  )))?;
  let (books, summary) = harvester.enrich_all(catalog.books).await;
  interaction.reply(ResponseContent::Enrichment(&summary))?;

  let catalog = store(harvester.config(), books)?;
  interaction.reply(ResponseContent::Success(&format!(
    "{} of {} books enriched",
    catalog.metadata.books_with_enrichment, catalog.metadata.total_books
  )))?;
  Ok(())
}
