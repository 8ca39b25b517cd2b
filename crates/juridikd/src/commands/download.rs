//! Re-running the download stage against a stored catalog.

use super::*;

/// Function for the [`Commands::Download`] in the CLI.
pub async fn download<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let config = cli.load_config()?;
  let mut catalog = load_catalog(&config)?;
  let harvester = Harvester::from_config(config)?;

  interaction.reply(ResponseContent::Info(&format!(
    "Downloading PDFs to {}",
    harvester.config().output_dir.display()
  )))?;
  let summary = harvester.download_all(&mut catalog.books).await;
  interaction.reply(ResponseContent::Downloads(&summary))?;
  if summary.failed > 0 {
    interaction.reply(ResponseContent::Warning(
      "Some downloads failed, their errors are stored in the catalog",
    ))?;
  }

  store(harvester.config(), catalog.books)?;
  interaction.reply(ResponseContent::Success("Catalog updated"))?;
  Ok(())
}
