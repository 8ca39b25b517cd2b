//! Removing the catalog.

use super::*;

/// Function for the [`Commands::Clean`] in the CLI.
///
/// Downloaded PDFs stay where they are.
pub fn clean<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let config = cli.load_config()?;
  let path = Catalog::path_in(&config.output_dir);
  if !path.exists() {
    interaction
      .reply(ResponseContent::Warning(&format!("No catalog found at {}", path.display())))?;
    return Ok(());
  }

  if !interaction.confirm(&format!("Are you sure you want to delete {}?", path.display()))? {
    interaction.reply(ResponseContent::Info("Operation cancelled"))?;
    return Ok(());
  }

  std::fs::remove_file(&path)?;
  interaction.reply(ResponseContent::Success("Catalog removed"))?;
  Ok(())
}
