//! Writing a fresh configuration file.

use super::*;

/// Function for the [`Commands::Init`] in the CLI.
pub fn init<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let path = cli.config_path();
  if path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(());
  }

  let config = match &cli.output_dir {
    Some(output_dir) => Config::default().with_output_dir(output_dir.clone()),
    None => Config::default(),
  };
  config.save(&path)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Configuration written to {}\nOutput directory: {}",
    path.display(),
    config.output_dir.display()
  )))?;
  Ok(())
}
