//! Errors surfaced by the command line front end.

use thiserror::Error;

use super::*;

/// Error type alias used for the `juridik` binary.
pub type Result<T> = core::result::Result<T, JuridikdError>;

/// Errors that end a command.
#[derive(Error, Debug)]
pub enum JuridikdError {
  /// The library failed while harvesting, downloading or persisting.
  #[error(transparent)]
  Harvest(#[from] HarvestError),

  /// A prompt could not be shown or answered.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A command needs an existing catalog in the output directory.
  #[error("No catalog found in {0}. Run `juridik harvest` first.")]
  MissingCatalog(PathBuf),
}
