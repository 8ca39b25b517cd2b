//! Terminal output and prompts.

use dialoguer::Confirm;

use super::*;

pub static INFO_PREFIX: &str = "ℹ ";
pub static SUCCESS_PREFIX: &str = "✓ ";
pub static ERROR_PREFIX: &str = "✗ ";
pub static WARNING_PREFIX: &str = "! ";
pub static PROMPT_PREFIX: &str = "❯ ";
pub static TREE_BRANCH: &str = "├";
pub static TREE_LEAF: &str = "└";

/// Everything a command reports back to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  Records(&'a [BibliographicRecord]),
  Downloads(&'a DownloadSummary),
  Enrichment(&'a EnrichmentSummary),
  Success(&'a str),
  Info(&'a str),
  Warning(&'a str),
  Error(&'a JuridikdError),
}

pub trait UserInteraction {
  fn confirm(&self, message: &str) -> Result<bool>;
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Styled output on stdout, errors on stderr, prompts through `dialoguer`.
pub struct Terminal {
  accept_defaults: bool,
}

impl Terminal {
  /// With `accept_defaults`, every confirmation is answered with yes.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(Confirm::new().with_prompt(format!("{PROMPT_PREFIX}{message}")).default(false).interact()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Records(records) =>
        for (index, record) in records.iter().enumerate() {
          println!("{} {}", style(format!("{}.", index + 1)).dim(), style(record.title()).bold());
          println!("   {} Citation: {}", style(TREE_BRANCH).dim(), style(record.citation_full()).cyan());
          println!("   {} Short:    {}", style(TREE_BRANCH).dim(), record.citation_short());
          if let Some(external_id) = &record.enrichment.external_id {
            println!("   {} LIBRIS:   {}", style(TREE_BRANCH).dim(), style(external_id).yellow());
          }
          println!("   {} File:     {}", style(TREE_LEAF).dim(), style(record.filename()).green());
        },
      ResponseContent::Downloads(summary) => println!(
        "{} Downloads: {} downloaded, {} skipped, {} failed, {} without PDF",
        style(INFO_PREFIX).blue(),
        style(summary.downloaded).green(),
        summary.skipped,
        style(summary.failed).red(),
        summary.no_pdf
      ),
      ResponseContent::Enrichment(summary) => println!(
        "{} Enrichment: {} found, {} not found, {} failed, {} authors completed",
        style(INFO_PREFIX).blue(),
        style(summary.found).green(),
        summary.not_found,
        style(summary.failed).red(),
        summary.authors_upgraded
      ),
      ResponseContent::Success(message) =>
        println!("{} {}", style(SUCCESS_PREFIX).green(), style(message).green()),
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).blue(), message),
      ResponseContent::Warning(message) =>
        println!("{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow()),
      ResponseContent::Error(error) =>
        eprintln!("{} {}", style(ERROR_PREFIX).red(), style(error).red()),
    }
    Ok(())
  }
}
