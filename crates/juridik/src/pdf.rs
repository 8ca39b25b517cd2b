//! PDF download with skip-if-exists.
//!
//! Files are stored as `{output_dir}/pdf/{record.filename()}`. Because the filename is a
//! pure function of the record, a file from an earlier run is found again and kept as long
//! as it is larger than a truncated or error page would be.

use super::*;
use crate::retriever::PoliteClient;

/// Existing files at or below this size are downloaded again.
pub const MIN_COMPLETE_SIZE: u64 = 10_000;
/// Subdirectory of the output directory holding the PDFs.
pub const PDF_DIR: &str = "pdf";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What happened to one record's PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
  /// The PDF was fetched and written
  Downloaded,
  /// A complete file was already on disk
  Skipped,
  /// The fetch or the write failed; the error is on the record
  Failed,
  /// The record has no PDF link
  NoPdf,
}

/// Counts of download outcomes for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
  /// Newly downloaded
  pub downloaded: usize,
  /// Already present
  pub skipped:    usize,
  /// Failed
  pub failed:     usize,
  /// Without a PDF link
  pub no_pdf:     usize,
}

impl DownloadSummary {
  /// Counts one outcome.
  pub fn add(&mut self, outcome: DownloadOutcome) {
    match outcome {
      DownloadOutcome::Downloaded => self.downloaded += 1,
      DownloadOutcome::Skipped => self.skipped += 1,
      DownloadOutcome::Failed => self.failed += 1,
      DownloadOutcome::NoPdf => self.no_pdf += 1,
    }
  }
}

/// Megabytes rounded to one decimal.
pub fn size_in_mb(bytes: u64) -> f64 { (bytes as f64 / BYTES_PER_MB * 10.0).round() / 10.0 }

/// Downloads the record's PDF into `{output_dir}/pdf/` and records the result on it.
///
/// Failures never propagate: they are stored in `pdf_error` with `pdf_downloaded` set to
/// `false`, so one bad link does not abort a batch.
#[instrument(skip_all, fields(filename = %record.filename()))]
pub async fn download_pdf(
  client: &PoliteClient,
  record: &mut BibliographicRecord,
  output_dir: &Path,
) -> DownloadOutcome {
  let Some(pdf_url) = record.pdf_url.clone() else {
    return DownloadOutcome::NoPdf;
  };

  let path = output_dir.join(PDF_DIR).join(record.filename());
  if let Ok(metadata) = tokio::fs::metadata(&path).await {
    if metadata.len() > MIN_COMPLETE_SIZE {
      debug!("Keeping existing {}", path.display());
      record.download.pdf_path = Some(path);
      record.download.pdf_downloaded = Some(true);
      record.download.pdf_error = None;
      return DownloadOutcome::Skipped;
    }
  }

  match fetch_to(client, &pdf_url, &path).await {
    Ok(bytes) => {
      let size_mb = size_in_mb(bytes);
      info!("Downloaded {} ({size_mb:.1} MB)", record.filename());
      record.download.pdf_path = Some(path);
      record.download.pdf_size_mb = Some(size_mb);
      record.download.pdf_downloaded = Some(true);
      record.download.pdf_error = None;
      DownloadOutcome::Downloaded
    },
    Err(e) => {
      warn!("Download of {pdf_url} failed: {e}");
      record.download.pdf_downloaded = Some(false);
      record.download.pdf_error = Some(e.to_string());
      DownloadOutcome::Failed
    },
  }
}

async fn fetch_to(client: &PoliteClient, url: &str, path: &Path) -> Result<u64> {
  let bytes = client.get_bytes(url).await?;
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, &bytes).await?;
  Ok(bytes.len() as u64)
}
