//! Orchestration of a complete harvesting run.
//!
//! A run has three phases, each of which can also be started on its own:
//!
//! 1. [`Harvester::crawl`] walks the listing pages and then every detail page, one request
//!    at a time, and turns the results into records.
//! 2. [`Harvester::download_all`] fetches the PDFs.
//! 3. [`Harvester::enrich_all`] asks the union catalog about every record. Lookups run
//!    concurrently, bounded by the configured concurrency. Each record is owned by exactly
//!    one task and results come back in input order.
//!
//! The caller folds the finished records into a [`crate::catalog::Catalog`] and saves it;
//! nothing here touches the catalog file.
//!
//! # Examples
//!
//! ```no_run
//! use juridik::{catalog::Catalog, configuration::Config, harvester::Harvester};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default().with_max_books(Some(10));
//! let harvester = Harvester::from_config(config.clone())?;
//!
//! let mut books = harvester.crawl().await?;
//! harvester.download_all(&mut books).await;
//! let (books, _) = harvester.enrich_all(books).await;
//!
//! Catalog::fold(books, chrono::Utc::now()).save(&config.output_dir)?;
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};

use super::*;
use crate::{
  merge::MergeOutcome,
  pdf::{download_pdf, DownloadSummary},
  record::RawBook,
  retriever::{libris::LibrisClient, site::SiteClient, EnrichmentSource},
};

/// Counts from an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
  /// Records with a match
  pub found:            usize,
  /// Records the source answered for without a match
  pub not_found:        usize,
  /// Records whose lookup failed; they are left as they were
  pub failed:           usize,
  /// Records whose primary author was replaced
  pub authors_upgraded: usize,
}

impl EnrichmentSummary {
  fn add(&mut self, outcome: Option<MergeOutcome>) {
    let Some(outcome) = outcome else {
      self.failed += 1;
      return;
    };
    if outcome.matched {
      self.found += 1;
    } else {
      self.not_found += 1;
    }
    if outcome.author_upgraded {
      self.authors_upgraded += 1;
    }
  }
}

/// Drives the site retriever, the PDF download and an [`EnrichmentSource`].
pub struct Harvester<S> {
  config: Config,
  site:   SiteClient,
  source: S,
}

impl Harvester<LibrisClient> {
  /// Creates a harvester that enriches from LIBRIS.
  pub fn from_config(config: Config) -> Result<Self> {
    config.validate()?;
    let libris = LibrisClient::new(&config)?;
    Self::new(config, libris)
  }
}

impl<S: EnrichmentSource> Harvester<S> {
  /// Creates a harvester with a custom enrichment source.
  pub fn new(config: Config, source: S) -> Result<Self> {
    config.validate()?;
    let site = SiteClient::new(&config)?;
    Ok(Self { config, site, source })
  }

  /// The configuration in use.
  pub fn config(&self) -> &Config { &self.config }

  /// Crawls listing and detail pages into records, honoring `max_books`.
  ///
  /// A failure on the first listing page is an error. Later listing pages and detail
  /// pages that fail are logged and skipped, keeping whatever was already collected.
  #[instrument(skip(self))]
  pub async fn crawl(&self) -> Result<Vec<BibliographicRecord>> {
    let mut books = self.crawl_listing().await?;
    info!("Found {} books in the listing", books.len());

    let total = books.len();
    for (i, raw) in books.iter_mut().enumerate() {
      let Some(url) = raw.detail_url.clone() else {
        continue;
      };
      debug!("[{}/{total}] {}", i + 1, raw.title.as_deref().unwrap_or_default());
      match self.site.fetch_details(&url).await {
        Ok(details) => details.apply_to(raw),
        Err(e) => warn!("Skipping details for {url}: {e}"),
      }
    }

    Ok(books.into_iter().map(BibliographicRecord::from_raw).collect())
  }

  async fn crawl_listing(&self) -> Result<Vec<RawBook>> {
    let limit = self.config.max_books.unwrap_or(usize::MAX);
    let mut books = Vec::new();
    let mut page = 0;

    loop {
      let listing = match self.site.fetch_listing(page).await {
        Ok(listing) => listing,
        Err(e) if page == 0 => return Err(e),
        Err(e) => {
          warn!("Stopping at listing page {page}: {e}");
          break;
        },
      };
      let has_next = listing.has_next(page);
      books.extend(listing.books);

      if books.len() >= limit {
        books.truncate(limit);
        break;
      }
      if !has_next {
        break;
      }
      page += 1;
    }
    Ok(books)
  }

  /// Downloads the PDF of every record that has one into `{output_dir}/pdf/`.
  #[instrument(skip_all, fields(records = records.len()))]
  pub async fn download_all(&self, records: &mut [BibliographicRecord]) -> DownloadSummary {
    let mut summary = DownloadSummary::default();
    for record in records.iter_mut() {
      summary.add(download_pdf(self.site.client(), record, &self.config.output_dir).await);
    }
    info!(
      downloaded = summary.downloaded,
      skipped = summary.skipped,
      failed = summary.failed,
      "Download finished"
    );
    summary
  }

  /// Looks up every record in the enrichment source and merges the results.
  ///
  /// A lookup that fails is logged and counted as failed. The record keeps its previous
  /// enrichment state and the pass continues.
  #[instrument(skip_all, fields(records = records.len(), source = self.source.name()))]
  pub async fn enrich_all(
    &self,
    records: Vec<BibliographicRecord>,
  ) -> (Vec<BibliographicRecord>, EnrichmentSummary) {
    let source = &self.source;
    let results: Vec<(BibliographicRecord, Option<MergeOutcome>)> = stream::iter(records)
      .map(|mut record| async move {
        let outcome = match source.lookup(&record).await {
          Ok(lookup) => Some(record.apply_lookup(&lookup)),
          Err(e) => {
            warn!("Lookup failed for {:?}: {e}", record.title());
            None
          },
        };
        (record, outcome)
      })
      .buffered(self.config.concurrency.max(1))
      .collect()
      .await;

    let mut summary = EnrichmentSummary::default();
    let records = results
      .into_iter()
      .map(|(record, outcome)| {
        summary.add(outcome);
        record
      })
      .collect();
    info!(
      found = summary.found,
      not_found = summary.not_found,
      failed = summary.failed,
      upgraded = summary.authors_upgraded,
      "Enrichment finished"
    );
    (records, summary)
  }
}
