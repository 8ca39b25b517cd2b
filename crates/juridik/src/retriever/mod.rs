//! Fetching and extracting bibliographic data from the two remote sources.
//!
//! Both sources are plain HTTP services that expect considerate clients, so every request
//! goes through a [`PoliteClient`]: a shared [`reqwest::Client`] that waits a fixed delay
//! before each request and turns non-success statuses into [`HarvestError::ApiError`].
//!
//! - [`site`]: listing and detail pages of juridikbok.se (the primary source)
//! - [`libris`]: search and full record views of the LIBRIS union catalog
//!
//! The page parsers in both modules are pure functions over HTML or JSON text; only the
//! `fetch_*` methods touch the network.
//!
//! The union catalog sits behind the [`EnrichmentSource`] trait so the harvester can be
//! driven by any lookup implementation, e.g. an in-memory one in tests.

use super::*;
use crate::merge::Lookup;

pub mod libris;
pub mod site;

/// Request timeout for pages and API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Request timeout for PDF bodies.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// An HTTP client that waits before every request.
#[derive(Debug, Clone)]
pub struct PoliteClient {
  client: reqwest::Client,
  delay:  Duration,
}

impl PoliteClient {
  /// Builds a client with the configured user agent and politeness delay.
  pub fn new(config: &Config) -> Result<Self> {
    Self::with_delay(&config.user_agent, config.delay())
  }

  /// Builds a client with an explicit delay.
  pub fn with_delay(user_agent: &str, delay: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(user_agent)
      .redirect(reqwest::redirect::Policy::limited(5))
      .build()?;
    Ok(Self { client, delay })
  }

  /// The delay applied before each request.
  pub fn delay(&self) -> Duration { self.delay }

  /// Fetches `url` and returns the body as text.
  pub async fn get_text(&self, url: &str) -> Result<String> {
    let response = self.get(url, REQUEST_TIMEOUT).await?;
    Ok(response.text().await?)
  }

  /// Fetches `url` and returns the raw body, allowing the longer download timeout.
  pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
    let response = self.get(url, DOWNLOAD_TIMEOUT).await?;
    Ok(response.bytes().await?.to_vec())
  }

  #[instrument(skip(self, timeout), level = "debug")]
  async fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response> {
    tokio::time::sleep(self.delay).await;
    let response = self.client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
      trace!("{url} response: {response:?}");
      return Err(HarvestError::ApiError(format!("HTTP {status} for {url}")));
    }
    Ok(response)
  }
}

/// Resolves a possibly relative `href` against `base`.
///
/// # Examples
///
/// ```
/// # use juridik::retriever::absolute_url;
/// let url = absolute_url("https://www.juridikbok.se", "/book/9789139204213").unwrap();
/// assert_eq!(url, "https://www.juridikbok.se/book/9789139204213");
/// ```
pub fn absolute_url(base: &str, href: &str) -> Result<String> {
  let base = reqwest::Url::parse(base).map_err(|e| HarvestError::InvalidUrl(format!("{base}: {e}")))?;
  let url = base.join(href).map_err(|e| HarvestError::InvalidUrl(format!("{href}: {e}")))?;
  Ok(url.to_string())
}

/// A secondary catalog that can supply subject terms, classification and author names.
///
/// # Examples
///
/// ```
/// use juridik::{
///   merge::Lookup,
///   prelude::*,
///   record::BibliographicRecord,
/// };
///
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl EnrichmentSource for Offline {
///   fn name(&self) -> &str { "offline" }
///
///   async fn lookup(&self, _record: &BibliographicRecord) -> juridik::error::Result<Lookup> {
///     Ok(Lookup::NotFound)
///   }
/// }
/// ```
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
  /// Short name used in logs.
  fn name(&self) -> &str;

  /// Looks up the work described by `record`.
  ///
  /// `Ok(Lookup::NotFound)` means the catalog was reachable but had no match; `Err` means
  /// the catalog could not be asked.
  async fn lookup(&self, record: &BibliographicRecord) -> Result<Lookup>;
}
