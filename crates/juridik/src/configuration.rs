//! Harvester configuration.
//!
//! The configuration is a small TOML file, by default stored under the platform's config
//! directory:
//!
//! ```toml
//! output_dir = "/home/user/Documents/juridik"
//! delay_secs = 1.5
//! user_agent = "JuridikbokHarvester/2.0 (Access to Justice research project)"
//! site_base_url = "https://www.juridikbok.se"
//! union_catalog_url = "https://libris.kb.se"
//! page_size = 24
//! concurrency = 4
//! ```
//!
//! Every field has a default, so a partial file is valid.

use super::*;

/// Politeness delay applied before every request, in seconds.
pub const DEFAULT_DELAY_SECS: f64 = 1.5;
/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "JuridikbokHarvester/2.0 (Access to Justice research project)";
/// Base URL of the primary source.
pub const DEFAULT_SITE_BASE_URL: &str = "https://www.juridikbok.se";
/// Base URL of the union catalog.
pub const DEFAULT_UNION_CATALOG_URL: &str = "https://libris.kb.se";
/// Books requested per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 24;
/// Concurrent union catalog lookups.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Settings for a harvesting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Where the catalog and the `pdf/` directory are written
  pub output_dir:        PathBuf,
  /// Seconds to wait before each request
  pub delay_secs:        f64,
  /// User agent header
  pub user_agent:        String,
  /// Primary source base URL
  pub site_base_url:     String,
  /// Union catalog base URL
  pub union_catalog_url: String,
  /// Books per listing page
  pub page_size:         usize,
  /// Maximum number of concurrent enrichment lookups
  pub concurrency:       usize,
  /// Stop crawling after this many books
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_books:         Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:        Self::default_output_dir(),
      delay_secs:        DEFAULT_DELAY_SECS,
      user_agent:        DEFAULT_USER_AGENT.to_string(),
      site_base_url:     DEFAULT_SITE_BASE_URL.to_string(),
      union_catalog_url: DEFAULT_UNION_CATALOG_URL.to_string(),
      page_size:         DEFAULT_PAGE_SIZE,
      concurrency:       DEFAULT_CONCURRENCY,
      max_books:         None,
    }
  }
}

impl Config {
  /// Returns the default path for the configuration file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.config/juridik/config.toml`
  /// - On macOS: `~/Library/Application Support/juridik/config.toml`
  /// - On Windows: `%APPDATA%\juridik\config.toml`
  /// - Fallback: `./juridik/config.toml`
  ///
  /// # Examples
  ///
  /// ```
  /// let path = juridik::configuration::Config::default_path();
  /// assert!(path.ends_with("juridik/config.toml"));
  /// ```
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("juridik").join("config.toml")
  }

  /// Returns the default output directory, `~/Documents/juridik` where available.
  pub fn default_output_dir() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")).join("juridik")
  }

  /// Sets the output directory.
  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  /// Sets the politeness delay in seconds.
  pub fn with_delay_secs(mut self, delay_secs: f64) -> Self {
    self.delay_secs = delay_secs;
    self
  }

  /// Sets the user agent.
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  /// Sets the primary source base URL.
  pub fn with_site_base_url(mut self, url: impl Into<String>) -> Self {
    self.site_base_url = url.into();
    self
  }

  /// Sets the union catalog base URL.
  pub fn with_union_catalog_url(mut self, url: impl Into<String>) -> Self {
    self.union_catalog_url = url.into();
    self
  }

  /// Sets the enrichment concurrency.
  pub fn with_concurrency(mut self, concurrency: usize) -> Self {
    self.concurrency = concurrency;
    self
  }

  /// Caps the number of crawled books.
  pub fn with_max_books(mut self, max_books: Option<usize>) -> Self {
    self.max_books = max_books;
    self
  }

  /// The politeness delay as a [`Duration`]. Values [`Config::validate`] rejects map to
  /// zero.
  pub fn delay(&self) -> Duration {
    Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
  }

  /// Checks the values a run cannot work without.
  ///
  /// # Errors
  ///
  /// Returns [`HarvestError::Config`] for a zero page size or concurrency, a negative or
  /// non-finite delay, or a base URL that is not absolute.
  pub fn validate(&self) -> Result<()> {
    if self.page_size == 0 {
      return Err(HarvestError::Config("page_size must be at least 1".into()));
    }
    if self.concurrency == 0 {
      return Err(HarvestError::Config("concurrency must be at least 1".into()));
    }
    if !self.delay_secs.is_finite() || self.delay_secs < 0.0 {
      return Err(HarvestError::Config(format!("invalid delay_secs: {}", self.delay_secs)));
    }
    for url in [&self.site_base_url, &self.union_catalog_url] {
      reqwest::Url::parse(url).map_err(|e| HarvestError::InvalidUrl(format!("{url}: {e}")))?;
    }
    Ok(())
  }

  /// Reads and validates a configuration file.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use juridik::configuration::Config;
  /// let config = Config::load(Config::default_path())?;
  /// # Ok::<(), Box<dyn std::error::Error>>(())
  /// ```
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
  }

  /// Reads the configuration at `path` if it exists, the defaults otherwise.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes the configuration as TOML, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    info!("Configuration written to {}", path.display());
    Ok(())
  }
}
