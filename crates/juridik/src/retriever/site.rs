//! juridikbok.se listing and detail pages.
//!
//! The catalog is browsed page by page at `/Books/All?p={page}&ps={size}&s=0`. Each
//! listing entry is a `div.book` carrying the title (with the year in parentheses), the
//! detail page link, an optional subtitle and the author links. The detail page adds the
//! PDF link and a `dl.details` definition list:
//!
//! ```html
//! <dl class="details">
//!   <dt>ISBN</dt><dd>9789139204213</dd>
//!   <dt>Upplaga</dt><dd>7</dd>
//!   <dt>Förlag &amp; år</dt><dd>Norstedts Juridik (1995)</dd>
//!   <dt>Typ av verk</dt><dd>Lärobok</dd>
//!   <dt>Ämnen</dt><dd><a href="/amne/1">Civilrätt</a></dd>
//! </dl>
//! ```

use scraper::{ElementRef, Html, Selector};

use super::*;
use crate::record::RawBook;

lazy_static! {
  static ref BOOK: Selector = Selector::parse("div.book").unwrap();
  static ref TITLE_LINK: Selector = Selector::parse("h3.title a").unwrap();
  static ref SUBTITLE: Selector = Selector::parse("p.subtitle").unwrap();
  static ref AUTHOR: Selector = Selector::parse("a.author").unwrap();
  static ref PAGE_LINK: Selector = Selector::parse("ul.pagination a.page-link").unwrap();
  static ref PDF_LINK: Selector = Selector::parse(r#"a[href*="/books/pdf?"]"#).unwrap();
  static ref DETAILS: Selector = Selector::parse("dl.details").unwrap();
  static ref LINK: Selector = Selector::parse("a").unwrap();
  static ref TRAILING_YEAR: Regex = Regex::new(r"\s*\((\d{4})\)\s*$").unwrap();
  static ref PAREN_YEAR: Regex = Regex::new(r"\((\d{4})\)").unwrap();
}

/// One parsed listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
  /// Books in page order; entries without a title are dropped
  pub books:     Vec<RawBook>,
  /// Highest page number shown in the pagination bar
  pub last_page: Option<u32>,
}

impl ListingPage {
  /// Whether the page after the zero-based `page` exists.
  pub fn has_next(&self, page: u32) -> bool {
    !self.books.is_empty() && self.last_page.is_some_and(|last| page + 1 < last)
  }
}

/// Metadata from a detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDetails {
  /// Absolute PDF link
  pub pdf_url:   Option<String>,
  /// ISBN
  pub isbn:      Option<String>,
  /// URN
  pub urn:       Option<String>,
  /// URN resolver link
  pub urn_url:   Option<String>,
  /// Edition ("Upplaga")
  pub edition:   Option<String>,
  /// Publisher and year ("Förlag & år")
  pub publisher: Option<String>,
  /// Year found in the publisher line
  pub year:      Option<String>,
  /// Series ("Serie")
  pub series:    Option<String>,
  /// Work type ("Typ av verk")
  pub book_type: Option<String>,
  /// Subject labels ("Ämnen")
  pub subjects:  Vec<String>,
}

impl BookDetails {
  /// Copies the details onto a listing entry. The listing year wins over the publisher
  /// line year.
  pub fn apply_to(self, raw: &mut RawBook) {
    raw.pdf_url = self.pdf_url;
    raw.isbn = self.isbn;
    raw.urn = self.urn;
    raw.urn_url = self.urn_url;
    raw.edition = self.edition;
    raw.publisher = self.publisher;
    raw.series = self.series;
    raw.book_type = self.book_type;
    raw.subjects = self.subjects;
    if raw.year.is_none() {
      raw.year = self.year;
    }
  }
}

/// Parses a listing page. Relative links are resolved against `base_url`.
pub fn parse_listing(html: &str, base_url: &str) -> ListingPage {
  let document = Html::parse_document(html);

  let books = document.select(&BOOK).filter_map(|book| parse_listing_entry(book, base_url)).collect();
  let last_page = document
    .select(&PAGE_LINK)
    .filter_map(|link| element_text(link).parse::<u32>().ok())
    .max();

  ListingPage { books, last_page }
}

fn parse_listing_entry(book: ElementRef, base_url: &str) -> Option<RawBook> {
  let link = book.select(&TITLE_LINK).next()?;
  let (title, year) = split_title_year(&element_text(link));
  if title.is_empty() {
    return None;
  }

  Some(RawBook {
    title: Some(title),
    year,
    subtitle: book.select(&SUBTITLE).next().map(element_text).filter(|s| !s.is_empty()),
    detail_url: link.value().attr("href").and_then(|href| absolute_url(base_url, href).ok()),
    authors: book.select(&AUTHOR).map(element_text).filter(|a| !a.is_empty()).collect(),
    ..RawBook::default()
  })
}

/// Splits `"Obligationsrätt (1956)"` into the title and the year.
pub fn split_title_year(raw_title: &str) -> (String, Option<String>) {
  match TRAILING_YEAR.captures(raw_title) {
    Some(cap) => {
      let year = cap.get(1).map(|m| m.as_str().to_string());
      (TRAILING_YEAR.replace(raw_title, "").trim().to_string(), year)
    },
    None => (raw_title.trim().to_string(), None),
  }
}

/// Parses a detail page. Relative links are resolved against `base_url`.
pub fn parse_details(html: &str, base_url: &str) -> BookDetails {
  let document = Html::parse_document(html);
  let mut details = BookDetails {
    pdf_url: document
      .select(&PDF_LINK)
      .next()
      .and_then(|link| link.value().attr("href"))
      .and_then(|href| absolute_url(base_url, href).ok()),
    ..BookDetails::default()
  };

  let Some(list) = document.select(&DETAILS).next() else {
    return details;
  };

  let mut key: Option<String> = None;
  for child in list.children().filter_map(ElementRef::wrap) {
    match child.value().name() {
      "dt" => key = Some(element_text(child)),
      "dd" =>
        if let Some(key) = key.take() {
          read_detail(&mut details, &key, child);
        },
      _ => {},
    }
  }
  details
}

fn read_detail(details: &mut BookDetails, key: &str, value: ElementRef) {
  let text = element_text(value);
  match key {
    "ISBN" => details.isbn = Some(text),
    "URN" =>
      if let Some(link) = value.select(&LINK).next() {
        details.urn = Some(element_text(link));
        details.urn_url = link.value().attr("href").map(String::from);
      },
    "Upplaga" => details.edition = Some(text),
    "Förlag & år" => {
      details.year = PAREN_YEAR.captures(&text).and_then(|cap| cap.get(1)).map(|m| m.as_str().to_string());
      details.publisher = Some(text);
    },
    "Serie" => details.series = Some(text),
    "Typ av verk" => details.book_type = Some(text),
    "Ämnen" => {
      let links: Vec<String> =
        value.select(&LINK).map(element_text).filter(|s| !s.is_empty()).collect();
      details.subjects = if !links.is_empty() {
        links
      } else if text.is_empty() {
        Vec::new()
      } else {
        vec![text]
      };
    },
    other => trace!("Ignoring detail field {other:?}"),
  }
}

/// Text content with whitespace runs collapsed.
pub(crate) fn element_text(element: ElementRef) -> String {
  element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Fetches pages from juridikbok.se.
#[derive(Debug, Clone)]
pub struct SiteClient {
  client:    PoliteClient,
  base_url:  String,
  page_size: usize,
}

impl SiteClient {
  /// Builds a client from the configuration.
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self {
      client:    PoliteClient::new(config)?,
      base_url:  config.site_base_url.trim_end_matches('/').to_string(),
      page_size: config.page_size,
    })
  }

  /// The shared HTTP client.
  pub fn client(&self) -> &PoliteClient { &self.client }

  /// URL of the zero-based listing page.
  pub fn listing_url(&self, page: u32) -> String {
    format!("{}/Books/All?p={page}&ps={}&s=0", self.base_url, self.page_size)
  }

  /// Fetches and parses a listing page.
  pub async fn fetch_listing(&self, page: u32) -> Result<ListingPage> {
    let html = self.client.get_text(&self.listing_url(page)).await?;
    let listing = parse_listing(&html, &self.base_url);
    debug!(page, books = listing.books.len(), last_page = ?listing.last_page, "Parsed listing page");
    Ok(listing)
  }

  /// Fetches and parses a detail page.
  pub async fn fetch_details(&self, detail_url: &str) -> Result<BookDetails> {
    let html = self.client.get_text(detail_url).await?;
    Ok(parse_details(&html, &self.base_url))
  }
}
