//! The LIBRIS union catalog.
//!
//! A lookup has two steps. First the JSON search endpoint `xsearch` is asked, by ISBN when
//! the record has one. Without an ISBN hit, or when that search fails, it is asked by
//! title and surname. The hit's `identifier` is a URL
//! ending in `/bib/{id}`. Then the HTML full view of that bib record is read for subject
//! headings and classification codes.
//!
//! Search hits are loosely shaped: `creator` may be a single string, a list, or missing.
//! It is decoded to `Option<String>` right here so the rest of the crate never sees the
//! variants.

use scraper::{ElementRef, Html, Selector};

use super::{site::element_text, *};
use crate::merge::{ExternalMatch, Lookup};

lazy_static! {
  static ref BIB_ID: Regex = Regex::new(r"/bib/(\w+)").unwrap();
  static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
  static ref HEADING: Selector = Selector::parse("h3").unwrap();
  static ref DIV: Selector = Selector::parse("div").unwrap();
  static ref LINK: Selector = Selector::parse("a").unwrap();
  static ref SAB_LINK: Selector = Selector::parse(r#"a[title*="SAB:"]"#).unwrap();
}

const SUBJECTS_HEADING: &str = "Ämnesord och genre";
const CLASSIFICATION_HEADING: &str = "Klassifikation";
const SAB_HEADING: &str = "SAB-rubrik";
/// Longest cleaned title sent in a title search.
const MAX_QUERY_TITLE_LENGTH: usize = 50;
/// Hits requested in a title search.
const TITLE_SEARCH_HITS: u32 = 5;

/// One entry of an `xsearch` result list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchHit {
  /// Record URL, e.g. `http://libris.kb.se/bib/7654321`
  #[serde(default)]
  pub identifier: String,
  /// Material type, `"book"` for printed and electronic books
  #[serde(default, rename = "type")]
  pub kind:       Option<String>,
  /// First named creator in inverted notation
  #[serde(default, deserialize_with = "deserialize_creator")]
  pub creator:    Option<String>,
}

impl SearchHit {
  /// The bib id in the identifier URL.
  pub fn bib_id(&self) -> Option<String> {
    BIB_ID.captures(&self.identifier).and_then(|cap| cap.get(1)).map(|m| m.as_str().to_string())
  }

  fn is_book(&self) -> bool { self.kind.as_deref() == Some("book") }
}

/// The raw `creator` shapes seen in `xsearch` responses.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatorField {
  Name(String),
  Names(Vec<serde_json::Value>),
  Other(serde_json::Value),
}

impl CreatorField {
  fn into_name(self) -> Option<String> {
    let name = match self {
      CreatorField::Name(name) => Some(name),
      CreatorField::Names(names) =>
        names.into_iter().find_map(|value| value.as_str().map(String::from).filter(|s| !s.trim().is_empty())),
      CreatorField::Other(_) => None,
    };
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
  }
}

fn deserialize_creator<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where D: serde::Deserializer<'de> {
  Ok(CreatorField::deserialize(deserializer)?.into_name())
}

#[derive(Deserialize)]
struct SearchResponse {
  #[serde(default)]
  xsearch: SearchList,
}

#[derive(Default, Deserialize)]
struct SearchList {
  #[serde(default)]
  list: Vec<SearchHit>,
}

/// Decodes an `xsearch` JSON response into its hits.
pub fn parse_search(json: &str) -> Result<Vec<SearchHit>> {
  let response: SearchResponse = serde_json::from_str(json)?;
  Ok(response.xsearch.list)
}

/// A search hit chosen as the record's match.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
  /// The bib id
  pub bib_id:  String,
  /// The hit's identifier URL
  pub url:     String,
  /// The hit's creator
  pub creator: Option<String>,
}

impl Candidate {
  fn from_hit(hit: &SearchHit) -> Option<Self> {
    Some(Self { bib_id: hit.bib_id()?, url: hit.identifier.clone(), creator: hit.creator.clone() })
  }
}

/// Picks the ISBN match: the first book with a bib id, else the first hit if it has one.
pub fn select_isbn_match(hits: &[SearchHit]) -> Option<Candidate> {
  hits
    .iter()
    .filter(|hit| hit.is_book())
    .find_map(Candidate::from_hit)
    .or_else(|| hits.first().and_then(Candidate::from_hit))
}

/// Picks the title match: the first book with a bib id. Other material types never match.
pub fn select_title_match(hits: &[SearchHit]) -> Option<Candidate> {
  hits.iter().filter(|hit| hit.is_book()).find_map(Candidate::from_hit)
}

/// Builds the title/author query, e.g. `title:(Obligationsratt) author:(Rodhe)`.
///
/// Punctuation is removed from the title and it is cut to 50 characters.
pub fn title_author_query(title: &str, surname: Option<&str>) -> String {
  let clean: String = NON_WORD.replace_all(title, "").chars().take(MAX_QUERY_TITLE_LENGTH).collect();
  let mut query = format!("title:({})", clean.trim());
  if let Some(surname) = surname.and_then(|s| s.split_whitespace().last()) {
    query.push_str(&format!(" author:({surname})"));
  }
  query
}

/// Subject headings and classification from a full record view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullRecord {
  /// Subject headings with their vocabularies
  pub subject_terms:  Vec<SubjectTerm>,
  /// Classification codes, `None` when the record lists none
  pub classification: Option<Classification>,
}

/// Parses the HTML full view (`/bib/{id}?vw=full`).
pub fn parse_full_record(html: &str) -> FullRecord {
  let document = Html::parse_document(html);
  FullRecord {
    subject_terms:  section_body(&document, SUBJECTS_HEADING).map(subject_terms).unwrap_or_default(),
    classification: section_body(&document, CLASSIFICATION_HEADING)
      .map(|body| classification(&document, body))
      .filter(|c| !c.is_empty()),
  }
}

/// The first `div` following the `h3` whose text contains `title`.
fn section_body<'a>(document: &'a Html, title: &str) -> Option<ElementRef<'a>> {
  let heading = document.select(&HEADING).find(|h| element_text(*h).contains(title))?;
  heading.next_siblings().filter_map(ElementRef::wrap).find_map(|sibling| {
    if sibling.value().name() == "div" {
      Some(sibling)
    } else {
      sibling.select(&DIV).next()
    }
  })
}

fn subject_terms(body: ElementRef) -> Vec<SubjectTerm> {
  body
    .select(&LINK)
    .map(|link| SubjectTerm { term: element_text(link), system: vocabulary_of(link) })
    .filter(|subject| !subject.term.is_empty())
    .collect()
}

/// The `span.beskrivning` after a subject link, up to the next link.
fn vocabulary_of(link: ElementRef) -> String {
  link
    .next_siblings()
    .filter_map(ElementRef::wrap)
    .take_while(|sibling| sibling.value().name() != "a")
    .find(|sibling| {
      sibling.value().name() == "span" && sibling.value().classes().any(|c| c == "beskrivning")
    })
    .map(element_text)
    .unwrap_or_default()
}

#[derive(Clone, Copy)]
enum Scheme {
  Ddc,
  Udk,
}

fn classification(document: &Html, body: ElementRef) -> Classification {
  let mut classification = Classification::default();

  // A scheme label is a span; its code is the next link.
  let mut pending: Option<Scheme> = None;
  for element in body.descendants().filter_map(ElementRef::wrap) {
    match element.value().name() {
      "span" => {
        let label = element_text(element);
        if label.contains("DDC") {
          pending = Some(Scheme::Ddc);
        } else if label.contains("UDK") {
          pending = Some(Scheme::Udk);
        }
      },
      "a" =>
        if let Some(scheme) = pending.take() {
          let code = Some(element_text(element));
          match scheme {
            Scheme::Ddc => classification.ddc = code,
            Scheme::Udk => classification.udk = code,
          }
        },
      _ => {},
    }
  }

  classification.sab = body.select(&SAB_LINK).map(element_text).filter(|s| !s.is_empty()).last();
  if classification.sab.is_some() {
    classification.sab_description =
      section_body(document, SAB_HEADING).map(element_text).filter(|s| !s.is_empty());
  }
  classification
}

/// Client for the LIBRIS search API and record pages.
#[derive(Debug, Clone)]
pub struct LibrisClient {
  client:   PoliteClient,
  base_url: String,
}

impl LibrisClient {
  /// Builds a client from the configuration. LIBRIS is asked at half the site's delay.
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self {
      client:   PoliteClient::with_delay(&config.user_agent, config.delay() / 2)?,
      base_url: config.union_catalog_url.trim_end_matches('/').to_string(),
    })
  }

  /// URL of an `xsearch` query.
  pub fn search_url(&self, query: &str, hits: Option<u32>) -> Result<String> {
    let endpoint = format!("{}/xsearch", self.base_url);
    let mut url =
      reqwest::Url::parse(&endpoint).map_err(|e| HarvestError::InvalidUrl(format!("{endpoint}: {e}")))?;
    url.query_pairs_mut().append_pair("query", query).append_pair("format", "json");
    if let Some(n) = hits {
      url.query_pairs_mut().append_pair("n", &n.to_string());
    }
    Ok(url.to_string())
  }

  /// URL of a record's full view.
  pub fn full_record_url(&self, bib_id: &str) -> String {
    format!("{}/bib/{bib_id}?vw=full", self.base_url)
  }

  /// Searches by ISBN.
  pub async fn search_by_isbn(&self, isbn: &str) -> Result<Option<Candidate>> {
    let url = self.search_url(&format!("isbn:{isbn}"), None)?;
    let hits = parse_search(&self.client.get_text(&url).await?)?;
    Ok(select_isbn_match(&hits))
  }

  /// Searches by title and, when known, the primary author's surname.
  pub async fn search_by_title_author(
    &self,
    title: &str,
    surname: Option<&str>,
  ) -> Result<Option<Candidate>> {
    let url = self.search_url(&title_author_query(title, surname), Some(TITLE_SEARCH_HITS))?;
    let hits = parse_search(&self.client.get_text(&url).await?)?;
    Ok(select_title_match(&hits))
  }

  /// Fetches and parses a record's full view.
  pub async fn fetch_full_record(&self, bib_id: &str) -> Result<FullRecord> {
    let html = self.client.get_text(&self.full_record_url(bib_id)).await?;
    Ok(parse_full_record(&html))
  }
}

#[async_trait]
impl EnrichmentSource for LibrisClient {
  fn name(&self) -> &str { "libris" }

  #[instrument(skip_all, fields(title = %record.title()))]
  async fn lookup(&self, record: &BibliographicRecord) -> Result<Lookup> {
    let mut candidate = None;
    if let Some(isbn) = record.isbn.as_deref().map(str::trim).filter(|isbn| !isbn.is_empty()) {
      candidate = match self.search_by_isbn(isbn).await {
        Ok(candidate) => candidate,
        Err(e) => {
          warn!("ISBN search for {isbn} failed, trying title and author: {e}");
          None
        },
      };
    }
    if candidate.is_none() {
      let primary = &record.authors()[0];
      let surname = (!primary.is_unknown()).then_some(primary.last.as_str());
      candidate = self.search_by_title_author(record.title(), surname).await?;
    }

    let Some(candidate) = candidate else {
      debug!("No LIBRIS match");
      return Ok(Lookup::NotFound);
    };

    let full = match self.fetch_full_record(&candidate.bib_id).await {
      Ok(full) => full,
      Err(e) => {
        warn!("Could not read LIBRIS record {}: {e}", candidate.bib_id);
        FullRecord::default()
      },
    };

    debug!(bib_id = %candidate.bib_id, subjects = full.subject_terms.len(), "LIBRIS match");
    Ok(Lookup::Found(ExternalMatch {
      external_id:    candidate.bib_id,
      source_url:     candidate.url,
      raw_creator:    candidate.creator,
      subject_terms:  full.subject_terms,
      classification: full.classification,
    }))
  }
}
