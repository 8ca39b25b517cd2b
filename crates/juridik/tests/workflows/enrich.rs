use juridik::{harvester::EnrichmentSummary, retriever::libris::LibrisClient};

use super::*;

fn record(title: &str, authors: &[&str]) -> BibliographicRecord {
  BibliographicRecord::new(
    title,
    authors.iter().map(|a| parse_author_name(a)).collect(),
    "Monografi",
    Some("1956".to_string()),
    None,
  )
}

#[traced_test]
#[tokio::test]
async fn test_enrich_all_merges_and_preserves_order() {
  let server = serve(Vec::new()).await;
  let dir = tempdir().unwrap();
  let source = StubSource::default().with_match("Obligationsrätt", rodhe_match()).with_failure("Betalning");
  let harvester = harvester_with(&server, &dir, source);

  let records = vec![
    record("Obligationsrätt", &["Rodhe"]),
    record("Betalning", &["Stefan Lindskog"]),
    record("Köprätt", &["Jan Ramberg"]),
  ];
  let filenames: Vec<String> = records.iter().map(|r| r.filename().to_string()).collect();

  let (records, summary) = harvester.enrich_all(records).await;
  assert_eq!(summary, EnrichmentSummary {
    found:            1,
    not_found:        1,
    failed:           1,
    authors_upgraded: 1,
  });

  let titles: Vec<&str> = records.iter().map(|r| r.title()).collect();
  assert_eq!(titles, vec!["Obligationsrätt", "Betalning", "Köprätt"]);

  assert_eq!(records[0].citation_full(), "Knut Rodhe, Obligationsrätt, 1956");
  assert_eq!(records[0].enrichment.external_id.as_deref(), Some("7654321"));
  assert_eq!(records[0].enrichment.enrichment_found, Some(true));

  // A failed lookup leaves the record untouched; only a real answer sets the flag.
  assert_eq!(records[1].enrichment.enrichment_found, None);
  assert_eq!(records[2].enrichment.enrichment_found, Some(false));

  let after: Vec<String> = records.iter().map(|r| r.filename().to_string()).collect();
  assert_eq!(after, filenames);
}

#[tokio::test]
async fn test_enrich_with_single_task() {
  let server = serve(Vec::new()).await;
  let dir = tempdir().unwrap();
  let config = test_config(&server.base_url, dir.path()).with_concurrency(1);
  let source = StubSource::default().with_match("Obligationsrätt", rodhe_match());
  let harvester = Harvester::new(config, source).unwrap();

  let (records, summary) = harvester.enrich_all(vec![record("Obligationsrätt", &["Knut Rodhe"])]).await;
  assert_eq!(summary, EnrichmentSummary { found: 1, ..EnrichmentSummary::default() });
  assert!(records[0].is_enriched());
}

const ISBN_SEARCH: &str = r#"{"xsearch": {"list": [
  {"identifier": "http://libris.kb.se/bib/7654321", "type": "book", "creator": "Rodhe, Knut, 1909-1999"}
]}}"#;

const TITLE_SEARCH: &str = r#"{"xsearch": {"list": [
  {"identifier": "http://libris.kb.se/bib/222", "type": "article", "creator": "Someone, Else"},
  {"identifier": "http://libris.kb.se/bib/333", "type": "book", "creator": ["Lindskog, Stefan"]}
]}}"#;

const FULL_RECORD: &str = r#"
  <html><body>
    <h3>Ämnesord och genre</h3>
    <div><a href="/s/1">Obligationsrätt</a> <span class="beskrivning">Svenska ämnesord</span></div>
    <h3>Klassifikation</h3>
    <div><span>DDC</span> <a href="/c/1">346.02</a> <a title="SAB: Oeaa" href="/c/2">Oeaa</a></div>
    <h3>SAB-rubrik</h3>
    <div>Oeaa Obligationsrätt</div>
  </body></html>
"#;

#[tokio::test]
async fn test_libris_lookup_by_isbn() {
  let server = serve(vec![
    Route::json("/xsearch?query=isbn", ISBN_SEARCH),
    Route::html("/bib/7654321?vw=full", FULL_RECORD),
  ])
  .await;
  let dir = tempdir().unwrap();
  let libris = LibrisClient::new(&test_config(&server.base_url, dir.path())).unwrap();

  let mut record = record("Obligationsrätt", &["Rodhe"]);
  record.isbn = Some("9789100000001".to_string());

  let Lookup::Found(external) = libris.lookup(&record).await.unwrap() else {
    panic!("expected a match");
  };
  assert_eq!(external.external_id, "7654321");
  assert_eq!(external.raw_creator.as_deref(), Some("Rodhe, Knut, 1909-1999"));
  assert_eq!(external.subject_terms.len(), 1);
  let classification = external.classification.unwrap();
  assert_eq!(classification.ddc.as_deref(), Some("346.02"));
  assert_eq!(classification.sab.as_deref(), Some("Oeaa"));
  assert_eq!(classification.sab_description.as_deref(), Some("Oeaa Obligationsrätt"));

  assert_eq!(server.requests(), vec![
    "/xsearch?query=isbn%3A9789100000001&format=json".to_string(),
    "/bib/7654321?vw=full".to_string(),
  ]);
}

#[tokio::test]
async fn test_libris_lookup_falls_back_to_title() {
  let server = serve(vec![
    Route::json("/xsearch?query=isbn", r#"{"xsearch": {"list": []}}"#),
    Route::json("/xsearch?query=title", TITLE_SEARCH),
    Route::status("/bib/333", 503),
  ])
  .await;
  let dir = tempdir().unwrap();
  let libris = LibrisClient::new(&test_config(&server.base_url, dir.path())).unwrap();

  let mut record = record("Betalning", &["Stefan Lindskog"]);
  record.isbn = Some("9789139000000".to_string());

  // The full view is unavailable; the match itself still counts.
  let Lookup::Found(external) = libris.lookup(&record).await.unwrap() else {
    panic!("expected a match");
  };
  assert_eq!(external.external_id, "333");
  assert_eq!(external.raw_creator.as_deref(), Some("Lindskog, Stefan"));
  assert!(external.subject_terms.is_empty());
  assert_eq!(external.classification, None);
  assert_eq!(server.count("/xsearch?query=title%3A%28Betalning%29+author%3A%28Lindskog%29"), 1);
}

#[tokio::test]
async fn test_failed_pass_keeps_earlier_enrichment() {
  let server = serve(Vec::new()).await;
  let dir = tempdir().unwrap();

  let matching = harvester_with(
    &server,
    &dir,
    StubSource::default().with_match("Obligationsrätt", rodhe_match()),
  );
  let (records, _) = matching.enrich_all(vec![record("Obligationsrätt", &["Rodhe"])]).await;
  let enriched = records[0].clone();

  let failing = harvester_with(&server, &dir, StubSource::default().with_failure("Obligationsrätt"));
  let (records, summary) = failing.enrich_all(records).await;
  assert_eq!(summary, EnrichmentSummary { failed: 1, ..EnrichmentSummary::default() });
  assert_eq!(records[0], enriched);
  assert_eq!(records[0].enrichment.enrichment_found, Some(true));
  assert!(records[0].is_enriched());
  assert_eq!(Catalog::fold(records, chrono::Utc::now()).metadata.books_with_enrichment, 1);
}

#[tokio::test]
async fn test_libris_isbn_failure_falls_back_to_title() {
  let server = serve(vec![
    Route::status("/xsearch?query=isbn", 503),
    Route::json("/xsearch?query=title", TITLE_SEARCH),
    Route::html("/bib/333?vw=full", FULL_RECORD),
  ])
  .await;
  let dir = tempdir().unwrap();
  let libris = LibrisClient::new(&test_config(&server.base_url, dir.path())).unwrap();

  let mut record = record("Betalning", &["Stefan Lindskog"]);
  record.isbn = Some("9789139000000".to_string());

  let Lookup::Found(external) = libris.lookup(&record).await.unwrap() else {
    panic!("expected a match");
  };
  assert_eq!(external.external_id, "333");
  assert_eq!(external.subject_terms.len(), 1);
  assert_eq!(server.count("/xsearch?query=isbn"), 1);
  assert_eq!(server.count("/xsearch?query=title"), 1);
}

#[tokio::test]
async fn test_libris_not_found_and_unreachable() {
  let server = serve(vec![Route::json("/xsearch", r#"{"xsearch": {"list": []}}"#)]).await;
  let dir = tempdir().unwrap();
  let libris = LibrisClient::new(&test_config(&server.base_url, dir.path())).unwrap();
  let record = record("Okänd bok", &[]);
  assert_eq!(libris.lookup(&record).await.unwrap(), Lookup::NotFound);
  // No ISBN and an unknown author: a bare title search.
  assert_eq!(server.requests(), vec!["/xsearch?query=title%3A%28Ok%C3%A4nd+bok%29&format=json&n=5".to_string()]);

  let down = serve(vec![Route::status("/", 503)]).await;
  let libris = LibrisClient::new(&test_config(&down.base_url, dir.path())).unwrap();
  assert!(matches!(libris.lookup(&record).await, Err(HarvestError::ApiError(_))));
}
