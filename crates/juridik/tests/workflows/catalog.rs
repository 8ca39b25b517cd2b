use chrono::Utc;
use juridik::catalog::CATALOG_FILE;

use super::*;

#[traced_test]
#[tokio::test]
async fn test_full_run_round_trips_through_catalog() -> TestResult<()> {
  let server = site_server().await;
  let dir = tempdir()?;
  let source = StubSource::default().with_match("Obligationsrätt", rodhe_match());
  let harvester = harvester_with(&server, &dir, source);

  let mut books = harvester.crawl().await?;
  harvester.download_all(&mut books).await;
  let (books, _) = harvester.enrich_all(books).await;

  let catalog = Catalog::fold(books, Utc::now());
  assert_eq!(catalog.metadata.total_books, 3);
  assert_eq!(catalog.metadata.books_with_pdf, 2);
  assert_eq!(catalog.metadata.books_with_enrichment, 1);

  let path = catalog.save(dir.path())?;
  assert_eq!(path, dir.path().join(CATALOG_FILE));

  let loaded = Catalog::load(dir.path())?.expect("catalog was just written");
  assert_eq!(loaded, catalog);

  let rodhe = &loaded.books[0];
  assert_eq!(rodhe.citation_full(), "Knut Rodhe, Obligationsrätt, 1956");
  assert_eq!(rodhe.citation_short(), "Rodhe, Obligationsrätt");
  // The PDF was stored before enrichment and keeps its name.
  assert_eq!(rodhe.filename(), "1956 - bok - Rodhe - Obligationsratt.pdf");
  assert!(dir.path().join("pdf").join(rodhe.filename()).exists());
  Ok(())
}

#[test]
fn test_enrichment_survives_reload() -> TestResult<()> {
  let dir = tempdir()?;
  let server_dir = tempdir()?;

  let (books, summary) = tokio_test::block_on(async {
    let server = serve(Vec::new()).await;
    let source = StubSource::default().with_match("Obligationsrätt", rodhe_match());
    let harvester = harvester_with(&server, &server_dir, source);
    let record = BibliographicRecord::new(
      "Obligationsrätt",
      vec![parse_author_name("Rodhe")],
      "Monografi",
      Some("1956".to_string()),
      None,
    );
    harvester.enrich_all(vec![record]).await
  });
  assert_eq!(summary.authors_upgraded, 1);

  Catalog::fold(books, Utc::now()).save(dir.path())?;
  let loaded = Catalog::load(dir.path())?.expect("catalog was just written");
  let record = &loaded.books[0];

  assert_eq!(record.authors()[0].full, "Knut Rodhe");
  assert_eq!(record.enrichment.subject_terms[0].term, "Obligationsrätt");
  assert_eq!(record.enrichment.classification.as_ref().and_then(|c| c.sab.as_deref()), Some("Oeaa"));
  // Setters on a reloaded record re-derive everything, including the filename.
  let mut record = record.clone();
  record.set_edition(Some("2".to_string()));
  assert_eq!(record.citation_full(), "Knut Rodhe, Obligationsrätt, 2 uppl. 1956");
  assert_eq!(record.filename(), "1956 - bok - Rodhe - Obligationsratt - 2uppl.pdf");
  Ok(())
}

#[test]
fn test_missing_catalog() -> TestResult<()> {
  let dir = tempdir()?;
  assert!(Catalog::load(dir.path())?.is_none());
  Ok(())
}
