use juridik::pdf::{DownloadSummary, PDF_DIR};

use super::*;

#[traced_test]
#[tokio::test]
async fn test_crawl_all_pages() {
  let server = site_server().await;
  let dir = tempdir().unwrap();
  let books = harvester(&server, &dir).crawl().await.unwrap();

  assert_eq!(server.count("/Books/All"), 2);
  assert_eq!(books.len(), 3);

  let rodhe = &books[0];
  assert_eq!(rodhe.title(), "Obligationsrätt");
  assert_eq!(rodhe.year(), Some("1956"));
  assert_eq!(rodhe.isbn.as_deref(), Some("9789100000001"));
  assert_eq!(rodhe.site_id.as_deref(), Some("rodhe-obligationsratt"));
  assert_eq!(rodhe.pdf_url, Some(format!("{}/books/pdf?id=rodhe", server.base_url)));
  assert_eq!(rodhe.filename(), "1956 - bok - Rodhe - Obligationsratt.pdf");
  assert_eq!(rodhe.citation_full(), "K. Rodhe, Obligationsrätt, 1956");

  let tiberg = &books[1];
  assert_eq!(tiberg.year(), Some("1995"));
  assert_eq!(tiberg.subtitle.as_deref(), Some("En lärobok"));
  assert_eq!(tiberg.site_subjects, vec!["Civilrätt".to_string()]);
  assert_eq!(
    tiberg.citation_full(),
    "Hugo Tiberg och Dan Lennhammer, Skuldebrev, växel och check, 7 uppl. 1995"
  );
  assert_eq!(
    tiberg.filename(),
    "1995 - bok - Tiberg, Lennhammer - Skuldebrev, vaxel och check - 7uppl.pdf"
  );

  // The detail page is gone; the listing data is kept.
  let lindskog = &books[2];
  assert_eq!(lindskog.title(), "Betalning");
  assert_eq!(lindskog.pdf_url, None);
  assert_eq!(lindskog.filename(), "2018 - bok - Lindskog - Betalning.pdf");
  assert_eq!(server.count("/book/lindskog-betalning"), 1);
}

#[tokio::test]
async fn test_crawl_honors_max_books() {
  let server = site_server().await;
  let dir = tempdir().unwrap();
  let config = test_config(&server.base_url, dir.path()).with_max_books(Some(1));
  let harvester = Harvester::new(config, StubSource::default()).unwrap();

  let books = harvester.crawl().await.unwrap();
  assert_eq!(books.len(), 1);
  assert_eq!(books[0].title(), "Obligationsrätt");
  assert_eq!(server.count("/Books/All"), 1);
  assert_eq!(server.count("/book/"), 1);
}

#[tokio::test]
async fn test_crawl_fails_when_site_is_down() {
  let server = serve(vec![Route::status("/", 503)]).await;
  let dir = tempdir().unwrap();
  let result = harvester(&server, &dir).crawl().await;
  assert!(matches!(result, Err(HarvestError::ApiError(_))));
}

#[traced_test]
#[tokio::test]
async fn test_download_then_skip_existing() {
  let server = site_server().await;
  let dir = tempdir().unwrap();
  let harvester = harvester(&server, &dir);
  let mut books = harvester.crawl().await.unwrap();

  let first = harvester.download_all(&mut books).await;
  assert_eq!(first, DownloadSummary { downloaded: 1, skipped: 0, failed: 1, no_pdf: 1 });

  let stored = dir.path().join(PDF_DIR).join(books[0].filename());
  assert_eq!(std::fs::metadata(&stored).unwrap().len(), 20_000);
  assert_eq!(books[0].download.pdf_path.as_deref(), Some(stored.as_path()));
  assert_eq!(books[0].download.pdf_size_mb, Some(0.0));
  assert_eq!(books[0].download.pdf_downloaded, Some(true));

  assert_eq!(books[1].download.pdf_downloaded, Some(false));
  assert!(books[1].download.pdf_error.as_deref().unwrap().contains("503"));
  assert_eq!(books[2].download.pdf_downloaded, None);

  let second = harvester.download_all(&mut books).await;
  assert_eq!(second, DownloadSummary { downloaded: 0, skipped: 1, failed: 1, no_pdf: 1 });
  assert_eq!(server.count("/books/pdf?id=rodhe"), 1);
}
