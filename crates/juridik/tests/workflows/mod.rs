use super::*;

mod catalog;
mod crawl;
mod enrich;

const LISTING_FIRST: &str = r#"
  <html><body>
    <div class="book">
      <h3 class="title"><a href="/book/rodhe-obligationsratt">Obligationsrätt (1956)</a></h3>
      <a class="author" href="/author/rodhe">K. Rodhe</a>
    </div>
    <div class="book">
      <h3 class="title"><a href="/book/tiberg-skuldebrev">Skuldebrev, växel och check</a></h3>
      <p class="subtitle">En lärobok</p>
      <a class="author" href="/author/tiberg">Hugo Tiberg</a>
      <a class="author" href="/author/lennhammer">Dan Lennhammer</a>
    </div>
    <ul class="pagination">
      <li><a class="page-link" href="?p=0">1</a></li>
      <li><a class="page-link" href="?p=1">2</a></li>
    </ul>
  </body></html>
"#;

const LISTING_SECOND: &str = r#"
  <html><body>
    <div class="book">
      <h3 class="title"><a href="/book/lindskog-betalning">Betalning (2018)</a></h3>
      <a class="author" href="/author/lindskog">Stefan Lindskog</a>
    </div>
    <ul class="pagination">
      <li><a class="page-link" href="?p=0">1</a></li>
      <li><a class="page-link" href="?p=1">2</a></li>
    </ul>
  </body></html>
"#;

const DETAILS_RODHE: &str = r#"
  <html><body>
    <a href="/books/pdf?id=rodhe">Ladda ner</a>
    <dl class="details">
      <dt>ISBN</dt><dd>9789100000001</dd>
      <dt>Typ av verk</dt><dd>Monografi</dd>
    </dl>
  </body></html>
"#;

const DETAILS_TIBERG: &str = r#"
  <html><body>
    <a href="/books/pdf?id=tiberg">Ladda ner</a>
    <dl class="details">
      <dt>Upplaga</dt><dd>7</dd>
      <dt>Förlag &amp; år</dt><dd>Norstedts Juridik (1995)</dd>
      <dt>Typ av verk</dt><dd>Lärobok</dd>
      <dt>Ämnen</dt><dd><a href="/amne/civil">Civilrätt</a></dd>
    </dl>
  </body></html>
"#;

/// The three-book site: two listing pages, one missing detail page, one PDF that works
/// and one that does not.
pub async fn site_server() -> FixtureServer {
  serve(vec![
    Route::html("/Books/All?p=0", LISTING_FIRST),
    Route::html("/Books/All?p=1", LISTING_SECOND),
    Route::html("/book/rodhe-obligationsratt", DETAILS_RODHE),
    Route::html("/book/tiberg-skuldebrev", DETAILS_TIBERG),
    Route::status("/book/lindskog-betalning", 404),
    Route::pdf("/books/pdf?id=rodhe", 20_000),
    Route::status("/books/pdf?id=tiberg", 503),
  ])
  .await
}

pub fn harvester(server: &FixtureServer, output_dir: &TempDir) -> Harvester<StubSource> {
  harvester_with(server, output_dir, StubSource::default())
}

pub fn harvester_with(
  server: &FixtureServer,
  output_dir: &TempDir,
  source: StubSource,
) -> Harvester<StubSource> {
  Harvester::new(test_config(&server.base_url, output_dir.path()), source).unwrap()
}
