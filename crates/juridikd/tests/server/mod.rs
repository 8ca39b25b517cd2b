//! Canned HTTP responses on localhost for runs of the binary.

use std::sync::{Arc, Mutex};

use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::TcpListener,
};

/// A response for every request target starting with `prefix`.
pub struct Route {
  prefix:       &'static str,
  content_type: &'static str,
  body:         &'static str,
}

impl Route {
  pub fn html(prefix: &'static str, body: &'static str) -> Self {
    Self { prefix, content_type: "text/html; charset=utf-8", body }
  }

  pub fn json(prefix: &'static str, body: &'static str) -> Self {
    Self { prefix, content_type: "application/json", body }
  }
}

pub struct FixtureServer {
  pub base_url: String,
  requests:     Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
  pub fn count(&self, prefix: &str) -> usize {
    self.requests.lock().unwrap().iter().filter(|target| target.starts_with(prefix)).count()
  }
}

/// Serves `routes` on an ephemeral port until the runtime shuts down. Unknown targets get
/// a 404.
pub async fn serve(routes: Vec<Route>) -> FixtureServer {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let base_url = format!("http://{}", listener.local_addr().unwrap());
  let routes = Arc::new(routes);
  let requests = Arc::new(Mutex::new(Vec::new()));

  let seen = Arc::clone(&requests);
  tokio::spawn(async move {
    while let Ok((mut socket, _)) = listener.accept().await {
      let routes = Arc::clone(&routes);
      let seen = Arc::clone(&seen);
      tokio::spawn(async move {
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
          match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
          }
        }

        let request = String::from_utf8_lossy(&request);
        let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
        seen.lock().unwrap().push(target.clone());

        let (status, content_type, body) =
          match routes.iter().find(|route| target.starts_with(route.prefix)) {
            Some(route) => ("200 OK", route.content_type, route.body),
            None => ("404 Not Found", "text/plain", "not found"),
          };
        let response = format!(
          "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: \
           close\r\n\r\n{body}",
          body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
      });
    }
  });

  FixtureServer { base_url, requests }
}
