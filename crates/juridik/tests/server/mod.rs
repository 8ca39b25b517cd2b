//! A minimal HTTP/1.1 server on localhost serving canned responses.

use std::sync::{Arc, Mutex};

use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::TcpListener,
};

/// A canned response for every request target starting with `prefix`.
#[derive(Clone)]
pub struct Route {
  pub prefix:       String,
  pub status:       u16,
  pub content_type: &'static str,
  pub body:         Vec<u8>,
}

impl Route {
  pub fn html(prefix: &str, body: &str) -> Self {
    Self {
      prefix:       prefix.to_string(),
      status:       200,
      content_type: "text/html; charset=utf-8",
      body:         body.as_bytes().to_vec(),
    }
  }

  pub fn json(prefix: &str, body: &str) -> Self {
    Self { content_type: "application/json", ..Self::html(prefix, body) }
  }

  pub fn pdf(prefix: &str, size: usize) -> Self {
    Self {
      prefix:       prefix.to_string(),
      status:       200,
      content_type: "application/pdf",
      body:         vec![b'%'; size],
    }
  }

  pub fn status(prefix: &str, status: u16) -> Self {
    Self { status, content_type: "text/plain", ..Self::html(prefix, "") }
  }
}

pub struct FixtureServer {
  pub base_url: String,
  requests:     Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
  /// Request targets received so far, in arrival order.
  pub fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }

  pub fn count(&self, prefix: &str) -> usize {
    self.requests().iter().filter(|target| target.starts_with(prefix)).count()
  }
}

/// Starts a server on an ephemeral port. The first matching route answers; anything else
/// gets a 404.
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

        let route = routes.iter().find(|route| target.starts_with(&route.prefix));
        let (status, content_type, body) = match route {
          Some(route) => (route.status, route.content_type, route.body.clone()),
          None => (404, "text/plain", b"not found".to_vec()),
        };
        let head = format!(
          "HTTP/1.1 {status} {}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: \
           close\r\n\r\n",
          reason(status),
          body.len()
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(&body).await;
        let _ = socket.shutdown().await;
      });
    }
  });

  FixtureServer { base_url, requests }
}

fn reason(status: u16) -> &'static str {
  match status {
    200 => "OK",
    404 => "Not Found",
    503 => "Service Unavailable",
    _ => "Unknown",
  }
}
