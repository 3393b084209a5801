use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

pub const COMIC_PATH: &str = "/albo/sample-title";
pub const PAGES_PATH: &str = "/v1/pages";

pub const SAMPLE_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Sample Title - Fumetteria</title></head>
  <body>
    <h1>Sample Title</h1>
    <span id="author"> Jane Doe </span>
    <span id="pubdate">15 mar 2021</span>
    <span id="pages">128</span>
    <img id="cover" src="http://x/c.jpg"/>
    <div id="desc">Plot summary.</div>
  </body>
</html>
"#;

#[derive(Debug, Clone)]
pub struct StubConfig {
    pub page_html: String,
    pub page_status: u16,
    pub notion_status: u16,
    pub notion_body: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            page_html: SAMPLE_PAGE.to_owned(),
            page_status: 200,
            notion_status: 200,
            notion_body: r#"{"object":"page","id":"page_stub"}"#.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Serves the comic page and a minimal Notion `POST /v1/pages` from one
/// local server, recording every request it receives.
pub struct SiteStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SiteStub {
    pub fn spawn(config: StubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start site stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let headers = request
                    .headers()
                    .iter()
                    .map(|h| {
                        (
                            h.field.as_str().as_str().to_ascii_lowercase(),
                            h.value.as_str().to_owned(),
                        )
                    })
                    .collect();
                let method = request.method().to_string();
                let path = request.url().to_string();
                recorded.lock().expect("lock requests").push(RecordedRequest {
                    method: method.clone(),
                    path: path.clone(),
                    headers,
                    body,
                });

                let (status, body, content_type) = match (method.as_str(), path.as_str()) {
                    ("GET", COMIC_PATH) => {
                        (config.page_status, config.page_html.clone(), "text/html")
                    }
                    ("POST", PAGES_PATH) => (
                        config.notion_status,
                        config.notion_body.clone(),
                        "application/json",
                    ),
                    _ => (404, "not found".to_owned(), "text/plain"),
                };

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
                        .expect("build header");
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn comic_url(&self) -> String {
        format!("{}{COMIC_PATH}", self.base_url)
    }

    pub fn notion_base_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock requests").clone()
    }

    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == "POST")
            .collect()
    }
}

impl Drop for SiteStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
