//! Local HTTP stand-in for the certification API.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};
use url::Url;

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.params_named(name).next()
    }

    pub fn params_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn from_target(target: &str) -> Option<Self> {
        let url = Url::parse(&format!("http://localhost{target}")).ok()?;
        Some(Self {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        })
    }
}

/// Serves a fixed list of responses in order, then shuts down.
pub struct MockServer {
    base_url: String,
    requests: Receiver<RecordedRequest>,
}

impl MockServer {
    pub fn respond(status: u16, body: &str) -> Self {
        Self::sequence(vec![(status, body.to_string())])
    }

    pub fn sequence(responses: Vec<(u16, String)>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let base_url = format!("http://{}", server.server_addr());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok(request) = server.recv() else {
                    return;
                };
                if let Some(recorded) = RecordedRequest::from_target(request.url()) {
                    let _ = tx.send(recorded);
                }
                let content_type = Header::from_bytes("Content-Type", "application/json")
                    .expect("content type header");
                let _ = request.respond(
                    Response::from_string(body)
                        .with_status_code(StatusCode(status))
                        .with_header(content_type),
                );
            }
        });

        Self {
            base_url,
            requests: rx,
        }
    }

    /// A base URL nothing listens on.
    pub fn closed_base_url() -> String {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let base_url = format!("http://{}", server.server_addr());
        drop(server);
        base_url
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Next recorded request; panics if none arrives.
    pub fn request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("mock server received no request")
    }

    pub fn try_request(&self) -> Option<RecordedRequest> {
        self.requests.recv_timeout(Duration::from_millis(200)).ok()
    }
}
