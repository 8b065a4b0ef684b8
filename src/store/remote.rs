use crate::models::state::AppState;
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no remote endpoint configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The single JSON document behind the spreadsheet endpoint.
pub trait DocumentStore: Send + Sync {
    /// Read the whole stored document.
    fn fetch(&self) -> Result<Value, RemoteError>;

    /// Replace the stored document. Completion means the transport accepted
    /// the request, not that the store applied it.
    fn save(&self, state: &AppState) -> Result<(), RemoteError>;
}

/// Endpoint origin + path, with any query string or fragment dropped.
pub fn clean_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(mut u) => {
            u.set_query(None);
            u.set_fragment(None);
            u.to_string()
        }
        Err(_) => raw.trim().to_string(),
    }
}

/// Body of the write action.
pub fn save_payload(state: &AppState) -> Value {
    json!({
        "action": "saveData",
        "data": {
            "links":  state.links,
            "theme":  state.theme,
            "config": state.config,
            "layout": state.layout,
        }
    })
}

// ── HTTP implementation ────────────────────────────────────────────────

pub struct HttpDocumentStore {
    endpoint:     String,
    read_timeout: Duration,
    client:       Client,
}

impl HttpDocumentStore {
    pub fn new(endpoint: &str, read_timeout: Duration) -> Result<Self, RemoteError> {
        if endpoint.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        // Writes wait as long as the store takes; reads set their own limit.
        let client = Client::builder()
            .user_agent(concat!("linkhub/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { endpoint: clean_url(endpoint), read_timeout, client })
    }
}

impl DocumentStore for HttpDocumentStore {
    fn fetch(&self) -> Result<Value, RemoteError> {
        let buster = chrono::Utc::now().timestamp_millis().to_string();
        let resp = self.client
            .get(&self.endpoint)
            .query(&[("action", "getData"), ("t", buster.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.read_timeout)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, state: &AppState) -> Result<(), RemoteError> {
        let body = serde_json::to_string(&save_payload(state))?;
        // The store answers cross-origin with an opaque body; only the
        // transport outcome counts.
        self.client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::state::Defaults;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Accept one request, read it fully, wait `delay`, then answer 200.
    fn slow_endpoint(delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = conn.read(&mut buf).unwrap();
                if n == 0 { break; }
                req.extend_from_slice(&buf[..n]);
                if request_complete(&req) { break; }
            }
            thread::sleep(delay);
            let _ = conn.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        });
        format!("http://{addr}/exec")
    }

    fn request_complete(req: &[u8]) -> bool {
        let text = String::from_utf8_lossy(req);
        let Some(head_end) = text.find("\r\n\r\n") else { return false };
        let length = text[..head_end]
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        req.len() >= head_end + 4 + length
    }

    /// A listener that completes the handshake but never answers.
    pub(crate) fn silent_endpoint() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());
        (listener, url)
    }

    #[test]
    fn clean_url_strips_query_and_fragment() {
        assert_eq!(
            clean_url("https://script.test/macros/s/abc/exec?foo=1#top"),
            "https://script.test/macros/s/abc/exec"
        );
        assert_eq!(clean_url("not a url"), "not a url");
    }

    #[test]
    fn payload_carries_the_whole_aggregate() {
        let state = Defaults::new("https://store.test/exec", "pw").state();
        let p = save_payload(&state);
        assert_eq!(p["action"], "saveData");
        assert!(p["data"]["links"].as_array().unwrap().is_empty());
        assert_eq!(p["data"]["theme"]["id"], "readiness");
        assert_eq!(p["data"]["config"]["gasUrl"], "https://store.test/exec");
        assert_eq!(p["data"]["layout"], "grid");
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(matches!(
            HttpDocumentStore::new("  ", DEFAULT_READ_TIMEOUT),
            Err(RemoteError::NotConfigured)
        ));
    }

    #[test]
    fn unreachable_endpoint_fails_fetch_and_save() {
        // Port 9 (discard) is closed on CI hosts; the connect is refused.
        let store = HttpDocumentStore::new("http://127.0.0.1:9/exec", Duration::from_secs(2)).unwrap();
        assert!(store.fetch().is_err());
        let state = Defaults::new("http://127.0.0.1:9/exec", "pw").state();
        assert!(store.save(&state).is_err());
    }

    #[test]
    fn slow_save_is_not_cut_off_by_the_read_timeout() {
        let url = slow_endpoint(Duration::from_secs(3));
        let store = HttpDocumentStore::new(&url, Duration::from_secs(1)).unwrap();
        let state = Defaults::new(&url, "pw").state();
        assert!(store.save(&state).is_ok());
    }

    #[test]
    fn silent_endpoint_times_out_fetch() {
        let (_listener, url) = silent_endpoint();
        let store = HttpDocumentStore::new(&url, Duration::from_secs(1)).unwrap();
        let started = std::time::Instant::now();
        assert!(matches!(store.fetch(), Err(RemoteError::Http(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
