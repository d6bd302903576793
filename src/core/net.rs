// src/core/net.rs
//
// Page fetching. Everything above this layer only sees `Fetcher`, so the
// assembler can be driven from fixtures as easily as from the live site.

use reqwest::blocking::Client;
use url::Url;

use crate::config::ScrapeOptions;
use crate::error::FetchError;

/// Anything that can turn a page reference into page content.
///
/// References are either absolute URLs or relative to one fixed base origin.
/// Implementations must be shareable across the worker threads.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, reference: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, FetchError> {
        let base = Url::parse(&opts.base_url).map_err(|source| FetchError::InvalidReference {
            reference: opts.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, base })
    }

    /// Absolute URL for `reference`; absolute references pass through unchanged.
    pub fn resolve(&self, reference: &str) -> Result<Url, FetchError> {
        resolve(&self.base, reference)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let url = self.resolve(reference)?;
        logd!("GET {url}");

        let transport = |source: reqwest::Error, url: &Url| {
            if source.is_timeout() {
                FetchError::Timeout { url: url.to_string() }
            } else {
                FetchError::Transport { url: url.to_string(), source }
            }
        };

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| transport(e, &url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        resp.text().map_err(|e| transport(e, &url))
    }
}

pub fn resolve(base: &Url, reference: &str) -> Result<Url, FetchError> {
    base.join(reference.trim()).map_err(|source| FetchError::InvalidReference {
        reference: s!(reference),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://tursib.ro/").unwrap()
    }

    #[test]
    fn relative_references_resolve_against_base() {
        assert_eq!(resolve(&base(), "trasee").unwrap().as_str(), "http://tursib.ro/trasee");
        assert_eq!(resolve(&base(), "").unwrap().as_str(), "http://tursib.ro/");
        assert_eq!(
            resolve(&base(), "/traseu/11/program?statie=1&dir=dus").unwrap().as_str(),
            "http://tursib.ro/traseu/11/program?statie=1&dir=dus"
        );
    }

    #[test]
    fn absolute_references_pass_through() {
        let url = resolve(&base(), "http://tursib.ro/news/show/160").unwrap();
        assert_eq!(url.as_str(), "http://tursib.ro/news/show/160");
    }

    #[test]
    fn timeout_and_http_error_are_fetch_errors() {
        use std::io::{Read, Write};
        use std::net::TcpListener;
        use std::time::Duration;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = std::thread::spawn(move || {
            // First client: accepted, never answered
            let (_silent, _) = listener.accept().unwrap();
            // Second client: 500
            let (mut conn, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let mut request = Vec::new();
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = conn.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            conn.write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .unwrap();
        });

        let opts = ScrapeOptions {
            base_url: format!("http://{addr}/"),
            timeout: Duration::from_millis(500),
            ..ScrapeOptions::default()
        };
        let fetcher = HttpFetcher::new(&opts).unwrap();

        let first = fetcher.fetch("trasee");
        assert!(matches!(first, Err(FetchError::Timeout { .. })), "{first:?}");

        let second = fetcher.fetch("trasee");
        assert!(matches!(second, Err(FetchError::Status { status: 500, .. })), "{second:?}");

        server.join().unwrap();
    }

    #[test]
    fn bad_base_is_rejected() {
        let opts = ScrapeOptions { base_url: s!("not a url"), ..ScrapeOptions::default() };
        assert!(matches!(HttpFetcher::new(&opts), Err(FetchError::InvalidReference { .. })));
    }
}
