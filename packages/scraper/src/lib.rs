#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTML page fetching and table extraction helpers.
//!
//! Provides the [`PageSource`] trait with two implementations: [`HttpPage`]
//! issues a single GET request, [`FilePage`] reads a saved copy from disk.
//! Both hand back the raw HTML body. The text and selector helpers in this
//! module, plus [`html_table::table_rows`], are what callers use to walk the
//! parsed [`scraper::Html`] tree.

pub mod html_table;

use std::path::{Path, PathBuf};

use scraper::{ElementRef, Selector};

/// Errors that can occur while fetching or walking a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Parsing a selector or the response body failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Somewhere a page's HTML can be loaded from.
pub trait PageSource: Send + Sync {
    /// Loads the full HTML body of the page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the page cannot be retrieved.
    fn fetch(&self) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;

    /// Human-readable location of the page, used in log messages.
    fn location(&self) -> &str;
}

/// Fetches a page with one HTTP GET using the client's default headers.
#[derive(Debug, Clone)]
pub struct HttpPage {
    url: String,
}

impl HttpPage {
    /// Creates an `HttpPage` for `url`.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
        }
    }
}

impl PageSource for HttpPage {
    async fn fetch(&self) -> Result<String, ScrapeError> {
        let client = reqwest::Client::builder().build()?;

        log::info!("Fetching {}", self.url);
        let response = client.get(&self.url).send().await?.error_for_status()?;

        // Decoded per the response charset, falling back to UTF-8.
        let body = response.text().await?;
        log::debug!("Received {} bytes from {}", body.len(), self.url);

        Ok(body)
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Reads a previously saved page from disk.
#[derive(Debug, Clone)]
pub struct FilePage {
    path: PathBuf,
    display: String,
}

impl FilePage {
    /// Creates a `FilePage` reading from `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            display: path.display().to_string(),
        }
    }
}

impl PageSource for FilePage {
    async fn fetch(&self) -> Result<String, ScrapeError> {
        log::info!("Reading {}", self.display);
        let body = tokio::fs::read_to_string(&self.path).await?;
        log::debug!("Read {} bytes from {}", body.len(), self.display);
        Ok(body)
    }

    fn location(&self) -> &str {
        &self.display
    }
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the selector is not valid CSS.
pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{selector}': {e}")))
}

/// Returns the first descendant of `scope` matching `selector`.
#[must_use]
pub fn select_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Concatenates every text node under `element`, untouched.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenates every text node under `element` after trimming each one
/// and dropping those left empty.
#[must_use]
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn rejects_invalid_selector() {
        let err = parse_selector("div[").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
        assert!(err.to_string().contains("div["));
    }

    #[test]
    fn element_text_keeps_whitespace() {
        let doc = Html::parse_fragment("<div class=\"brand\">\n  Acme \n</div>");
        let sel = parse_selector("div.brand").unwrap();
        let el = select_first(doc.root_element(), &sel).unwrap();
        assert_eq!(element_text(el), "\n  Acme \n");
    }

    #[test]
    fn stripped_text_joins_trimmed_fragments() {
        let doc =
            Html::parse_document("<table><tr><td> Color: <b> Blue </b>\n</td></tr></table>");
        let sel = parse_selector("td").unwrap();
        let el = select_first(doc.root_element(), &sel).unwrap();
        assert_eq!(stripped_text(el), "Color:Blue");
    }

    #[test]
    fn select_first_returns_none_when_absent() {
        let doc = Html::parse_document("<p>hello</p>");
        let sel = parse_selector("div.sku-name").unwrap();
        assert!(select_first(doc.root_element(), &sel).is_none());
    }

    /// Serves `response` verbatim to the first connection and returns the
    /// URL to request.
    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 4096];
            let _ = stream.read(&mut request).await;
            stream.write_all(&response).await.unwrap();
            let _ = stream.shutdown().await;
        });
        format!("http://{addr}/product.html")
    }

    fn http_response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[tokio::test]
    async fn http_page_returns_utf8_body_intact() {
        let body = "<span class=\"review-stars\">★★★★☆</span>";
        let url = serve_once(http_response(
            "200 OK",
            "text/html; charset=utf-8",
            body.as_bytes(),
        ))
        .await;

        let page = HttpPage::new(&url);
        assert_eq!(page.location(), url);
        assert_eq!(page.fetch().await.unwrap(), body);
    }

    #[tokio::test]
    async fn http_page_decodes_declared_charset() {
        let url = serve_once(http_response(
            "200 OK",
            "text/html; charset=iso-8859-1",
            b"<td>S\xe3o Paulo</td>",
        ))
        .await;

        let body = HttpPage::new(&url).fetch().await.unwrap();
        assert_eq!(body, "<td>São Paulo</td>");
    }

    #[tokio::test]
    async fn http_page_error_status_is_http_error() {
        let url = serve_once(http_response("404 Not Found", "text/html", b"")).await;

        let err = HttpPage::new(&url).fetch().await.unwrap_err();
        match err {
            ScrapeError::Http(e) => {
                assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn http_page_refused_connection_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpPage::new(&format!("http://{addr}/product.html"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Http(_)));
    }

    #[tokio::test]
    async fn file_page_reads_saved_copy() {
        let tmp = std::env::temp_dir().join("commercia_scraper_file_page.html");
        std::fs::write(&tmp, "<html><body><h2>Saved</h2></body></html>").unwrap();

        let page = FilePage::new(&tmp);
        let body = page.fetch().await.unwrap();
        assert!(body.contains("<h2>Saved</h2>"));
        assert!(page.location().ends_with("commercia_scraper_file_page.html"));

        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn file_page_missing_is_io_error() {
        let tmp = std::env::temp_dir().join("commercia_scraper_missing_page.html");
        let _ = std::fs::remove_file(&tmp);

        let err = FilePage::new(&tmp).fetch().await.unwrap_err();
        assert!(matches!(err, ScrapeError::Io(_)));
    }
}
