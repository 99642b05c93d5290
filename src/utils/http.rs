// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Cookie acknowledging the adult-content warning on restricted boards.
pub const OVER18_COOKIE: &str = "over18=1";

/// Capability to fetch the HTML body behind a URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `Fetch` implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher from client settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).header(COOKIE, OVER18_COOKIE).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_status(status));
        }
        Ok(response.text().await?)
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::PttCrawler;
    use crate::services::listing::fixtures::{Entry, entry_html, listing_page};

    fn http_crawler(base_url: &str) -> PttCrawler {
        let fetcher = HttpFetcher::new(&ClientConfig::default()).unwrap();
        PttCrawler::with_fetcher(Arc::new(fetcher), base_url).unwrap()
    }

    #[test]
    fn test_create_client() {
        assert!(create_async_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_status_message() {
        let err = AppError::bad_status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Bad status: 404 Not Found");
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_sends_over18_cookie() {
        let server = MockServer::start().await;
        let rows = vec![entry_html("Gossiping", &Entry::new("M.1.A.1"))];
        Mock::given(method("GET"))
            .and(path("/bbs/Gossiping/index.html"))
            .and(header("cookie", OVER18_COOKIE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page("Gossiping", Some(39000), None, &rows)),
            )
            .expect(1)
            .mount(&server)
            .await;

        // The root is given without its trailing slash.
        let crawler = http_crawler(&format!("{}/bbs", server.uri()));
        let list = crawler.get_articles("Gossiping", 0).await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.articles[0].id, "M.1.A.1");
        assert_eq!(list.previous_page, 39000);
    }

    #[tokio::test]
    async fn test_not_found_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bbs/NotExisted/index.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let crawler = http_crawler(&format!("{}/bbs/", server.uri()));
        let err = crawler.get_articles("NotExisted", 0).await.unwrap_err();

        match err {
            AppError::BadStatus(status) => assert_eq!(status, "404 Not Found"),
            other => panic!("expected BadStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        let crawler = http_crawler("http://127.0.0.1:1/bbs/");
        let err = crawler.get_articles("Beauty", 0).await.unwrap_err();

        assert!(matches!(err, AppError::Transport(_)));
        assert!(err.is_transport());
    }
}
