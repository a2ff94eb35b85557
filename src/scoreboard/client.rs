//! HTTP client for the scoreboard page using wreq for TLS fingerprint emulation.

use crate::config::{Config, FetchMode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for scoreboard fetching - enables mocking for tests.
#[async_trait]
pub trait ScoreboardSource: Send + Sync {
    /// Fetches the scoreboard page and returns its HTML.
    async fn fetch(&self) -> Result<String>;

    /// Returns the page URL.
    fn url(&self) -> &str;

    /// Returns how the page is fetched.
    fn mode(&self) -> FetchMode;
}

/// Plain HTTP scoreboard client.
pub struct ScoreboardClient {
    client: Client,
    url: String,
}

impl ScoreboardClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config.timeout();
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, url: config.url.clone() })
    }
}

#[async_trait]
impl ScoreboardSource for ScoreboardClient {
    async fn fetch(&self) -> Result<String> {
        info!("Fetching scoreboard: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn mode(&self) -> FetchMode {
        FetchMode::Http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config(url: String) -> Config {
        Config { url, timeout_secs: 2, ..Config::default() }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        let html = r#"<html><body><table id="Scoreboard"></table></body></html>"#;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let client = ScoreboardClient::new(&make_test_config(mock_server.uri())).unwrap();

        let body = client.fetch().await.unwrap();
        assert!(body.contains("Scoreboard"));
    }

    #[tokio::test]
    async fn test_fetch_subpath() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ranking"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ranking</html>"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/ranking", mock_server.uri());
        let client = ScoreboardClient::new(&make_test_config(url)).unwrap();

        assert!(client.fetch().await.unwrap().contains("ranking"));
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = ScoreboardClient::new(&make_test_config(mock_server.uri())).unwrap();

        let err = client.fetch().await.unwrap_err().to_string();
        assert!(err.contains("500"));
    }

    #[tokio::test]
    async fn test_http_error_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ScoreboardClient::new(&make_test_config(mock_server.uri())).unwrap();

        let err = client.fetch().await.unwrap_err().to_string();
        assert!(err.contains("404"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let mut config = make_test_config(mock_server.uri());
        config.timeout_secs = 1;
        let client = ScoreboardClient::new(&config).unwrap();

        assert!(client.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // nothing listens on port 9 locally
        let client = ScoreboardClient::new(&make_test_config("http://127.0.0.1:9".into())).unwrap();
        assert!(client.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = ScoreboardClient::new(&make_test_config(mock_server.uri())).unwrap();

        assert!(client.fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_url_and_mode() {
        let client = ScoreboardClient::new(&make_test_config("http://localhost".into())).unwrap();
        assert_eq!(client.url(), "http://localhost");
        assert_eq!(client.mode(), FetchMode::Http);
    }
}
