//! Rendered scoreboard fetching through a headless Chromium (chromiumoxide).
//!
//! Each fetch launches its own browser and tears it down afterwards, whether
//! or not the page could be captured.

use crate::config::{Config, FetchMode};
use crate::scoreboard::client::ScoreboardSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Scoreboard source that loads the page in a headless browser.
pub struct RenderedClient {
    url: String,
    chrome_path: Option<String>,
    settle: Duration,
    timeout: Duration,
}

impl RenderedClient {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.url.clone(),
            chrome_path: config.chrome_path.clone(),
            settle: config.settle(),
            timeout: config.timeout(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .disable_default_args()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--mute-audio")
            .window_size(1920, 1080);

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))
    }

    async fn render(browser: &Browser, url: &str, settle: Duration) -> Result<String> {
        let page = browser.new_page(url).await.context("Failed to open page")?;

        debug!("Waiting {:?} for client-side rendering", settle);
        tokio::time::sleep(settle).await;

        let html = page.content().await.context("Failed to get page content")?;
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        Ok(html)
    }
}

#[async_trait]
impl ScoreboardSource for RenderedClient {
    async fn fetch(&self) -> Result<String> {
        info!("Rendering scoreboard: {}", self.url);

        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        // the handler must be polled for the browser to make progress
        let handle = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let budget = self.timeout + self.settle;
        let result = match tokio::time::timeout(budget, Self::render(&browser, &self.url, self.settle))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!("Rendering timed out after {:?}", budget)),
        };

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        let _ = browser.wait().await;
        handle.abort();

        result
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn mode(&self) -> FetchMode {
        FetchMode::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_client_settings() {
        let config = Config {
            url: "https://ranking.example.org".into(),
            settle_ms: 1500,
            timeout_secs: 4,
            chrome_path: Some("/usr/bin/chromium".into()),
            ..Config::default()
        };

        let client = RenderedClient::new(&config);
        assert_eq!(client.url(), "https://ranking.example.org");
        assert_eq!(client.mode(), FetchMode::Render);
        assert_eq!(client.settle, Duration::from_millis(1500));
        assert_eq!(client.timeout, Duration::from_secs(4));
    }
}
