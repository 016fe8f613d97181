//! HTTP source for the cinema website.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use super::{ScrapeError, ScrapedFilm, SeriesLink, SeriesSource, parse};

/// Site root
pub const BASE_URL: &str = "https://metrograph.com";

/// The site serves a bare page to unknown clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches series pages from the live site.
pub struct MetrographScraper {
    http_client: reqwest::Client,
    base_url: Url,
}

impl MetrographScraper {
    /// Create a scraper with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(BASE_URL).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
        Self::with_base_url(base_url, timeout)
    }

    /// Create a scraper against another host
    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self, ScrapeError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn resolve(&self, url: &str) -> Result<Url, ScrapeError> {
        self.base_url
            .join(url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{url}: {e}")))
    }

    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        tracing::debug!(%url, "Visiting");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScrapeError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SeriesSource for MetrographScraper {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn list_series(&self) -> Result<Vec<SeriesLink>, ScrapeError> {
        let url = self.resolve("/series/")?;
        let body = self.fetch(&url).await?;
        parse::parse_series_index(&body)
    }

    async fn list_films(&self, series: &SeriesLink) -> Result<Vec<ScrapedFilm>, ScrapeError> {
        let url = self.resolve(&series.url)?;
        let mut body = self.fetch(&url).await?;

        // Some series pages bounce to the real listing with a script; follow once.
        if let Some(target) = parse::find_js_redirect(&body) {
            tracing::debug!(series = %series.name, %target, "Following JavaScript redirect");
            let target = self.resolve(&target)?;
            body = self.fetch(&target).await?;
        }

        parse::parse_film_list(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_urls_resolve_against_site() {
        let scraper = MetrographScraper::new(Duration::from_secs(5)).unwrap();
        assert_eq!(
            scraper.resolve("/series/?vista_series_id=1").unwrap().as_str(),
            "https://metrograph.com/series/?vista_series_id=1"
        );
        assert_eq!(
            scraper.resolve("https://other.example/x").unwrap().as_str(),
            "https://other.example/x"
        );
    }
}
