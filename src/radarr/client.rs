//! Radarr v3 HTTP client
//!
//! Implements [`TaggingApi`] against `/api/v3`. Every request carries the
//! `X-Api-Key` header.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::adapter::{self, AcquisitionDefaults};
use super::dto::{MovieResource, QualityProfileResource, TagResource};
use crate::sync::domain::{ExistingMovie, MovieRequest, QualityProfile, SyncError, Tag};
use crate::sync::http::{self, HttpOptions};
use crate::sync::traits::TaggingApi;

/// Radarr API client
pub struct RadarrClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    defaults: AcquisitionDefaults,
}

impl RadarrClient {
    /// Create a new client for the Radarr instance at `host`
    pub fn new(
        host: &str,
        api_key: impl Into<String>,
        defaults: AcquisitionDefaults,
        options: HttpOptions,
    ) -> Result<Self, SyncError> {
        let api_key = api_key.into();
        if host.trim().is_empty() || api_key.is_empty() {
            return Err(SyncError::Config("Radarr host and api_key are required".to_string()));
        }

        Ok(Self {
            http_client: http::build_client(options)?,
            base_url: format!("{}/api/v3", http::normalize_host(host)),
            api_key,
            defaults,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header("X-Api-Key", &self.api_key)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, SyncError> {
        let response = builder
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(http::api_error(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        tracing::debug!(path, "Radarr GET");
        self.send(self.request(Method::GET, path))
            .await?
            .json::<T>()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SyncError> {
        tracing::debug!(path, "Radarr POST");
        self.send(self.request(Method::POST, path).json(body))
            .await?
            .json::<T>()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TaggingApi for RadarrClient {
    async fn list_tags(&self) -> Result<Vec<Tag>, SyncError> {
        let tags: Vec<TagResource> = self.get("tag").await?;
        Ok(tags.into_iter().map(adapter::to_tag).collect())
    }

    async fn create_tag(&self, label: &str) -> Result<Tag, SyncError> {
        let body = TagResource {
            id: 0,
            label: label.to_string(),
        };
        let tag: TagResource = self.post("tag", &body).await?;
        Ok(adapter::to_tag(tag))
    }

    async fn delete_tag(&self, id: i64) -> Result<(), SyncError> {
        tracing::debug!(id, "Radarr DELETE tag");
        self.send(self.request(Method::DELETE, &format!("tag/{id}")))
            .await?;
        Ok(())
    }

    async fn add_movie(&self, movie: &MovieRequest) -> Result<i64, SyncError> {
        let body = adapter::to_add_movie(movie, &self.defaults);
        tracing::debug!(tmdb_id = movie.tmdb_id, title = %movie.title, "Radarr POST movie");

        let response = self
            .request(Method::POST, "movie")
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(adapter::classify_add_failure(status, &body));
        }

        let created: MovieResource = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))?;
        Ok(created.id)
    }

    async fn find_movie(&self, tmdb_id: i64) -> Result<Option<ExistingMovie>, SyncError> {
        let movies: Vec<MovieResource> = self.get(&format!("movie?tmdbId={tmdb_id}")).await?;
        Ok(movies
            .into_iter()
            .find(|m| m.tmdb_id == tmdb_id)
            .map(adapter::to_existing_movie))
    }

    async fn update_movie_tags(&self, movie_id: i64, tags: &[i64]) -> Result<(), SyncError> {
        // Radarr's PUT replaces the whole resource, so round-trip it untyped.
        let mut movie: serde_json::Value = self.get(&format!("movie/{movie_id}")).await?;
        let Some(fields) = movie.as_object_mut() else {
            return Err(SyncError::Parse(format!("movie {movie_id} is not an object")));
        };
        fields.insert("tags".to_string(), serde_json::json!(tags));

        tracing::debug!(movie_id, ?tags, "Radarr PUT movie");
        self.send(
            self.request(Method::PUT, &format!("movie/{movie_id}?moveFiles=false"))
                .json(&movie),
        )
        .await?;
        Ok(())
    }

    async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, SyncError> {
        let profiles: Vec<QualityProfileResource> = self.get("qualityprofile").await?;
        Ok(profiles.into_iter().map(adapter::to_quality_profile).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> RadarrClient {
        RadarrClient::new(host, "key", AcquisitionDefaults::default(), HttpOptions::default())
            .unwrap()
    }

    #[test]
    fn test_requires_host_and_key() {
        let result = RadarrClient::new(
            "",
            "key",
            AcquisitionDefaults::default(),
            HttpOptions::default(),
        );
        assert!(matches!(result, Err(SyncError::Config(_))));

        let result = RadarrClient::new(
            "http://radarr:7878",
            "",
            AcquisitionDefaults::default(),
            HttpOptions::default(),
        );
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_urls_are_under_api_v3() {
        let client = client("http://radarr:7878/");
        assert_eq!(client.url("tag"), "http://radarr:7878/api/v3/tag");
        assert_eq!(client.url("/movie/12"), "http://radarr:7878/api/v3/movie/12");
    }

    #[test]
    fn test_requests_carry_api_key() {
        let client = client("http://radarr:7878");
        let request = client.request(Method::GET, "tag").build().unwrap();
        assert_eq!(request.headers()["X-Api-Key"], "key");
        assert_eq!(request.url().as_str(), "http://radarr:7878/api/v3/tag");
    }
}
