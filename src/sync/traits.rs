//! Trait definitions for the downstream service clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the Radarr and Agregarr clients, while tests
//! substitute the in-memory mocks below.

use async_trait::async_trait;

use super::domain::{
    DownstreamCollection, ExistingMovie, MovieRequest, NewCollection, QualityProfile, SyncError,
    Tag,
};

/// Trait for the movie-acquisition (tagging) service.
#[async_trait]
pub trait TaggingApi: Send + Sync {
    /// List every tag.
    async fn list_tags(&self) -> Result<Vec<Tag>, SyncError>;

    /// Create a tag. Does not check for an existing tag with the same label.
    async fn create_tag(&self, label: &str) -> Result<Tag, SyncError>;

    /// Delete a tag by id.
    async fn delete_tag(&self, id: i64) -> Result<(), SyncError>;

    /// Add a movie.
    ///
    /// Must return [`SyncError::AlreadyExists`] when the service already
    /// tracks the movie.
    async fn add_movie(&self, movie: &MovieRequest) -> Result<i64, SyncError>;

    /// Find a tracked movie by TMDB id.
    async fn find_movie(&self, tmdb_id: i64) -> Result<Option<ExistingMovie>, SyncError>;

    /// Replace the tag set of a tracked movie.
    async fn update_movie_tags(&self, movie_id: i64, tags: &[i64]) -> Result<(), SyncError>;

    /// List quality profiles.
    async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, SyncError>;
}

/// Trait for the collection-curation service.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// List every collection known to the service.
    async fn list_collections(&self) -> Result<Vec<DownstreamCollection>, SyncError>;

    /// Create a collection.
    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> Result<DownstreamCollection, SyncError>;

    /// Delete a collection by id.
    async fn delete_collection(&self, id: &str) -> Result<(), SyncError>;
}

/// In-memory mocks for testing.
#[cfg(test)]
pub mod mocks {
    use parking_lot::Mutex;

    use super::*;

    /// Mock tagging service backed by in-memory tags and movies.
    #[derive(Default)]
    pub struct MockTagging {
        pub tags: Mutex<Vec<Tag>>,
        pub movies: Mutex<Vec<ExistingMovie>>,
        pub profiles: Vec<QualityProfile>,
        /// Labels whose creation fails
        pub fail_create: Vec<String>,
        /// Tag ids whose deletion fails
        pub fail_delete: Vec<i64>,
        /// TMDB ids whose add fails with a network error
        pub fail_add: Vec<i64>,
        pub create_calls: Mutex<Vec<String>>,
        pub update_calls: Mutex<Vec<(i64, Vec<i64>)>>,
    }

    impl MockTagging {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed an existing tag.
        pub fn with_tag(self, id: i64, label: &str) -> Self {
            self.tags.lock().push(Tag {
                id,
                label: label.to_string(),
            });
            self
        }

        /// Seed an existing movie.
        pub fn with_movie(self, id: i64, tmdb_id: i64, tags: &[i64]) -> Self {
            self.movies.lock().push(ExistingMovie {
                id,
                tmdb_id,
                title: format!("Movie {tmdb_id}"),
                tags: tags.to_vec(),
            });
            self
        }

        pub fn tag_labels(&self) -> Vec<String> {
            self.tags.lock().iter().map(|t| t.label.clone()).collect()
        }

        pub fn movie_tags(&self, tmdb_id: i64) -> Option<Vec<i64>> {
            self.movies
                .lock()
                .iter()
                .find(|m| m.tmdb_id == tmdb_id)
                .map(|m| m.tags.clone())
        }
    }

    #[async_trait]
    impl TaggingApi for MockTagging {
        async fn list_tags(&self) -> Result<Vec<Tag>, SyncError> {
            Ok(self.tags.lock().clone())
        }

        async fn create_tag(&self, label: &str) -> Result<Tag, SyncError> {
            self.create_calls.lock().push(label.to_string());
            if self.fail_create.iter().any(|l| l == label) {
                return Err(SyncError::Api {
                    status: 500,
                    message: "tag store unavailable".to_string(),
                });
            }
            let mut tags = self.tags.lock();
            let id = tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let tag = Tag {
                id,
                label: label.to_string(),
            };
            tags.push(tag.clone());
            Ok(tag)
        }

        async fn delete_tag(&self, id: i64) -> Result<(), SyncError> {
            if self.fail_delete.contains(&id) {
                return Err(SyncError::Network("timeout".to_string()));
            }
            self.tags.lock().retain(|t| t.id != id);
            Ok(())
        }

        async fn add_movie(&self, movie: &MovieRequest) -> Result<i64, SyncError> {
            if self.fail_add.contains(&movie.tmdb_id) {
                return Err(SyncError::Network("connection refused".to_string()));
            }
            let mut movies = self.movies.lock();
            if movies.iter().any(|m| m.tmdb_id == movie.tmdb_id) {
                return Err(SyncError::AlreadyExists(format!(
                    "movie {} has already been added",
                    movie.tmdb_id
                )));
            }
            let id = movies.len() as i64 + 1000;
            movies.push(ExistingMovie {
                id,
                tmdb_id: movie.tmdb_id,
                title: movie.title.clone(),
                tags: movie.tags.clone(),
            });
            Ok(id)
        }

        async fn find_movie(&self, tmdb_id: i64) -> Result<Option<ExistingMovie>, SyncError> {
            Ok(self
                .movies
                .lock()
                .iter()
                .find(|m| m.tmdb_id == tmdb_id)
                .cloned())
        }

        async fn update_movie_tags(&self, movie_id: i64, tags: &[i64]) -> Result<(), SyncError> {
            self.update_calls.lock().push((movie_id, tags.to_vec()));
            let mut movies = self.movies.lock();
            let movie = movies
                .iter_mut()
                .find(|m| m.id == movie_id)
                .ok_or_else(|| SyncError::NotFound(format!("movie {movie_id}")))?;
            movie.tags = tags.to_vec();
            Ok(())
        }

        async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, SyncError> {
            Ok(self.profiles.clone())
        }
    }

    /// Mock collection service backed by an in-memory list.
    #[derive(Default)]
    pub struct MockCollections {
        pub collections: Mutex<Vec<DownstreamCollection>>,
        pub created: Mutex<Vec<NewCollection>>,
        pub deleted: Mutex<Vec<String>>,
        pub fail_list: bool,
        /// Collection ids whose deletion fails
        pub fail_delete: Vec<String>,
        /// Collection names whose creation fails
        pub fail_create: Vec<String>,
    }

    impl MockCollections {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed an existing collection.
        pub fn with_collection(self, id: &str, name: &str, subtype: &str) -> Self {
            self.collections.lock().push(DownstreamCollection {
                id: id.to_string(),
                name: name.to_string(),
                subtype: subtype.to_string(),
            });
            self
        }

        pub fn names(&self) -> Vec<String> {
            self.collections.lock().iter().map(|c| c.name.clone()).collect()
        }
    }

    #[async_trait]
    impl CollectionApi for MockCollections {
        async fn list_collections(&self) -> Result<Vec<DownstreamCollection>, SyncError> {
            if self.fail_list {
                return Err(SyncError::Network("connection refused".to_string()));
            }
            Ok(self.collections.lock().clone())
        }

        async fn create_collection(
            &self,
            collection: &NewCollection,
        ) -> Result<DownstreamCollection, SyncError> {
            if self.fail_create.contains(&collection.name) {
                return Err(SyncError::Api {
                    status: 400,
                    message: "invalid collection".to_string(),
                });
            }
            self.created.lock().push(collection.clone());
            let mut collections = self.collections.lock();
            let created = DownstreamCollection {
                id: format!("generated-{}", collections.len() + 1),
                name: collection.name.clone(),
                subtype: collection.subtype.clone(),
            };
            collections.push(created.clone());
            Ok(created)
        }

        async fn delete_collection(&self, id: &str) -> Result<(), SyncError> {
            if self.fail_delete.iter().any(|f| f == id) {
                return Err(SyncError::Api {
                    status: 500,
                    message: "delete failed".to_string(),
                });
            }
            self.deleted.lock().push(id.to_string());
            self.collections.lock().retain(|c| c.id != id);
            Ok(())
        }
    }
}
