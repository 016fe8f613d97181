//! Downstream synchronization - keeps the tagging and collection services
//! in step with the catalog.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - service-agnostic tags, movies, collections
//! - **Traits** (`traits.rs`) - [`TaggingApi`] and [`CollectionApi`] seams,
//!   implemented by the Radarr and Agregarr adapters
//! - **HTTP** (`http.rs`) - client builder and error helpers shared by adapters
//! - **Tagging** (`tagging.rs`) - idempotent tag and movie operations
//! - **Reconcile** (`reconcile.rs`) - diff the catalog against existing
//!   collections and apply the minimal create/delete set
//!
//! Everything runs sequentially; per-item failures are counted, never retried.

pub mod domain;
pub mod http;
pub mod reconcile;
pub mod tagging;
pub mod traits;

pub use domain::{
    CollectionDefaults, DownstreamCollection, ExistingMovie, MovieOutcome, MovieRequest,
    NewCollection, QualityProfile, SyncError, Tag, TagRemoval,
};
pub use http::HttpOptions;
pub use reconcile::{CollectionPlan, ReconcileReport, Reconciler, plan_collections};
pub use tagging::{MovieSyncReport, add_movie_with_tags, create_or_get_tag, sync_movies};
pub use traits::{CollectionApi, TaggingApi};
