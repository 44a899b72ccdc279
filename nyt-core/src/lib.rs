//! Core library for the `nyt` CLI.
//!
//! This crate defines:
//! - Classification of failed API responses
//! - A transport port over an injectable HTTP executor
//! - Closed parameter sets (sections, categories, periods)
//! - Query handlers and the [`NytClient`] facade over them
//! - Shared domain models and on-disk configuration
//!
//! It is used by `nyt-cli`, but can also be reused by other binaries or services.

pub mod api_error;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod params;
pub mod query;
pub mod transport;

pub use api_error::{ApiError, ApiErrorKind};
pub use client::{BASE_URL, NytClient};
pub use config::{ApiKeySource, Config, ConfigFileError, MissingApiKey};
pub use context::{Cancellation, RequestContext};
pub use error::{Error, Result};
pub use model::{Article, BookReview, Media, MediaMetadata, Multimedia, PopularArticle, TopStories};
pub use params::{BookReviewsCategory, MostPopularCategory, MostPopularPeriod, TopStoriesSection};
pub use transport::{HttpExecutor, HttpRequest, HttpResponse, MockExecutor, ReqwestExecutor, Transport};
