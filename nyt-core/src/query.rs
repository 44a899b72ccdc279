//! Query handlers: one URL, one request, one decoded envelope each.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    context::RequestContext,
    error::{Error, Result},
    transport::HttpResponse,
};

pub mod book_reviews;
pub mod most_popular;
pub mod top_stories;

pub use book_reviews::{FetchBookReviews, FetchBookReviewsHandler};
pub use most_popular::{FetchMostPopular, FetchMostPopularHandler};
pub use top_stories::{FetchTopStories, FetchTopStoriesHandler};

#[async_trait]
pub trait QueryHandler: Send + Sync {
    type Output;

    async fn handle(&self, ctx: &RequestContext) -> Result<Self::Output>;
}

/// Decode a successful response body into an envelope.
pub(crate) fn decode_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    let body = response.body.ok_or(Error::MissingBody)?;
    debug!(bytes = body.len(), "decoding response body");
    serde_json::from_slice(&body).map_err(Error::MalformedResponse)
}
