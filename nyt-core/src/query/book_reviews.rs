use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    context::RequestContext,
    error::Result,
    model::{BookReview, null_as_empty},
    params::BookReviewsCategory,
    transport::{HttpRequest, Transport},
};

use super::{QueryHandler, decode_envelope};

/// Book reviews matching `term` on the field named by `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBookReviews {
    pub category: BookReviewsCategory,
    pub term: String,
}

#[derive(Debug, Clone)]
pub struct FetchBookReviewsHandler<'a> {
    pub query: FetchBookReviews,
    pub transport: &'a Transport,
}

impl<'a> FetchBookReviewsHandler<'a> {
    pub fn new(query: FetchBookReviews, transport: &'a Transport) -> Self {
        Self { query, transport }
    }

    // The category name is the query key, e.g. `?author=Michelle+Obama`.
    fn request(&self) -> Result<HttpRequest> {
        self.transport.get_request(
            "books/v3/reviews.json",
            &[(self.query.category.as_str(), self.query.term.as_str())],
        )
    }
}

#[derive(Debug, Deserialize)]
struct BookReviewsEnvelope {
    status: Option<String>,
    num_results: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    results: Vec<BookReview>,
}

#[async_trait]
impl<'a> QueryHandler for FetchBookReviewsHandler<'a> {
    type Output = Vec<BookReview>;

    async fn handle(&self, ctx: &RequestContext) -> Result<Vec<BookReview>> {
        let request = self.request()?;
        let response = self.transport.execute(ctx, request).await?;
        let envelope: BookReviewsEnvelope = decode_envelope(response)?;

        debug!(status = ?envelope.status, num_results = ?envelope.num_results, "book reviews envelope");
        info!(
            category = %self.query.category,
            results = envelope.results.len(),
            "book reviews fetched"
        );

        Ok(envelope.results)
    }
}
