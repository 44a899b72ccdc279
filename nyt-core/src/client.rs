use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use crate::{
    context::RequestContext,
    error::{Error, Result},
    model::{BookReview, PopularArticle, TopStories},
    params::{BookReviewsCategory, MostPopularCategory, MostPopularPeriod, TopStoriesSection},
    query::{
        FetchBookReviews, FetchBookReviewsHandler, FetchMostPopular, FetchMostPopularHandler,
        FetchTopStories, FetchTopStoriesHandler, QueryHandler,
    },
    transport::{HttpExecutor, ReqwestExecutor, Transport},
};

/// Canonical endpoint of the API.
pub const BASE_URL: &str = "https://api.nytimes.com/svc";

/// Entry point for querying the API.
///
/// Every operation validates its parameters before any network access, then
/// runs exactly one request. The client holds no mutable state and can be
/// shared across tasks.
#[derive(Debug, Clone)]
pub struct NytClient {
    transport: Transport,
}

impl NytClient {
    /// Client using the default `reqwest` executor.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), api_key)
    }

    pub fn with_http_client(http: Client, api_key: impl Into<String>) -> Self {
        Self::with_executor(Arc::new(ReqwestExecutor::new(http)), api_key)
    }

    /// Client running its requests through a custom executor.
    pub fn with_executor(executor: Arc<dyn HttpExecutor>, api_key: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(executor, BASE_URL, api_key),
        }
    }

    /// Top stories of `section`, plus the time the section was last updated.
    pub async fn fetch_top_stories(&self, ctx: &RequestContext, section: &str) -> Result<TopStories> {
        let section: TopStoriesSection = section.parse()?;
        debug!(%section, "fetching top stories");

        let handler = FetchTopStoriesHandler::new(FetchTopStories { section }, &self.transport);
        handler.handle(ctx).await
    }

    /// Book reviews where `category` (author, isbn or title) matches `term`.
    pub async fn fetch_book_reviews(
        &self,
        ctx: &RequestContext,
        category: &str,
        term: &str,
    ) -> Result<Vec<BookReview>> {
        let category: BookReviewsCategory = category.parse()?;
        if term.trim().is_empty() {
            return Err(Error::invalid("book reviews search term", term));
        }
        debug!(%category, "fetching book reviews");

        let query = FetchBookReviews {
            category,
            term: term.to_string(),
        };
        FetchBookReviewsHandler::new(query, &self.transport)
            .handle(ctx)
            .await
    }

    /// Most popular articles of `category` over the last `period` days (1, 7 or 30).
    pub async fn fetch_most_popular(
        &self,
        ctx: &RequestContext,
        category: &str,
        period: u32,
    ) -> Result<Vec<PopularArticle>> {
        let category: MostPopularCategory = category.parse()?;
        let period = MostPopularPeriod::try_from(period)?;
        debug!(%category, %period, "fetching most popular");

        FetchMostPopularHandler::new(FetchMostPopular { category, period }, &self.transport)
            .handle(ctx)
            .await
    }
}
