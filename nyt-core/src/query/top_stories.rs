use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    context::RequestContext,
    error::Result,
    model::{Article, TopStories, lenient_timestamp, null_as_empty},
    params::TopStoriesSection,
    transport::{HttpRequest, Transport},
};

use super::{QueryHandler, decode_envelope};

/// Top stories of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTopStories {
    pub section: TopStoriesSection,
}

#[derive(Debug, Clone)]
pub struct FetchTopStoriesHandler<'a> {
    pub query: FetchTopStories,
    pub transport: &'a Transport,
}

impl<'a> FetchTopStoriesHandler<'a> {
    pub fn new(query: FetchTopStories, transport: &'a Transport) -> Self {
        Self { query, transport }
    }

    fn request(&self) -> Result<HttpRequest> {
        let path = format!("topstories/v2/{}.json", self.query.section.as_str());
        self.transport.get_request(&path, &[])
    }
}

#[derive(Debug, Deserialize)]
struct TopStoriesEnvelope {
    status: Option<String>,
    section: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    last_updated: Option<DateTime<FixedOffset>>,
    num_results: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    results: Vec<Article>,
}

#[async_trait]
impl<'a> QueryHandler for FetchTopStoriesHandler<'a> {
    type Output = TopStories;

    async fn handle(&self, ctx: &RequestContext) -> Result<TopStories> {
        let request = self.request()?;
        let response = self.transport.execute(ctx, request).await?;
        let envelope: TopStoriesEnvelope = decode_envelope(response)?;

        debug!(
            status = ?envelope.status,
            section = ?envelope.section,
            num_results = ?envelope.num_results,
            "top stories envelope"
        );
        info!(
            section = %self.query.section,
            results = envelope.results.len(),
            "top stories fetched"
        );

        Ok(TopStories {
            articles: envelope.results,
            last_updated: envelope.last_updated,
        })
    }
}
