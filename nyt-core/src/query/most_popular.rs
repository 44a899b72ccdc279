use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    context::RequestContext,
    error::Result,
    model::{PopularArticle, null_as_empty},
    params::{MostPopularCategory, MostPopularPeriod},
    transport::{HttpRequest, Transport},
};

use super::{QueryHandler, decode_envelope};

/// Most emailed, shared or viewed articles over the last `period` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchMostPopular {
    pub category: MostPopularCategory,
    pub period: MostPopularPeriod,
}

#[derive(Debug, Clone)]
pub struct FetchMostPopularHandler<'a> {
    pub query: FetchMostPopular,
    pub transport: &'a Transport,
}

impl<'a> FetchMostPopularHandler<'a> {
    pub fn new(query: FetchMostPopular, transport: &'a Transport) -> Self {
        Self { query, transport }
    }

    fn request(&self) -> Result<HttpRequest> {
        let path = format!(
            "mostpopular/v2/{}/{}.json",
            self.query.category.as_str(),
            self.query.period.days()
        );
        self.transport.get_request(&path, &[])
    }
}

#[derive(Debug, Deserialize)]
struct MostPopularEnvelope {
    status: Option<String>,
    num_results: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    results: Vec<PopularArticle>,
}

#[async_trait]
impl<'a> QueryHandler for FetchMostPopularHandler<'a> {
    type Output = Vec<PopularArticle>;

    async fn handle(&self, ctx: &RequestContext) -> Result<Vec<PopularArticle>> {
        let request = self.request()?;
        let response = self.transport.execute(ctx, request).await?;
        let envelope: MostPopularEnvelope = decode_envelope(response)?;

        debug!(status = ?envelope.status, num_results = ?envelope.num_results, "most popular envelope");
        info!(
            category = %self.query.category,
            period = %self.query.period,
            results = envelope.results.len(),
            "most popular fetched"
        );

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api_error::{ApiError, ApiErrorKind},
        error::Error,
        query::test_support::{BASE_URL, transport_with},
        transport::{HttpResponse, MockExecutor},
    };

    const ONE_POPULAR: &str = r#"{
        "status": "OK",
        "copyright": "Copyright (c) 2021 The New York Times Company.  All Rights Reserved.",
        "section": "",
        "num_results": 1,
        "results": [
            {
                "uri": "nyt://article/1",
                "url": "https://www.nytimes.com/2021/04/18/us/popular.html",
                "id": 100000007700001,
                "asset_id": 100000007700001,
                "source": "New York Times",
                "published_date": "2021-04-18",
                "updated": "2021-04-19 10:05:43",
                "section": "U.S.",
                "subsection": "",
                "nytdsection": "u.s.",
                "adx_keywords": "Politics;Elections",
                "byline": "By Someone",
                "type": "Article",
                "title": "Most Read",
                "abstract": "What everyone read.",
                "des_facet": ["Politics"],
                "org_facet": [],
                "per_facet": [],
                "geo_facet": [],
                "media": [
                    {
                        "type": "image",
                        "subtype": "photo",
                        "caption": "",
                        "copyright": "Agency",
                        "approved_for_syndication": 1,
                        "media-metadata": [
                            {"url": "https://static01.nyt.com/a.jpg", "format": "Standard Thumbnail", "height": 75, "width": 75},
                            {"url": "https://static01.nyt.com/b.jpg", "format": "mediumThreeByTwo440", "height": 293, "width": 440}
                        ]
                    }
                ],
                "eta_id": 0
            }
        ]
    }"#;

    fn query() -> FetchMostPopular {
        FetchMostPopular {
            category: MostPopularCategory::Viewed,
            period: MostPopularPeriod::Week,
        }
    }

    #[tokio::test]
    async fn decodes_popular_articles() {
        let (transport, mock) = transport_with(MockExecutor::respond_with(200, ONE_POPULAR));

        let articles = FetchMostPopularHandler::new(query(), &transport)
            .handle(&RequestContext::background())
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.title.as_deref(), Some("Most Read"));
        assert_eq!(article.id, Some(100000007700001));
        assert_eq!(article.item_type.as_deref(), Some("Article"));
        assert_eq!(article.media[0].media_metadata.len(), 2);
        assert_eq!(article.media[0].media_metadata[1].width, Some(440));

        assert_eq!(
            mock.requests()[0].as_str(),
            format!("{BASE_URL}/mostpopular/v2/viewed/7.json?api-key=1234567890")
        );
    }

    #[tokio::test]
    async fn too_many_requests_is_classified() {
        let (transport, _) = transport_with(MockExecutor::respond_with(429, ""));

        let err = FetchMostPopularHandler::new(query(), &transport)
            .handle(&RequestContext::background())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Api(ApiError {
                kind: ApiErrorKind::TooManyRequests,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let (transport, _) = transport_with(MockExecutor::respond_with(200, r#"{"results": "nope"}"#));

        let err = FetchMostPopularHandler::new(query(), &transport)
            .handle(&RequestContext::background())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn missing_body_is_reported() {
        let (transport, _) =
            transport_with(MockExecutor::new(|_| Ok(Some(HttpResponse::without_body(204)))));

        let err = FetchMostPopularHandler::new(query(), &transport)
            .handle(&RequestContext::background())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingBody));
    }

    #[tokio::test]
    async fn null_media_is_empty() {
        let body = r#"{"status":"OK","results":[{"title":"Most Read","media":null,"geo_facet":null}]}"#;
        let (transport, _) = transport_with(MockExecutor::respond_with(200, body));

        let articles = FetchMostPopularHandler::new(query(), &transport)
            .handle(&RequestContext::background())
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert!(articles[0].media.is_empty());
        assert!(articles[0].geo_facet.is_empty());
    }
}
