use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Article as delivered by the top stories endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub section: Option<String>,
    pub subsection: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub url: Option<String>,
    pub uri: Option<String>,
    pub byline: Option<String>,
    pub item_type: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_date: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_date: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub published_date: Option<DateTime<FixedOffset>>,
    pub material_type_facet: Option<String>,
    pub kicker: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub des_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub org_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub per_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub geo_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub multimedia: Vec<Multimedia>,
    pub short_url: Option<String>,
}

/// Image or video attached to an [`Article`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multimedia {
    pub url: Option<String>,
    pub format: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub subtype: Option<String>,
    pub caption: Option<String>,
    pub copyright: Option<String>,
}

/// Entry of the most popular endpoint. Shares little with [`Article`] beyond the title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularArticle {
    pub uri: Option<String>,
    pub url: Option<String>,
    pub id: Option<i64>,
    pub asset_id: Option<i64>,
    pub source: Option<String>,
    pub published_date: Option<String>,
    pub updated: Option<String>,
    pub section: Option<String>,
    pub subsection: Option<String>,
    pub nytdsection: Option<String>,
    pub adx_keywords: Option<String>,
    pub byline: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub des_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub org_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub per_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub geo_facet: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub media: Vec<Media>,
    pub eta_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub subtype: Option<String>,
    pub caption: Option<String>,
    pub copyright: Option<String>,
    pub approved_for_syndication: Option<i64>,
    #[serde(rename = "media-metadata", deserialize_with = "null_as_empty")]
    pub media_metadata: Vec<MediaMetadata>,
}

/// One rendition of a [`Media`] block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaMetadata {
    pub url: Option<String>,
    pub format: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookReview {
    pub url: Option<String>,
    #[serde(rename = "publication_dt")]
    pub publication_date: Option<String>,
    pub byline: Option<String>,
    pub book_title: Option<String>,
    pub book_author: Option<String>,
    pub summary: Option<String>,
    pub uuid: Option<String>,
    pub uri: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub isbn13: Vec<String>,
}

/// Result of a top stories query: the articles and when the section was last refreshed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopStories {
    pub articles: Vec<Article>,
    pub last_updated: Option<DateTime<FixedOffset>>,
}

/// RFC 3339 timestamp; an empty string or `null` is treated as absent.
pub(crate) fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// List that may arrive as `null`; decoded as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_decodes_with_missing_and_empty_fields() {
        let json = r#"{
            "section": "theater",
            "title": "X",
            "updated_date": "",
            "published_date": "2021-04-17T11:23:12-04:00",
            "des_facet": ["Theater"],
            "multimedia": [{"url": "https://example/x.jpg", "type": "image", "height": 75, "width": 75}]
        }"#;

        let article: Article = serde_json::from_str(json).expect("article should decode");
        assert_eq!(article.title.as_deref(), Some("X"));
        assert!(article.updated_date.is_none());
        assert!(article.created_date.is_none());
        assert_eq!(
            article.published_date.map(|d| d.to_rfc3339()),
            Some("2021-04-17T11:23:12-04:00".to_string())
        );
        assert_eq!(article.des_facet, vec!["Theater".to_string()]);
        assert!(article.org_facet.is_empty());
        assert_eq!(article.multimedia[0].media_type.as_deref(), Some("image"));
    }

    #[test]
    fn bad_timestamp_is_a_decode_error() {
        let err = serde_json::from_str::<Article>(r#"{"created_date": "yesterday"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn popular_article_decodes_nested_media() {
        let json = r#"{
            "id": 100000007733373,
            "asset_id": 100000007733373,
            "title": "Popular",
            "abstract": "Summary",
            "media": [{
                "type": "image",
                "approved_for_syndication": 1,
                "media-metadata": [
                    {"url": "https://example/thumb.jpg", "format": "Standard Thumbnail", "height": 75, "width": 75}
                ]
            }],
            "eta_id": 0
        }"#;

        let article: PopularArticle =
            serde_json::from_str(json).expect("popular article should decode");
        assert_eq!(article.id, Some(100000007733373));
        assert_eq!(article.summary.as_deref(), Some("Summary"));
        assert_eq!(article.media[0].media_metadata[0].width, Some(75));
        assert_eq!(article.media[0].approved_for_syndication, Some(1));
    }

    #[test]
    fn book_review_decodes_isbn_list() {
        let json = r#"{"book_title": "Becoming", "publication_dt": "2018-11-11", "isbn13": ["9781524763138"]}"#;
        let review: BookReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.book_title.as_deref(), Some("Becoming"));
        assert_eq!(review.publication_date.as_deref(), Some("2018-11-11"));
        assert_eq!(review.isbn13.len(), 1);
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let json = r#"{"title": "X", "des_facet": null, "multimedia": null}"#;
        let article: Article = serde_json::from_str(json).expect("null lists are accepted");
        assert_eq!(article.title.as_deref(), Some("X"));
        assert!(article.des_facet.is_empty());
        assert!(article.multimedia.is_empty());

        let json = r#"{"media": [{"type": "image", "media-metadata": null}], "per_facet": null}"#;
        let popular: PopularArticle = serde_json::from_str(json).unwrap();
        assert!(popular.media[0].media_metadata.is_empty());
        assert!(popular.per_facet.is_empty());

        let review: BookReview = serde_json::from_str(r#"{"isbn13": null}"#).unwrap();
        assert!(review.isbn13.is_empty());
    }
}
