//! Rendering of query results, either as JSON or as a plain listing.

use std::io::Write;

use anyhow::{Context, Result};
use nyt_core::{Article, BookReview, PopularArticle, TopStories};
use serde::Serialize;

/// How results are printed. Built from the global flags and passed down explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub json: bool,
}

pub fn top_stories(out: &mut impl Write, opts: OutputOptions, stories: &TopStories) -> Result<()> {
    if opts.json {
        return json(out, &stories.articles);
    }

    match stories.last_updated {
        Some(ts) => writeln!(out, "Last update: {}", ts.to_rfc2822())?,
        None => writeln!(out, "Last update: unknown")?,
    }
    writeln!(out)?;
    for article in &stories.articles {
        article_entry(out, article)?;
    }
    Ok(())
}

pub fn popular_articles(
    out: &mut impl Write,
    opts: OutputOptions,
    articles: &[PopularArticle],
) -> Result<()> {
    if opts.json {
        return json(out, articles);
    }

    for article in articles {
        entry(
            out,
            article.title.as_deref(),
            article.summary.as_deref(),
            article.url.as_deref(),
        )?;
    }
    Ok(())
}

pub fn book_reviews(out: &mut impl Write, opts: OutputOptions, reviews: &[BookReview]) -> Result<()> {
    if opts.json {
        return json(out, reviews);
    }

    for review in reviews {
        let title = review.book_title.as_deref().unwrap_or("(untitled)");
        match review.book_author.as_deref() {
            Some(author) if !author.is_empty() => writeln!(out, "{title} by {author}")?,
            _ => writeln!(out, "{title}")?,
        }
        if let Some(summary) = non_empty(review.summary.as_deref()) {
            writeln!(out, "\t{summary}")?;
        }
        if let Some(url) = non_empty(review.url.as_deref()) {
            writeln!(out, "\t{url}")?;
        }
    }
    Ok(())
}

fn article_entry(out: &mut impl Write, article: &Article) -> Result<()> {
    entry(
        out,
        article.title.as_deref(),
        article.summary.as_deref(),
        article.url.as_deref(),
    )
}

fn entry(
    out: &mut impl Write,
    title: Option<&str>,
    summary: Option<&str>,
    url: Option<&str>,
) -> Result<()> {
    writeln!(out, "{}", title.unwrap_or("(untitled)"))?;
    if let Some(summary) = non_empty(summary) {
        writeln!(out, "\t{summary}")?;
    }
    if let Some(url) = non_empty(url) {
        writeln!(out, "\t{url}")?;
    }
    Ok(())
}

fn json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("Failed to serialize results to JSON")?;
    writeln!(out)?;
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn article(title: &str, summary: &str, url: &str) -> Article {
        Article {
            title: Some(title.into()),
            summary: Some(summary.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("render should succeed");
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn text_listing_skips_empty_abstract() {
        let stories = TopStories {
            articles: vec![
                article("First", "About first", "https://example/1"),
                article("Second", "", "https://example/2"),
            ],
            last_updated: DateTime::parse_from_rfc3339("2021-04-17T12:29:15-04:00").ok(),
        };

        let text = render(|out| top_stories(out, OutputOptions::default(), &stories));
        let expected = "Last update: Sat, 17 Apr 2021 12:29:15 -0400\n\n\
                        First\n\tAbout first\n\thttps://example/1\n\
                        Second\n\thttps://example/2\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn json_mode_prints_only_the_list() {
        let stories = TopStories {
            articles: vec![article("X", "Y", "https://example/x")],
            last_updated: None,
        };

        let text = render(|out| top_stories(out, OutputOptions { json: true }, &stories));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        let list = value.as_array().expect("json array");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "X");
        assert_eq!(list[0]["abstract"], "Y");
    }

    #[test]
    fn book_reviews_show_author() {
        let reviews = vec![BookReview {
            book_title: Some("Becoming".into()),
            book_author: Some("Michelle Obama".into()),
            summary: Some("A memoir.".into()),
            url: Some("https://example/review".into()),
            ..Default::default()
        }];

        let text = render(|out| book_reviews(out, OutputOptions::default(), &reviews));
        assert_eq!(
            text,
            "Becoming by Michelle Obama\n\tA memoir.\n\thttps://example/review\n"
        );
    }

    #[test]
    fn empty_popular_list_renders_nothing() {
        let text = render(|out| popular_articles(out, OutputOptions::default(), &[]));
        assert!(text.is_empty());

        let text = render(|out| popular_articles(out, OutputOptions { json: true }, &[]));
        assert_eq!(text, "[]\n");
    }
}
