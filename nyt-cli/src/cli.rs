use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use nyt_core::{
    Cancellation, Config, NytClient, RequestContext, TopStoriesSection, config::API_KEY_ENV,
};
use tracing::{debug, warn};

use crate::output::{self, OutputOptions};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "nyt",
    version,
    about = "A command-line interface for the New York Times API."
)]
pub struct Cli {
    /// Output verbose infos.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in plain JSON instead of formatted overview.
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Your key for the New York Times API.
    #[arg(short = 'a', long = "apikey", global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch top stories from a New York Times section.
    #[command(name = "topstories", after_help = sections_help())]
    TopStories {
        /// Top stories section to be fetched.
        #[arg(short, long)]
        section: String,
    },

    /// Fetch book reviews for a search term and category.
    #[command(
        name = "bookreviews",
        after_help = "Categories: author, isbn, title\n\n\
                      Example usage:\n  nyt bookreviews -c author -t \"Michelle Obama\"\n  \
                      nyt bookreviews -c title -t \"Finders Keepers\""
    )]
    BookReviews {
        /// Book review category to search in.
        #[arg(short, long)]
        category: String,

        /// Book review term to search for.
        #[arg(short, long)]
        term: String,
    },

    /// Fetch the most popular stories for a given category and time period.
    #[command(
        name = "mostpopular",
        after_help = "Categories: emailed, shared, viewed\nPeriods (days): 1, 7, 30\n\n\
                      Example usage:\n  nyt mostpopular -c emailed -p 7"
    )]
    MostPopular {
        /// Most popular articles category to be fetched.
        #[arg(short, long)]
        category: String,

        /// Time period in days.
        #[arg(short, long, default_value_t = 1)]
        period: u32,
    },

    /// Store the API key (and optional timeout) in the config file.
    Configure,
}

fn sections_help() -> String {
    let names: Vec<&str> = TopStoriesSection::all().iter().map(|s| s.as_str()).collect();
    format!(
        "Sections: {}\n\nExample usage:\n  nyt topstories -s opinion",
        names.join(", ")
    )
}

impl Cli {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions { json: self.json }
    }

    pub async fn run(self) -> Result<()> {
        let opts = self.output_options();

        match &self.command {
            // Configure overwrites the stored key, so it must work on a broken file.
            Command::Configure => configure(config_or_default(Config::load(), true)?),
            Command::TopStories { section } => {
                let (client, ctx) = self.session()?;
                let stories = client.fetch_top_stories(&ctx, section).await?;
                print_with(|out| output::top_stories(out, opts, &stories))
            }
            Command::BookReviews { category, term } => {
                let (client, ctx) = self.session()?;
                let reviews = client.fetch_book_reviews(&ctx, category, term).await?;
                print_with(|out| output::book_reviews(out, opts, &reviews))
            }
            Command::MostPopular { category, period } => {
                let (client, ctx) = self.session()?;
                let articles = client.fetch_most_popular(&ctx, category, *period).await?;
                print_with(|out| output::popular_articles(out, opts, &articles))
            }
        }
    }

    /// Client plus a request context bounded by the timeout and wired to Ctrl+C.
    fn session(&self) -> Result<(NytClient, RequestContext)> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        let key_given = [self.api_key.as_deref(), env_key.as_deref()]
            .into_iter()
            .flatten()
            .any(|key| !key.trim().is_empty());
        // A broken file only matters when it is the sole source of the key.
        let config = config_or_default(Config::load(), key_given)?;

        let (api_key, source) =
            config.resolve_api_key(self.api_key.as_deref(), env_key.as_deref())?;
        debug!(%source, "using api key");

        let timeout = config.resolve_timeout(self.timeout);
        debug!(?timeout, "request timeout");

        let cancellation = Cancellation::new();
        tokio::spawn({
            let cancellation = cancellation.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Ctrl+C received, cancelling request");
                    cancellation.cancel();
                }
            }
        });

        let ctx = RequestContext::background()
            .with_timeout(timeout)
            .with_cancellation(cancellation);

        Ok((NytClient::new(api_key), ctx))
    }
}

/// Falls back to an empty config when the file is broken and `ignore_broken` is set.
fn config_or_default(loaded: Result<Config>, ignore_broken: bool) -> Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(e) if ignore_broken => {
            warn!(error = %format!("{e:#}"), "ignoring unreadable config file");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn print_with<F>(render: F) -> Result<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> Result<()>,
{
    let mut out = io::stdout().lock();
    render(&mut out)?;
    out.flush()?;
    Ok(())
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("New York Times API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout in seconds (leave empty for default):")
        .with_error_message("Please enter a whole number of seconds")
        .prompt_skippable()
        .context("Failed to read timeout")?;

    config.api_key = Some(api_key.trim().to_string());
    if timeout_secs.is_some() {
        config.timeout_secs = timeout_secs;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
