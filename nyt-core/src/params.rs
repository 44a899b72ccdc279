//! Closed sets of query parameters accepted by the API.
//!
//! Parsing is case-sensitive and exact: no trimming, no case folding. A value
//! outside a set fails with [`Error::InvalidParameter`] before any request is built.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Section of the "Top Stories" endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopStoriesSection {
    Arts,
    Automobiles,
    Books,
    Business,
    Fashion,
    Food,
    Health,
    Home,
    Insider,
    Magazine,
    Movies,
    NyRegion,
    Obituaries,
    Opinion,
    Politics,
    RealEstate,
    Science,
    Sports,
    SundayReview,
    Technology,
    Theater,
    TMagazine,
    Travel,
    Upshot,
    Us,
    World,
}

impl TopStoriesSection {
    pub const fn all() -> &'static [TopStoriesSection] {
        use TopStoriesSection::*;
        &[
            Arts, Automobiles, Books, Business, Fashion, Food, Health, Home, Insider, Magazine,
            Movies, NyRegion, Obituaries, Opinion, Politics, RealEstate, Science, Sports,
            SundayReview, Technology, Theater, TMagazine, Travel, Upshot, Us, World,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopStoriesSection::Arts => "arts",
            TopStoriesSection::Automobiles => "automobiles",
            TopStoriesSection::Books => "books",
            TopStoriesSection::Business => "business",
            TopStoriesSection::Fashion => "fashion",
            TopStoriesSection::Food => "food",
            TopStoriesSection::Health => "health",
            TopStoriesSection::Home => "home",
            TopStoriesSection::Insider => "insider",
            TopStoriesSection::Magazine => "magazine",
            TopStoriesSection::Movies => "movies",
            TopStoriesSection::NyRegion => "nyregion",
            TopStoriesSection::Obituaries => "obituaries",
            TopStoriesSection::Opinion => "opinion",
            TopStoriesSection::Politics => "politics",
            TopStoriesSection::RealEstate => "realestate",
            TopStoriesSection::Science => "science",
            TopStoriesSection::Sports => "sports",
            TopStoriesSection::SundayReview => "sundayreview",
            TopStoriesSection::Technology => "technology",
            TopStoriesSection::Theater => "theater",
            TopStoriesSection::TMagazine => "t-magazine",
            TopStoriesSection::Travel => "travel",
            TopStoriesSection::Upshot => "upshot",
            TopStoriesSection::Us => "us",
            TopStoriesSection::World => "world",
        }
    }

    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl FromStr for TopStoriesSection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| Error::invalid("top stories section", s))
    }
}

/// Field the book reviews endpoint searches on. Its name doubles as the query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookReviewsCategory {
    Author,
    Isbn,
    Title,
}

impl BookReviewsCategory {
    pub const fn all() -> &'static [BookReviewsCategory] {
        &[
            BookReviewsCategory::Author,
            BookReviewsCategory::Isbn,
            BookReviewsCategory::Title,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookReviewsCategory::Author => "author",
            BookReviewsCategory::Isbn => "isbn",
            BookReviewsCategory::Title => "title",
        }
    }

    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl FromStr for BookReviewsCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(BookReviewsCategory::Author),
            "isbn" => Ok(BookReviewsCategory::Isbn),
            "title" => Ok(BookReviewsCategory::Title),
            _ => Err(Error::invalid("book reviews category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MostPopularCategory {
    Emailed,
    Shared,
    Viewed,
}

impl MostPopularCategory {
    pub const fn all() -> &'static [MostPopularCategory] {
        &[
            MostPopularCategory::Emailed,
            MostPopularCategory::Shared,
            MostPopularCategory::Viewed,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MostPopularCategory::Emailed => "emailed",
            MostPopularCategory::Shared => "shared",
            MostPopularCategory::Viewed => "viewed",
        }
    }

    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl FromStr for MostPopularCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emailed" => Ok(MostPopularCategory::Emailed),
            "shared" => Ok(MostPopularCategory::Shared),
            "viewed" => Ok(MostPopularCategory::Viewed),
            _ => Err(Error::invalid("most popular category", s)),
        }
    }
}

/// Look-back window of the most popular endpoint, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MostPopularPeriod {
    Day,
    Week,
    Month,
}

impl MostPopularPeriod {
    pub const fn all() -> &'static [MostPopularPeriod] {
        &[
            MostPopularPeriod::Day,
            MostPopularPeriod::Week,
            MostPopularPeriod::Month,
        ]
    }

    pub fn days(&self) -> u32 {
        match self {
            MostPopularPeriod::Day => 1,
            MostPopularPeriod::Week => 7,
            MostPopularPeriod::Month => 30,
        }
    }

    pub fn is_valid(days: u32) -> bool {
        Self::try_from(days).is_ok()
    }
}

impl TryFrom<u32> for MostPopularPeriod {
    type Error = Error;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(MostPopularPeriod::Day),
            7 => Ok(MostPopularPeriod::Week),
            30 => Ok(MostPopularPeriod::Month),
            _ => Err(Error::invalid("most popular period", days.to_string())),
        }
    }
}

impl fmt::Display for TopStoriesSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BookReviewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MostPopularCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MostPopularPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}
