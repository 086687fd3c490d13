//! Core domain types for the video catalog.
//!
//! The engine treats these as opaque values: it only looks at the id of a
//! video or user, and at the series an episode belongs to.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a video (films and episodes share one id space)
pub type VideoId = u32;

/// Unique identifier for a television series
pub type SeriesId = u32;

// =============================================================================
// User
// =============================================================================

/// Someone who rates videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// Video-related Types
// =============================================================================

/// A stand-alone feature film
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: VideoId,
    pub title: String,
    pub year: Option<u16>,
}

/// A television series. Episodes carry the series they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
}

/// One episode of a television series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvEpisode {
    pub id: VideoId,
    pub title: String,
    pub series: Series,
    pub season: u16,
    pub episode: u16,
}

/// Anything that can sit in the catalog.
///
/// An episode is a video that also knows its series; `Video::series`
/// is the only capability that distinguishes the two variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Video {
    Film(Film),
    Episode(TvEpisode),
}

impl Video {
    /// Identity of the video. Two values with the same id are the same video.
    pub fn id(&self) -> VideoId {
        match self {
            Video::Film(film) => film.id,
            Video::Episode(episode) => episode.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Video::Film(film) => &film.title,
            Video::Episode(episode) => &episode.title,
        }
    }

    /// The series this video belongs to, if it is an episode
    pub fn series(&self) -> Option<&Series> {
        match self {
            Video::Film(_) => None,
            Video::Episode(episode) => Some(&episode.series),
        }
    }

    pub fn as_episode(&self) -> Option<&TvEpisode> {
        match self {
            Video::Episode(episode) => Some(episode),
            Video::Film(_) => None,
        }
    }

    pub fn is_episode(&self) -> bool {
        matches!(self, Video::Episode(_))
    }
}

impl From<Film> for Video {
    fn from(film: Film) -> Self {
        Video::Film(film)
    }
}

impl From<TvEpisode> for Video {
    fn from(episode: TvEpisode) -> Self {
        Video::Episode(episode)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Video::Film(film) => match film.year {
                Some(year) => write!(f, "{} ({})", film.title, year),
                None => write!(f, "{}", film.title),
            },
            Video::Episode(ep) => write!(
                f,
                "{} S{:02}E{:02} - {}",
                ep.series.title, ep.season, ep.episode, ep.title
            ),
        }
    }
}

// =============================================================================
// Ratings
// =============================================================================

/// A star rating, always within `Stars::MIN..=Stars::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw integer. Returns `None` outside 1..=5.
    pub fn new(value: i32) -> Option<Self> {
        if (Self::MIN as i32..=Self::MAX as i32).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = DataLoadError;

    fn try_from(value: u8) -> Result<Self> {
        Stars::new(value as i32).ok_or_else(|| DataLoadError::InvalidValue {
            field: "stars".to_string(),
            value: value.to_string(),
        })
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> u8 {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rating row as it appears in seed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub video_id: VideoId,
    pub stars: Stars,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode() -> TvEpisode {
        TvEpisode {
            id: 7,
            title: "Pilot".to_string(),
            series: Series {
                id: 100,
                title: "The Wire".to_string(),
            },
            season: 1,
            episode: 1,
        }
    }

    #[test]
    fn test_stars_range() {
        assert!(Stars::new(0).is_none());
        assert!(Stars::new(6).is_none());
        assert!(Stars::new(-3).is_none());
        assert_eq!(Stars::new(1).map(Stars::get), Some(1));
        assert_eq!(Stars::new(5).map(Stars::get), Some(5));
    }

    #[test]
    fn test_stars_try_from_u8() {
        assert!(Stars::try_from(3u8).is_ok());
        assert!(matches!(
            Stars::try_from(9u8),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_episode_exposes_series() {
        let video: Video = episode().into();
        assert_eq!(video.id(), 7);
        assert!(video.is_episode());
        assert_eq!(video.series().map(|s| s.id), Some(100));
    }

    #[test]
    fn test_film_has_no_series() {
        let video: Video = Film {
            id: 1,
            title: "Heat".to_string(),
            year: Some(1995),
        }
        .into();
        assert!(video.series().is_none());
        assert!(video.as_episode().is_none());
        assert_eq!(video.to_string(), "Heat (1995)");
    }

    #[test]
    fn test_episode_display() {
        let video = Video::Episode(episode());
        assert_eq!(video.to_string(), "The Wire S01E01 - Pilot");
    }
}
