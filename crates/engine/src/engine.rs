//! The in-memory rating engine.
//!
//! `RatingEngine` owns two collections:
//! - the catalog, a set of videos keyed by id that remembers insertion
//!   order so suggestions are deterministic;
//! - the rating map, video id -> (user id -> stars).
//!
//! The set of users is not stored anywhere; `users()` projects it out of
//! the rating map.

use crate::error::{EngineError, Result, required};
use crate::predict::{self, NO_PREDICTION};
use crate::traits::VideoEngine;
use catalog::{Dataset, SeriesId, Stars, TvEpisode, User, UserId, Video, VideoId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A catalog entry together with its insertion sequence number
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    video: Video,
}

/// In-memory catalog of videos plus the ratings users have given them.
///
/// ## Usage
/// ```ignore
/// use engine::{RatingEngine, VideoEngine};
///
/// let mut engine = RatingEngine::new();
/// engine.add_video(&heat)?;
/// engine.rate_video(4, &heat, &ada)?;
/// assert_eq!(engine.predict_rating(&heat, &grace)?, 4);
/// ```
#[derive(Debug, Default)]
pub struct RatingEngine {
    videos: HashMap<VideoId, Slot>,
    /// Insertion sequence -> video id, for ordered iteration
    order: BTreeMap<u64, VideoId>,
    next_seq: u64,
    ratings: HashMap<VideoId, HashMap<UserId, Stars>>,
}

impl RatingEngine {
    /// Create a new, empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a loaded seed dataset.
    ///
    /// Every video is added to the catalog (a repeated id is an error) and
    /// every rating row is recorded as if passed to `rate_video`.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        dataset.validate()?;

        let mut engine = Self::new();
        for video in &dataset.videos {
            if !engine.insert(video.clone()) {
                return Err(EngineError::DuplicateVideo { id: video.id() });
            }
        }
        for rating in &dataset.ratings {
            engine.record(rating.user_id, rating.video_id, rating.stars);
        }

        tracing::info!(
            "Engine seeded with {} videos and {} ratings from {} users",
            engine.len(),
            engine.rating_count(),
            engine.users().len()
        );
        Ok(engine)
    }

    // Lookups

    /// Number of videos in the catalog
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn contains_video(&self, id: VideoId) -> bool {
        self.videos.contains_key(&id)
    }

    /// Get a catalog video by id
    pub fn video(&self, id: VideoId) -> Option<&Video> {
        self.videos.get(&id).map(|slot| &slot.video)
    }

    /// All catalog videos, in insertion order
    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.order
            .values()
            .filter_map(move |id| self.videos.get(id))
            .map(|slot| &slot.video)
    }

    /// Catalog episodes belonging to one series, in insertion order
    pub fn episodes_of(&self, series: SeriesId) -> impl Iterator<Item = &TvEpisode> {
        self.videos()
            .filter_map(Video::as_episode)
            .filter(move |episode| episode.series.id == series)
    }

    /// Everyone who currently has at least one active rating
    pub fn users(&self) -> BTreeSet<UserId> {
        self.ratings
            .values()
            .flat_map(|by_user| by_user.keys().copied())
            .collect()
    }

    /// The active rating `user` gave `video`, if any
    pub fn rating_of(&self, user: UserId, video: VideoId) -> Option<Stars> {
        self.ratings.get(&video)?.get(&user).copied()
    }

    /// Every active rating on a video, ordered by user id
    pub fn ratings_for(&self, video: VideoId) -> Vec<(UserId, Stars)> {
        let mut ratings: Vec<(UserId, Stars)> = self
            .ratings
            .get(&video)
            .map(|by_user| by_user.iter().map(|(&u, &s)| (u, s)).collect())
            .unwrap_or_default();
        ratings.sort_unstable_by_key(|&(user, _)| user);
        ratings
    }

    /// Total number of active rating entries
    pub fn rating_count(&self) -> usize {
        self.ratings.values().map(HashMap::len).sum()
    }

    /// All-users prediction for a video: the floored mean, or `None` if unrated
    pub(crate) fn mean_prediction(&self, video: VideoId) -> Option<u8> {
        let by_user = self.ratings.get(&video)?;
        predict::floor_mean(by_user.values().copied())
    }

    // Mutators

    fn insert(&mut self, video: Video) -> bool {
        let id = video.id();
        if self.videos.contains_key(&id) {
            tracing::debug!("Video {} already in catalog, not added", id);
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id);
        self.videos.insert(id, Slot { seq, video });

        tracing::debug!("Added video {} (catalog size: {})", id, self.videos.len());
        true
    }

    /// Remove a catalog entry and purge the ratings that point at it
    fn take(&mut self, id: VideoId) -> Option<Video> {
        let slot = self.videos.remove(&id)?;
        self.order.remove(&slot.seq);
        let purged = self.ratings.remove(&id).map_or(0, |by_user| by_user.len());

        tracing::debug!(
            "Removed video {} and {} rating(s) (catalog size: {})",
            id,
            purged,
            self.videos.len()
        );
        Some(slot.video)
    }

    /// Upsert a rating; returns the rating it replaced
    fn record(&mut self, user: UserId, video: VideoId, stars: Stars) -> Option<Stars> {
        let previous = self.ratings.entry(video).or_default().insert(user, stars);
        match previous {
            Some(old) => tracing::debug!(
                "User {} re-rated video {}: {} -> {}",
                user,
                video,
                old,
                stars
            ),
            None => tracing::debug!("User {} rated video {}: {}", user, video, stars),
        }
        previous
    }
}

impl VideoEngine for RatingEngine {
    fn add_video<'v>(&mut self, video: impl Into<Option<&'v Video>>) -> Result<bool> {
        let video = required(video.into(), "video")?;
        Ok(self.insert(video.clone()))
    }

    fn remove_video<'v>(&mut self, video: impl Into<Option<&'v Video>>) -> Result<bool> {
        let video = required(video.into(), "video")?;
        Ok(self.take(video.id()).is_some())
    }

    fn add_to_series<'v>(&mut self, episode: impl Into<Option<&'v TvEpisode>>) -> Result<bool> {
        let episode = required(episode.into(), "episode")?;
        Ok(self.insert(Video::Episode(episode.clone())))
    }

    fn remove_from_series<'v>(
        &mut self,
        episode: impl Into<Option<&'v TvEpisode>>,
    ) -> Result<bool> {
        let episode = required(episode.into(), "episode")?;
        let is_episode = self
            .video(episode.id)
            .is_some_and(Video::is_episode);
        if !is_episode {
            return Ok(false);
        }
        Ok(self.take(episode.id).is_some())
    }

    fn rate_video<'v, 'u>(
        &mut self,
        rating: i32,
        video: impl Into<Option<&'v Video>>,
        user: impl Into<Option<&'u User>>,
    ) -> Result<()> {
        let video = required(video.into(), "video")?;
        let user = required(user.into(), "user")?;
        let stars = Stars::new(rating).ok_or(EngineError::RatingOutOfRange {
            value: rating,
            min: Stars::MIN as i32,
            max: Stars::MAX as i32,
        })?;

        self.record(user.id, video.id(), stars);
        Ok(())
    }

    fn clear_rating<'u, 'v>(
        &mut self,
        user: impl Into<Option<&'u User>>,
        video: impl Into<Option<&'v Video>>,
    ) -> Result<()> {
        let user = required(user.into(), "user")?;
        let video = required(video.into(), "video")?;
        let video_id = video.id();

        let by_user = self
            .ratings
            .get_mut(&video_id)
            .ok_or(EngineError::NoActiveRating {
                user: user.id,
                video: video_id,
            })?;
        if by_user.remove(&user.id).is_none() {
            return Err(EngineError::NoActiveRating {
                user: user.id,
                video: video_id,
            });
        }
        // Drop the empty inner map so the video reads as unrated again
        if by_user.is_empty() {
            self.ratings.remove(&video_id);
        }

        tracing::debug!("Cleared rating of user {} on video {}", user.id, video_id);
        Ok(())
    }

    fn predict_rating<'v, 'u>(
        &self,
        video: impl Into<Option<&'v Video>>,
        user: impl Into<Option<&'u User>>,
    ) -> Result<u8> {
        let video = required(video.into(), "video")?;

        if let Some(user) = user.into() {
            if let Some(own) = self.rating_of(user.id, video.id()) {
                return Ok(own.get());
            }
        }

        Ok(self.mean_prediction(video.id()).unwrap_or(NO_PREDICTION))
    }

    fn suggest_video(&self, rating: i32) -> Result<Option<&Video>> {
        if !(NO_PREDICTION as i32..=Stars::MAX as i32).contains(&rating) {
            return Err(EngineError::RatingOutOfRange {
                value: rating,
                min: NO_PREDICTION as i32,
                max: Stars::MAX as i32,
            });
        }

        // An unrated video predicts NO_PREDICTION, so 0 falls out naturally
        let wanted = rating as u8;
        let suggestion = self
            .videos()
            .find(|video| self.mean_prediction(video.id()).unwrap_or(NO_PREDICTION) == wanted);

        match suggestion {
            Some(video) => tracing::debug!("Suggesting video {} for rating {}", video.id(), rating),
            None => tracing::debug!("No video matches rating {}", rating),
        }
        Ok(suggestion)
    }
}
