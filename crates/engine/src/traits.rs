//! The video engine contract.
//!
//! Every argument that a caller may fail to supply is taken as
//! `impl Into<Option<&T>>`, so both `&video` and `None` are accepted and a
//! missing value is reported as `EngineError::MissingArgument` instead of
//! being impossible to express.

use crate::error::Result;
use catalog::{TvEpisode, User, Video};

/// A predictive engine for video ratings.
///
/// Stores an unordered, duplicate-free catalog of videos (films and TV
/// episodes), and the star ratings users have given them. Users are never
/// enrolled explicitly; they exist by virtue of having rated something.
pub trait VideoEngine {
    /// Insert a video into the catalog.
    ///
    /// # Returns
    /// * `Ok(true)` - the video was added
    /// * `Ok(false)` - a video with the same id is already present
    /// * `Err` - `video` was missing
    fn add_video<'v>(&mut self, video: impl Into<Option<&'v Video>>) -> Result<bool>;

    /// Remove a video from the catalog, along with every rating on it.
    ///
    /// Returns `Ok(false)` when the video is not present, including when
    /// the catalog is empty.
    fn remove_video<'v>(&mut self, video: impl Into<Option<&'v Video>>) -> Result<bool>;

    /// Insert an episode into the catalog. Same contract as `add_video`.
    fn add_to_series<'v>(&mut self, episode: impl Into<Option<&'v TvEpisode>>) -> Result<bool>;

    /// Remove an episode from the catalog. Same contract as `remove_video`,
    /// except that a film sharing the episode's id is not touched.
    fn remove_from_series<'v>(
        &mut self,
        episode: impl Into<Option<&'v TvEpisode>>,
    ) -> Result<bool>;

    /// Record `user`'s rating of `video`, replacing any earlier one.
    ///
    /// Fails with a NullReference error if `video` or `user` is missing,
    /// and with an InvalidArgument error if `rating` is outside 1..=5.
    /// The video does not need to be in the catalog.
    fn rate_video<'v, 'u>(
        &mut self,
        rating: i32,
        video: impl Into<Option<&'v Video>>,
        user: impl Into<Option<&'u User>>,
    ) -> Result<()>;

    /// Forget `user`'s rating of `video`, as if it had never been made.
    ///
    /// Not idempotent: fails with an InvalidArgument error when there is
    /// no active rating for the pair.
    fn clear_rating<'u, 'v>(
        &mut self,
        user: impl Into<Option<&'u User>>,
        video: impl Into<Option<&'v Video>>,
    ) -> Result<()>;

    /// Predict the rating `user` would give `video`.
    ///
    /// # Returns
    /// * the user's own rating, if they have one on record
    /// * otherwise the mean of all ratings for the video, rounded down
    /// * `0` if nobody has rated the video
    ///
    /// `user` may be absent; only `video` is required.
    fn predict_rating<'v, 'u>(
        &self,
        video: impl Into<Option<&'v Video>>,
        user: impl Into<Option<&'u User>>,
    ) -> Result<u8>;

    /// Find a catalog video whose predicted rating equals `rating`.
    ///
    /// `0` asks for a video nobody has rated. Values outside 0..=5 fail
    /// with an InvalidArgument error. Returns `Ok(None)` when nothing
    /// matches.
    fn suggest_video(&self, rating: i32) -> Result<Option<&Video>>;
}
