//! Seed dataset loading.
//!
//! A `Dataset` is the raw content of a seed directory: every video, every
//! known user and every rating row. Building an engine from it is the
//! engine crate's job; this module only reads and checks the files.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;

/// Everything read from one seed directory
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub videos: Vec<Video>,
    pub users: Vec<User>,
    pub ratings: Vec<RatingRecord>,
}

impl Dataset {
    /// Load a seed directory containing videos.dat, users.dat and ratings.dat
    ///
    /// The three files are parsed in parallel, then checked with `validate`.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        tracing::info!("Loading catalog seed data from {:?}", data_dir);

        let videos_path = data_dir.join("videos.dat");
        let users_path = data_dir.join("users.dat");
        let ratings_path = data_dir.join("ratings.dat");

        // Nested joins give three-way parallelism
        let ((videos, users), ratings) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_videos(&videos_path),
                    || parser::parse_users(&users_path),
                )
            },
            || parser::parse_ratings(&ratings_path),
        );

        let dataset = Dataset {
            videos: videos?,
            users: users?,
            ratings: ratings?,
        };

        dataset.validate()?;

        let (videos, users, ratings) = dataset.counts();
        tracing::info!(
            "Loaded {} videos, {} users, {} ratings",
            videos,
            users,
            ratings
        );
        Ok(dataset)
    }

    /// Check referential integrity of the rating rows
    ///
    /// Every rating must name a known user. Ratings on videos that are
    /// not in videos.dat are allowed: rating is bookkeeping on identities,
    /// independent of catalog membership.
    pub fn validate(&self) -> Result<()> {
        let user_ids: HashSet<UserId> = self.users.iter().map(|u| u.id).collect();
        let video_ids: HashSet<VideoId> = self.videos.iter().map(Video::id).collect();

        for rating in &self.ratings {
            if !user_ids.contains(&rating.user_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "User".to_string(),
                    id: rating.user_id,
                });
            }
            if !video_ids.contains(&rating.video_id) {
                tracing::warn!(
                    "Rating by user {} references video {} which is not in the catalog",
                    rating.user_id,
                    rating.video_id
                );
            }
        }
        Ok(())
    }

    /// Look up a user by id
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.videos.len(), self.users.len(), self.ratings.len())
    }
}
