//! Per-video rating summaries.
//!
//! Read-only aggregates over the whole catalog, used for reporting.

use crate::engine::RatingEngine;
use crate::predict::{self, NO_PREDICTION};
use catalog::{SeriesId, VideoId};
use rayon::prelude::*;
use serde::Serialize;

/// Rating statistics for one catalog video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub video_id: VideoId,
    pub title: String,
    pub series_id: Option<SeriesId>,
    pub rating_count: u32,
    /// Exact mean of all ratings, 0.0 when unrated
    pub mean_rating: f32,
    /// What `predict_rating` returns for someone who has not rated it
    pub predicted: u8,
}

impl RatingEngine {
    /// Compute summaries for every catalog video, in insertion order.
    ///
    /// Each video is summarised independently, so the work runs in
    /// parallel; the output order is still the catalog order.
    pub fn summaries(&self) -> Vec<VideoSummary> {
        let videos: Vec<_> = self.videos().collect();

        videos
            .par_iter()
            .map(|video| {
                let ratings = self.ratings_for(video.id());
                let stars = || ratings.iter().map(|&(_, stars)| stars);

                VideoSummary {
                    video_id: video.id(),
                    title: video.to_string(),
                    series_id: video.series().map(|s| s.id),
                    rating_count: ratings.len() as u32,
                    mean_rating: predict::exact_mean(stars()).unwrap_or(0.0),
                    predicted: predict::floor_mean(stars()).unwrap_or(NO_PREDICTION),
                }
            })
            .collect()
    }
}
