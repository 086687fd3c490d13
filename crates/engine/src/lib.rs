//! Rating and prediction engine for a video catalog.
//!
//! This crate provides:
//! - `VideoEngine`, the contract: catalog membership, ratings, predictions
//! - `RatingEngine`, the in-memory implementation
//! - Rating summaries for reporting
//!
//! ## Rules
//! 1. The catalog is a set: adding a video twice is a no-op that returns false
//! 2. Each user has at most one active rating per video; rating again replaces it
//! 3. Removing a video also removes every rating on it
//! 4. A prediction is the user's own rating, else the floored mean of
//!    everyone's ratings, else 0
//!
//! ## Example Usage
//! ```ignore
//! use catalog::Dataset;
//! use engine::{RatingEngine, VideoEngine};
//!
//! let dataset = Dataset::load_from_dir(Path::new("data/catalog"))?;
//! let engine = RatingEngine::from_dataset(&dataset)?;
//!
//! let stars = engine.predict_rating(engine.video(1), dataset.user(7))?;
//! let unrated = engine.suggest_video(0)?;
//! ```

pub mod error;
pub mod traits;
pub mod predict;
pub mod engine;
pub mod summary;

// Re-export main types
pub use error::{EngineError, ErrorKind, Result};
pub use traits::VideoEngine;
pub use engine::RatingEngine;
pub use predict::NO_PREDICTION;
pub use summary::VideoSummary;
