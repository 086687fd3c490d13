//! # Catalog Crate
//!
//! Value types for the video rating engine, and the loader that reads a
//! seed directory into memory.
//!
//! ## Main Components
//!
//! - **types**: `Video` (film or TV episode), `Series`, `User`, `Stars`
//! - **parser**: Parse .dat seed files into Rust structs
//! - **dataset**: Load and check a whole seed directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("data/catalog"))?;
//! let (videos, users, ratings) = dataset.counts();
//! println!("{videos} videos, {users} users, {ratings} ratings");
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod dataset;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use dataset::Dataset;
pub use types::{
    // Type aliases
    UserId,
    VideoId,
    SeriesId,
    // Core types
    User,
    Video,
    Film,
    TvEpisode,
    Series,
    Stars,
    RatingRecord,
};
