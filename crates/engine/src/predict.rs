//! Aggregation rules shared by prediction and summaries.

use catalog::Stars;

/// Returned by `predict_rating` when a video has no ratings at all
pub const NO_PREDICTION: u8 = 0;

/// Mean of a set of ratings, rounded down.
///
/// All inputs are in 1..=5, so the result is too. `None` for no input.
pub fn floor_mean<I>(ratings: I) -> Option<u8>
where
    I: IntoIterator<Item = Stars>,
{
    let (sum, count) = totals(ratings);
    if count == 0 {
        None
    } else {
        Some((sum / count) as u8)
    }
}

/// Exact mean of a set of ratings, for display
pub fn exact_mean<I>(ratings: I) -> Option<f32>
where
    I: IntoIterator<Item = Stars>,
{
    let (sum, count) = totals(ratings);
    if count == 0 {
        None
    } else {
        Some(sum as f32 / count as f32)
    }
}

fn totals<I>(ratings: I) -> (u32, u32)
where
    I: IntoIterator<Item = Stars>,
{
    ratings
        .into_iter()
        .fold((0, 0), |(sum, count), stars| (sum + stars.get() as u32, count + 1))
}
