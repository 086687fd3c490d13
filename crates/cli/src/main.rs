use anyhow::{anyhow, Context, Result};
use catalog::{Dataset, SeriesId, User, UserId, Video, VideoId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{RatingEngine, VideoEngine, VideoSummary, NO_PREDICTION};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Video rating engine: star ratings, predictions and suggestions
#[derive(Parser)]
#[command(name = "video-engine")]
#[command(about = "Predict and suggest videos from a catalog of star ratings", long_about = None)]
struct Cli {
    /// Path to the seed directory (videos.dat, users.dat, ratings.dat)
    #[arg(short, long, default_value = "data/catalog")]
    data_dir: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the rating a user would give a video
    Predict {
        /// Video ID to predict for
        #[arg(long)]
        video: VideoId,

        /// User ID to predict for (omit for the all-users prediction)
        #[arg(long)]
        user: Option<UserId>,
    },

    /// Suggest a video whose predicted rating matches (0 = unrated)
    Suggest {
        #[arg(long)]
        rating: i32,
    },

    /// List the catalog episodes of a series
    Series {
        #[arg(long)]
        series: SeriesId,
    },

    /// Show a user's ratings and best predictions
    User {
        #[arg(long)]
        user: UserId,

        /// Number of predictions to show
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Show catalog and rating statistics
    Stats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Dataset::load_from_dir(&cli.data_dir)
        .with_context(|| format!("Failed to load seed data from {}", cli.data_dir.display()))?;
    let engine = RatingEngine::from_dataset(&dataset).context("Failed to build rating engine")?;
    tracing::info!("Engine ready in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Predict { video, user } => handle_predict(&engine, &dataset, video, user, cli.json)?,
        Commands::Suggest { rating } => handle_suggest(&engine, rating, cli.json)?,
        Commands::Series { series } => handle_series(&engine, series, cli.json)?,
        Commands::User { user, limit } => handle_user(&engine, &dataset, user, limit, cli.json)?,
        Commands::Stats => handle_stats(&engine, cli.json)?,
    }

    Ok(())
}

/// Resolve an optional user id; an id that was given must exist
fn lookup_user(dataset: &Dataset, user_id: Option<UserId>) -> Result<Option<&User>> {
    user_id
        .map(|id| dataset.user(id).ok_or_else(|| anyhow!("User {} not found", id)))
        .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a prediction as stars, or a note when there is none
fn stars(rating: u8) -> String {
    if rating == NO_PREDICTION {
        "not yet rated".dimmed().to_string()
    } else {
        let filled = "★".repeat(rating as usize);
        let empty = "☆".repeat(5 - rating as usize);
        format!("{}{} ({})", filled.yellow(), empty, rating)
    }
}

#[derive(Serialize)]
struct PredictionOutput<'a> {
    video: &'a Video,
    user: Option<&'a User>,
    own_rating: bool,
    predicted: u8,
}

/// Handle the 'predict' command
fn handle_predict(
    engine: &RatingEngine,
    dataset: &Dataset,
    video_id: VideoId,
    user_id: Option<UserId>,
    json: bool,
) -> Result<()> {
    let user = lookup_user(dataset, user_id)?;
    let video = engine.video(video_id);

    // An unknown video id reaches the engine as a missing argument
    let predicted = engine
        .predict_rating(video, user)
        .with_context(|| format!("Video {} is not in the catalog", video_id))?;
    let video = video.ok_or_else(|| anyhow!("Video {} is not in the catalog", video_id))?;
    let own_rating = user.is_some_and(|u| engine.rating_of(u.id, video_id).is_some());

    if json {
        return print_json(&PredictionOutput {
            video,
            user,
            own_rating,
            predicted,
        });
    }

    println!("{}", video.to_string().bold().blue());
    match user {
        Some(user) if own_rating => println!("{} rated it {}", user.name, stars(predicted)),
        Some(user) => println!("Predicted for {}: {}", user.name, stars(predicted)),
        None => println!("Predicted: {}", stars(predicted)),
    }
    Ok(())
}

/// Handle the 'suggest' command
fn handle_suggest(engine: &RatingEngine, rating: i32, json: bool) -> Result<()> {
    let suggestion = engine.suggest_video(rating)?;

    if json {
        return print_json(&suggestion);
    }

    match suggestion {
        Some(video) => println!(
            "{} {} {}",
            "Suggestion:".bold().blue(),
            video,
            format!("[{}]", video.id()).dimmed()
        ),
        None if rating == 0 => println!("Every video in the catalog has been rated"),
        None => println!("No video is predicted at {} stars", rating),
    }
    Ok(())
}

/// Handle the 'series' command
fn handle_series(engine: &RatingEngine, series_id: SeriesId, json: bool) -> Result<()> {
    let episodes: Vec<_> = engine.episodes_of(series_id).collect();
    if episodes.is_empty() {
        return Err(anyhow!("No episodes of series {} in the catalog", series_id));
    }

    if json {
        return print_json(&episodes);
    }

    println!("{}", episodes[0].series.title.bold().blue());
    for episode in episodes {
        let video = engine.video(episode.id);
        let predicted = engine.predict_rating(video, None)?;
        println!(
            "  S{:02}E{:02} {} - {}",
            episode.season,
            episode.episode,
            episode.title,
            stars(predicted)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct UserOutput<'a> {
    user: &'a User,
    ratings: Vec<(&'a Video, u8)>,
    predictions: Vec<(&'a Video, u8)>,
}

/// Handle the 'user' command
fn handle_user(
    engine: &RatingEngine,
    dataset: &Dataset,
    user_id: UserId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let user = dataset
        .user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let mut ratings = Vec::new();
    let mut predictions = Vec::new();
    for video in engine.videos() {
        match engine.rating_of(user.id, video.id()) {
            Some(own) => ratings.push((video, own.get())),
            None => {
                let predicted = engine.predict_rating(video, user)?;
                if predicted != NO_PREDICTION {
                    predictions.push((video, predicted));
                }
            }
        }
    }
    // Highest first; ties keep catalog order
    ratings.sort_by(|a, b| b.1.cmp(&a.1));
    predictions.sort_by(|a, b| b.1.cmp(&a.1));
    predictions.truncate(limit);

    if json {
        return print_json(&UserOutput {
            user,
            ratings,
            predictions,
        });
    }

    println!("{}", format!("User {}: {}", user.id, user.name).bold().blue());
    println!("{}Ratings: {}", "• ".green(), ratings.len());
    for (video, rating) in &ratings {
        println!("  - {} {}", video, stars(*rating));
    }
    println!("{}Predicted for unrated videos:", "• ".cyan());
    if predictions.is_empty() {
        println!("  (nothing to predict from)");
    }
    for (video, predicted) in &predictions {
        println!("  - {} {}", video, stars(*predicted));
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput {
    videos: usize,
    episodes: usize,
    users: usize,
    ratings: usize,
    summaries: Vec<VideoSummary>,
}

/// Handle the 'stats' command
fn handle_stats(engine: &RatingEngine, json: bool) -> Result<()> {
    let stats = StatsOutput {
        videos: engine.len(),
        episodes: engine.videos().filter(|v| v.is_episode()).count(),
        users: engine.users().len(),
        ratings: engine.rating_count(),
        summaries: engine.summaries(),
    };

    if json {
        return print_json(&stats);
    }

    println!("{}", "Catalog statistics".bold().blue());
    println!("{}Videos: {} ({} episodes)", "• ".green(), stats.videos, stats.episodes);
    println!("{}Users with ratings: {}", "• ".green(), stats.users);
    println!("{}Active ratings: {}", "• ".green(), stats.ratings);
    println!();
    for summary in &stats.summaries {
        println!(
            "{:>6} {} - {:.2} avg over {} rating(s), predicts {}",
            summary.video_id.to_string().dimmed(),
            summary.title,
            summary.mean_rating,
            summary.rating_count,
            stars(summary.predicted)
        );
    }
    Ok(())
}
