//! Integration tests for the engine.
//!
//! These tests load a seed directory from disk, build an engine from it,
//! and drive it through the public contract the way the CLI does.

use catalog::{Dataset, Stars, Video};
use engine::{EngineError, ErrorKind, NO_PREDICTION, RatingEngine, VideoEngine};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VIDEOS: &str = "\
1::F::Heat::1995
2::F::Alien::1979
3::F::Brazil::1985
10::E::The Target::100::The Wire::1::1
11::E::The Detail::100::The Wire::1::2
20::E::Pilot::200::Deadwood::1::1
";

const USERS: &str = "\
1::Ada
2::Grace
3::Linus
4::Barbara
";

const RATINGS: &str = "\
1::1::2
2::1::4
1::2::5
3::10::3
4::10::4
3::11::1
";

fn write_seed(dir: &Path) {
    fs::write(dir.join("videos.dat"), VIDEOS).unwrap();
    fs::write(dir.join("users.dat"), USERS).unwrap();
    fs::write(dir.join("ratings.dat"), RATINGS).unwrap();
}

fn create_test_setup() -> (Dataset, RatingEngine) {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());

    let dataset = Dataset::load_from_dir(dir.path()).unwrap();
    let engine = RatingEngine::from_dataset(&dataset).unwrap();
    (dataset, engine)
}

#[test]
fn test_seeded_engine_state() {
    let (_, engine) = create_test_setup();

    assert_eq!(engine.len(), 6);
    assert_eq!(engine.rating_count(), 6);
    assert_eq!(engine.users().into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(engine.episodes_of(100).count(), 2);
    assert_eq!(engine.episodes_of(200).count(), 1);
}

#[test]
fn test_predictions_against_seed() {
    let (dataset, engine) = create_test_setup();

    // Heat: Ada 2, Grace 4
    assert_eq!(engine.predict_rating(engine.video(1), dataset.user(1)).unwrap(), 2);
    assert_eq!(engine.predict_rating(engine.video(1), dataset.user(3)).unwrap(), 3);
    // The Target: 3 and 4 -> floor(3.5)
    assert_eq!(engine.predict_rating(engine.video(10), dataset.user(1)).unwrap(), 3);
    // Brazil: nobody
    assert_eq!(
        engine.predict_rating(engine.video(3), dataset.user(1)).unwrap(),
        NO_PREDICTION
    );
}

#[test]
fn test_unknown_ids_are_null_reference() {
    let (dataset, mut engine) = create_test_setup();

    // The CLI resolves ids exactly like this; an unknown id becomes None
    let err = engine
        .predict_rating(engine.video(999), dataset.user(1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NullReference);

    let heat = engine.video(1).cloned();
    let err = engine
        .rate_video(4, heat.as_ref(), dataset.user(999))
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingArgument { name: "user" }));
}

#[test]
fn test_suggestions_against_seed() {
    let (_, engine) = create_test_setup();

    let title = |rating| engine.suggest_video(rating).unwrap().map(Video::title);

    assert_eq!(title(0), Some("Brazil"));
    assert_eq!(title(3), Some("Heat"));
    assert_eq!(title(5), Some("Alien"));
    assert_eq!(title(1), Some("The Detail"));
    assert_eq!(title(2), None);
    assert_eq!(title(4), None);

    assert_eq!(
        engine.suggest_video(7).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_rate_clear_cycle() {
    let (dataset, mut engine) = create_test_setup();
    let brazil = engine.video(3).cloned().unwrap();
    let ada = dataset.user(1).unwrap();
    let grace = dataset.user(2).unwrap();

    engine.rate_video(5, &brazil, ada).unwrap();
    engine.rate_video(1, &brazil, grace).unwrap();
    assert_eq!(engine.predict_rating(&brazil, ada).unwrap(), 5);
    assert_eq!(engine.predict_rating(&brazil, None).unwrap(), 3);

    engine.clear_rating(ada, &brazil).unwrap();
    assert_eq!(engine.predict_rating(&brazil, ada).unwrap(), 1);
    assert_eq!(engine.rating_of(1, 3), None);

    let err = engine.clear_rating(ada, &brazil).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_removing_series_episodes() {
    let (_, mut engine) = create_test_setup();
    let episodes: Vec<_> = engine.episodes_of(100).cloned().collect();

    for episode in &episodes {
        assert!(engine.remove_from_series(episode).unwrap());
    }

    assert_eq!(engine.episodes_of(100).count(), 0);
    assert_eq!(engine.len(), 4);
    // Linus only rated Wire episodes, Barbara only The Target
    assert_eq!(engine.users().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(engine.rating_count(), 3);
}

#[test]
fn test_duplicate_seed_video_rejected() {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());
    let mut dataset = Dataset::load_from_dir(dir.path()).unwrap();

    let heat = dataset.videos[0].clone();
    dataset.videos.push(heat);

    let err = RatingEngine::from_dataset(&dataset).unwrap_err();
    assert!(matches!(err, EngineError::DuplicateVideo { id: 1 }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_seed_rating_lookup() {
    let (_, engine) = create_test_setup();
    assert_eq!(engine.rating_of(1, 2), Stars::new(5));
}
