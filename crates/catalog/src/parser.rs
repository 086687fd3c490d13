//! Parser for the catalog seed files.
//!
//! Three `::`-separated files make up a seed directory:
//! - videos.dat: `videoId::F::title::year` or
//!   `videoId::E::title::seriesId::seriesTitle::season::episode`
//! - users.dat: `userId::name`
//! - ratings.dat: `userId::videoId::stars`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::io::ErrorKind;
use std::path::Path;
use std::str::{FromStr, Split};

/// Read a seed file into lines, keeping the line numbers stable
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Cursor over the fields of one line, carrying the context needed
/// to build a useful `ParseError`.
struct Fields<'a> {
    parts: Split<'a, &'static str>,
    file: &'static str,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(raw: &'a str, file: &'static str, line: usize) -> Self {
        Self {
            parts: raw.split("::"),
            file,
            line,
        }
    }

    fn error(&self, reason: String) -> DataLoadError {
        DataLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason,
        }
    }

    fn text(&mut self, name: &str) -> Result<&'a str> {
        match self.parts.next() {
            Some(value) => Ok(value),
            None => Err(self.error(format!("Missing {}", name))),
        }
    }

    fn number<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.text(name)?;
        raw.trim()
            .parse()
            .map_err(|e| self.error(format!("Invalid {}: {}", name, e)))
    }

    fn finish(mut self) -> Result<()> {
        match self.parts.next() {
            Some(extra) => Err(self.error(format!("Unexpected trailing field: {}", extra))),
            None => Ok(()),
        }
    }
}

/// Iterate the non-empty lines of a file with their 1-based line numbers
fn numbered(lines: &[String]) -> impl Iterator<Item = (usize, &str)> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse the videos.dat file
pub fn parse_videos(path: &Path) -> Result<Vec<Video>> {
    let lines = read_lines(path)?;
    let mut videos = Vec::new();

    for (line_no, line) in numbered(&lines) {
        videos.push(parse_video_line(line, line_no)?);
    }

    Ok(videos)
}

fn parse_video_line(line: &str, line_no: usize) -> Result<Video> {
    let mut fields = Fields::new(line, "videos.dat", line_no);

    let id: VideoId = fields.number("videoId")?;
    let kind = fields.text("kind")?;
    let title = fields.text("title")?.to_string();

    let video = match kind {
        "F" => {
            let year = fields.text("year")?.trim();
            let year = if year.is_empty() {
                None
            } else {
                Some(year.parse::<u16>().map_err(|e| {
                    fields.error(format!("Invalid year: {}", e))
                })?)
            };
            Video::Film(Film { id, title, year })
        }
        "E" => {
            let series_id: SeriesId = fields.number("seriesId")?;
            let series_title = fields.text("seriesTitle")?.to_string();
            let season = fields.number("season")?;
            let episode = fields.number("episode")?;
            Video::Episode(TvEpisode {
                id,
                title,
                series: Series {
                    id: series_id,
                    title: series_title,
                },
                season,
                episode,
            })
        }
        other => {
            return Err(DataLoadError::InvalidValue {
                field: "kind".to_string(),
                value: other.to_string(),
            });
        }
    };

    fields.finish()?;
    Ok(video)
}

/// Parse the users.dat file
///
/// Format: userId::name
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    let lines = read_lines(path)?;
    let mut users = Vec::new();

    for (line_no, line) in numbered(&lines) {
        let mut fields = Fields::new(line, "users.dat", line_no);
        let id = fields.number("userId")?;
        let name = fields.text("name")?;
        fields.finish()?;

        users.push(User::new(id, name));
    }

    Ok(users)
}

/// Parse the ratings.dat file
///
/// Format: userId::videoId::stars
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let lines = read_lines(path)?;
    let mut ratings = Vec::new();

    for (line_no, line) in numbered(&lines) {
        let mut fields = Fields::new(line, "ratings.dat", line_no);
        let user_id = fields.number("userId")?;
        let video_id = fields.number("videoId")?;
        let raw_stars: i32 = fields.number("stars")?;
        fields.finish()?;

        let stars = Stars::new(raw_stars).ok_or_else(|| DataLoadError::InvalidValue {
            field: "stars".to_string(),
            value: raw_stars.to_string(),
        })?;

        ratings.push(RatingRecord {
            user_id,
            video_id,
            stars,
        });
    }

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_film_line() {
        let video = parse_video_line("1::F::Heat::1995", 1).unwrap();
        assert_eq!(
            video,
            Video::Film(Film {
                id: 1,
                title: "Heat".to_string(),
                year: Some(1995),
            })
        );
    }

    #[test]
    fn test_parse_film_without_year() {
        let video = parse_video_line("2::F::Untitled::", 1).unwrap();
        assert!(matches!(video, Video::Film(Film { year: None, .. })));
    }

    #[test]
    fn test_parse_episode_line() {
        let video = parse_video_line("10::E::Pilot::100::The Wire::1::1", 1).unwrap();
        let episode = video.as_episode().unwrap();
        assert_eq!(episode.series.id, 100);
        assert_eq!(episode.series.title, "The Wire");
        assert_eq!((episode.season, episode.episode), (1, 1));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = parse_video_line("3::X::Odd::1999", 4).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "kind"));
    }

    #[test]
    fn test_missing_field_reports_line() {
        let err = parse_video_line("10::E::Pilot::100", 7).unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, reason } => {
                assert_eq!(file, "videos.dat");
                assert_eq!(line, 7);
                assert_eq!(reason, "Missing seriesTitle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_ratings_skips_blank_lines() {
        let file = write_temp("1::10::4\n\n2::10::2\n");
        let ratings = parse_ratings(file.path()).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].stars.get(), 2);
    }

    #[test]
    fn test_parse_ratings_rejects_out_of_range() {
        let file = write_temp("1::10::6\n");
        let err = parse_ratings(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref value, .. } if value == "6"));
    }

    #[test]
    fn test_parse_ratings_trailing_field() {
        let file = write_temp("1::10::4::978300760\n");
        let err = parse_ratings(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_users() {
        let file = write_temp("1::Ada\n2::Grace Hopper\n");
        let users = parse_users(file.path()).unwrap();
        assert_eq!(users, vec![User::new(1, "Ada"), User::new(2, "Grace Hopper")]);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_users(Path::new("/definitely/not/here/users.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
