//! Building a game table from a saved chess.com archive document

use crate::game::{GameRecord, GameTable, Outcome, Side};
use chessdash_common::{bail, ensure, ChessDashError, Result};
use chessdash_config::PlayerConfig;
use chrono::{DateTime, FixedOffset, Offset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

/// chess.com monthly archive: `{"games": [...]}`, or a bare list of games
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArchiveDocument {
    Monthly { games: Vec<serde_json::Value> },
    Games(Vec<serde_json::Value>),
}

impl ArchiveDocument {
    fn into_games(self) -> Vec<serde_json::Value> {
        match self {
            ArchiveDocument::Monthly { games } | ArchiveDocument::Games(games) => games,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGame {
    url: Option<String>,
    time_control: Option<String>,
    time_class: Option<String>,
    #[serde(default)]
    rated: bool,
    end_time: Option<i64>,
    white: RawPlayer,
    black: RawPlayer,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    username: String,
    rating: Option<u32>,
    #[serde(default)]
    result: String,
}

/// Counts reported after an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Games added to the table
    pub imported: usize,
    /// Games kept without an end time
    pub missing_timestamp: usize,
    /// Games skipped because the user played neither side
    pub foreign: usize,
    /// Entries skipped because they did not parse as a game
    pub malformed: usize,
}

/// Converts archive games into records for one user in one time zone
#[derive(Debug, Clone)]
pub struct ArchiveImporter {
    username: String,
    timezone: Tz,
}

impl ArchiveImporter {
    /// Create an importer for `username`, resolving end times in `timezone`
    pub fn new(username: impl Into<String>, timezone: Tz) -> Result<Self> {
        let username = username.into();
        ensure!(
            !username.trim().is_empty(),
            ChessDashError::validation_field(
                "A username is required to import games",
                "player.username",
            )
        );

        Ok(Self { username, timezone })
    }

    /// Create an importer from player configuration
    pub fn from_config(player: &PlayerConfig) -> Result<Self> {
        let timezone = player
            .timezone
            .parse::<Tz>()
            .map_err(|_| ChessDashError::timezone(&player.timezone))?;
        Self::new(player.username.clone(), timezone)
    }

    /// Parse an archive document
    #[instrument(skip(self, json), fields(user = %self.username, tz = %self.timezone))]
    pub fn import_str(&self, json: &str) -> Result<(GameTable, ImportSummary)> {
        let document: ArchiveDocument = serde_json::from_str(json)
            .map_err(|e| {
                ChessDashError::import_with_source("Archive is not a chess.com games document", e)
            })?;

        let mut table = GameTable::new();
        let mut summary = ImportSummary::default();

        for (index, value) in document.into_games().into_iter().enumerate() {
            let raw: RawGame = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed archive entry");
                    summary.malformed += 1;
                    continue;
                }
            };

            match self.convert(raw) {
                Ok(record) => {
                    if record.end_time_local.is_none() {
                        summary.missing_timestamp += 1;
                    }
                    summary.imported += 1;
                    table.push(record);
                }
                Err(e) => {
                    warn!(index, error = %e, "Skipping game");
                    summary.foreign += 1;
                }
            }
        }

        info!(
            imported = summary.imported,
            missing_timestamp = summary.missing_timestamp,
            foreign = summary.foreign,
            malformed = summary.malformed,
            "Imported archive"
        );
        Ok((table, summary))
    }

    /// Read and parse an archive file
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<(GameTable, ImportSummary)> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            let message = format!("Failed to read archive {}", path.display());
            ChessDashError::import_with_source(message, e)
        })?;
        self.import_str(&json)
    }

    fn convert(&self, raw: RawGame) -> Result<GameRecord> {
        let (side, user, opponent) = if raw.white.username.eq_ignore_ascii_case(&self.username) {
            (Side::White, &raw.white, &raw.black)
        } else if raw.black.username.eq_ignore_ascii_case(&self.username) {
            (Side::Black, &raw.black, &raw.white)
        } else {
            bail!(ChessDashError::import(format!(
                "{} played neither side of {} vs {}",
                self.username, raw.white.username, raw.black.username
            )));
        };

        Ok(GameRecord {
            end_time_local: raw.end_time.and_then(|secs| self.localize(secs)),
            user_result_simple: Some(Outcome::from_result_code(&user.result)),
            game_url: raw.url,
            time_control: raw.time_control,
            time_class: raw.time_class,
            rated: raw.rated,
            user_played_as: Some(side),
            user_rating: user.rating,
            opponent_username: Some(opponent.username.clone()),
            opponent_rating: opponent.rating,
        })
    }

    fn localize(&self, epoch_secs: i64) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::from_timestamp(epoch_secs, 0)?;
        let local = utc.with_timezone(&self.timezone);
        let offset = local.offset().fix();
        Some(local.with_timezone(&offset))
    }
}

/// Parse an archive document for `username` in `timezone`
pub fn load_archive(
    json: &str,
    username: &str,
    timezone: Tz,
) -> Result<(GameTable, ImportSummary)> {
    ArchiveImporter::new(username, timezone)?.import_str(json)
}

/// Read and parse an archive file for `username` in `timezone`
pub fn load_archive_file<P: AsRef<Path>>(
    path: P,
    username: &str,
    timezone: Tz,
) -> Result<(GameTable, ImportSummary)> {
    ArchiveImporter::new(username, timezone)?.import_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const ARCHIVE: &str = r#"{
        "games": [
            {
                "url": "https://www.chess.com/game/live/1",
                "time_control": "180+2",
                "time_class": "blitz",
                "rated": true,
                "end_time": 1704067200,
                "white": {"username": "Lickumoo", "rating": 1500, "result": "win"},
                "black": {"username": "opponent1", "rating": 1480, "result": "resigned"}
            },
            {
                "url": "https://www.chess.com/game/live/2",
                "time_control": "600",
                "time_class": "rapid",
                "rated": false,
                "end_time": 1704110400,
                "white": {"username": "opponent2", "rating": 1600, "result": "agreed"},
                "black": {"username": "lickumoo", "rating": 1510, "result": "agreed"}
            },
            {
                "url": "https://www.chess.com/game/live/3",
                "time_control": "60",
                "end_time": 1704110400,
                "white": {"username": "someone", "result": "win"},
                "black": {"username": "else", "result": "timeout"}
            },
            {"url": "https://www.chess.com/game/live/4"},
            {
                "url": "https://www.chess.com/game/daily/5",
                "time_control": "1/86400",
                "time_class": "daily",
                "white": {"username": "opponent3", "result": "win"},
                "black": {"username": "lickumoo", "result": "checkmated"}
            }
        ]
    }"#;

    #[test]
    fn test_import_monthly_archive() {
        let (table, summary) =
            load_archive(ARCHIVE, "lickumoo", chrono_tz::Europe::Berlin).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                missing_timestamp: 1,
                foreign: 1,
                malformed: 1,
            }
        );
        assert_eq!(table.len(), 3);

        let first = &table.rows()[0];
        assert_eq!(first.user_result_simple, Some(Outcome::Win));
        assert_eq!(first.user_played_as, Some(Side::White));
        assert_eq!(first.opponent_username.as_deref(), Some("opponent1"));
        assert_eq!(first.user_rating, Some(1500));
        assert!(first.rated);

        // 2024-01-01 00:00 UTC is 01:00 in Berlin
        let ts = first.end_time_local.unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 1, 1, 1));
        assert_eq!(ts.offset().local_minus_utc(), 3600);

        let second = &table.rows()[1];
        assert_eq!(second.user_result_simple, Some(Outcome::Draw));
        assert_eq!(second.user_played_as, Some(Side::Black));
        assert_eq!(second.time_label(), "10 min");

        let third = &table.rows()[2];
        assert_eq!(third.user_result_simple, Some(Outcome::Loss));
        assert!(third.end_time_local.is_none());
        assert_eq!(third.time_label(), "daily (correspondence)");
    }

    #[test]
    fn test_import_bare_array() {
        let json = r#"[{
            "end_time": 1719792000,
            "white": {"username": "a", "result": "stalemate"},
            "black": {"username": "B", "result": "stalemate"}
        }]"#;
        let (table, summary) = load_archive(json, "b", chrono_tz::America::New_York).unwrap();

        assert_eq!(summary.imported, 1);
        // 2024-07-01 00:00 UTC is 20:00 the previous day in New York (EDT)
        let ts = table.rows()[0].end_time_local.unwrap();
        assert_eq!((ts.day(), ts.hour()), (30, 20));
        assert_eq!(ts.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn test_import_rejects_non_archive_json() {
        let err = load_archive(r#"{"players": []}"#, "b", chrono_tz::UTC).unwrap_err();
        assert!(matches!(err, ChessDashError::Import { .. }));
    }

    #[test]
    fn test_username_required() {
        let err = ArchiveImporter::new("  ", chrono_tz::UTC).unwrap_err();
        assert!(matches!(err, ChessDashError::Validation { .. }));
    }

    #[test]
    fn test_from_config_rejects_unknown_zone() {
        let player = PlayerConfig {
            username: "lickumoo".to_string(),
            timezone: "Nowhere/Land".to_string(),
        };
        let err = ArchiveImporter::from_config(&player).unwrap_err();
        assert!(matches!(err, ChessDashError::Timezone { .. }));
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2024-01.json");
        std::fs::write(&path, ARCHIVE).unwrap();

        let (table, _) = load_archive_file(&path, "LICKUMOO", chrono_tz::UTC).unwrap();
        assert_eq!(table.len(), 3);

        let missing =
            load_archive_file(dir.path().join("absent.json"), "lickumoo", chrono_tz::UTC)
                .unwrap_err();
        assert!(matches!(missing, ChessDashError::Import { .. }));
        assert!(missing.to_string().contains("absent.json"));
        assert!(std::error::Error::source(&missing).is_some());
    }
}
