//! Game records and the in-memory game table

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result codes chess.com reports for a drawn game
const DRAW_CODES: [&str; 6] = [
    "agreed",
    "repetition",
    "stalemate",
    "insufficient",
    "50move",
    "timevsinsufficient",
];

/// Display order of chess.com time classes
const TIME_CLASS_ORDER: [&str; 5] = ["bullet", "blitz", "rapid", "daily", "classical"];

/// Game outcome from the tracked user's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The user won
    Win,
    /// Drawn game
    Draw,
    /// The user lost
    Loss,
}

impl Outcome {
    /// All outcomes in canonical order
    pub const ALL: [Outcome; 3] = [Outcome::Win, Outcome::Draw, Outcome::Loss];

    /// Stacking position used by chart consumers
    pub fn order_key(self) -> u8 {
        match self {
            Outcome::Win => 0,
            Outcome::Draw => 1,
            Outcome::Loss => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.order_key() as usize
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Loss => "loss",
        }
    }

    /// Simplify a chess.com per-side result code
    pub fn from_result_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code == "win" {
            Outcome::Win
        } else if DRAW_CODES.contains(&code.as_str()) {
            Outcome::Draw
        } else {
            Outcome::Loss
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour the user played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// White pieces
    White,
    /// Black pieces
    Black,
}

/// One finished game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// End of game in the user's local time zone
    pub end_time_local: Option<DateTime<FixedOffset>>,
    /// Outcome from the user's side
    pub user_result_simple: Option<Outcome>,
    /// chess.com game URL
    pub game_url: Option<String>,
    /// Raw time control, e.g. `180+2`
    pub time_control: Option<String>,
    /// chess.com time class, e.g. `blitz`
    pub time_class: Option<String>,
    /// Whether the game was rated
    pub rated: bool,
    /// Colour the user played
    pub user_played_as: Option<Side>,
    /// User rating after the game
    pub user_rating: Option<u32>,
    /// Opponent's username
    pub opponent_username: Option<String>,
    /// Opponent rating after the game
    pub opponent_rating: Option<u32>,
}

impl GameRecord {
    /// Create a record with the two fields the aggregator needs
    pub fn new(end_time_local: DateTime<FixedOffset>, outcome: Outcome) -> Self {
        Self {
            end_time_local: Some(end_time_local),
            user_result_simple: Some(outcome),
            ..Self::default()
        }
    }

    /// Set the raw time control
    pub fn with_time_control(mut self, time_control: impl Into<String>) -> Self {
        self.time_control = Some(time_control.into());
        self
    }

    /// Set the time class
    pub fn with_time_class(mut self, time_class: impl Into<String>) -> Self {
        self.time_class = Some(time_class.into());
        self
    }

    /// Set the rated flag
    pub fn with_rated(mut self, rated: bool) -> Self {
        self.rated = rated;
        self
    }

    /// Normalized time-control label
    pub fn time_label(&self) -> String {
        time_label(self.time_control.as_deref().unwrap_or_default())
    }
}

/// Normalize a chess.com time control for display.
///
/// `"180+2"` becomes `"3+2 min"`, `"600+0"` and bare `"600"` both become
/// `"10 min"`, any `"moves/seconds"` form is daily play, and text that does
/// not parse is returned unchanged.
pub fn time_label(time_control: &str) -> String {
    let tc = time_control.trim();
    if tc.is_empty() {
        return "unknown".to_string();
    }

    if let Some((base, inc)) = tc.split_once('+') {
        return match (base.trim().parse::<u32>(), inc.trim().parse::<u32>()) {
            (Ok(base), Ok(0)) => format!("{} min", base / 60),
            (Ok(base), Ok(inc)) => format!("{}+{} min", base / 60, inc),
            _ => tc.to_string(),
        };
    }

    if tc.contains('/') {
        return "daily (correspondence)".to_string();
    }

    match tc.parse::<u32>() {
        Ok(base) => format!("{} min", base / 60),
        Err(_) => tc.to_string(),
    }
}

/// Order time classes for display: the known classes first, the rest sorted
pub fn order_time_classes<I, S>(classes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lower: Vec<String> = classes
        .into_iter()
        .map(|c| c.as_ref().to_ascii_lowercase())
        .collect();
    lower.sort();
    lower.dedup();

    let mut ordered: Vec<String> = TIME_CLASS_ORDER
        .iter()
        .filter(|known| lower.iter().any(|c| c == *known))
        .map(|known| (*known).to_string())
        .collect();
    ordered.extend(
        lower
            .into_iter()
            .filter(|c| !TIME_CLASS_ORDER.contains(&c.as_str())),
    );
    ordered
}

/// Ordered collection of game records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTable {
    rows: Vec<GameRecord>,
}

impl GameTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn push(&mut self, record: GameRecord) {
        self.rows.push(record);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.rows.iter()
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[GameRecord] {
        &self.rows
    }

    /// Copy the rows matching `predicate` into a new table
    pub fn retain_cloned<F>(&self, mut predicate: F) -> GameTable
    where
        F: FnMut(&GameRecord) -> bool,
    {
        self.rows
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Time classes present in the table, in display order
    pub fn time_classes(&self) -> Vec<String> {
        order_time_classes(
            self.rows
                .iter()
                .map(|r| r.time_class.as_deref().unwrap_or("unknown")),
        )
    }
}

impl From<Vec<GameRecord>> for GameTable {
    fn from(rows: Vec<GameRecord>) -> Self {
        Self { rows }
    }
}

impl FromIterator<GameRecord> for GameTable {
    fn from_iter<T: IntoIterator<Item = GameRecord>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GameTable {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for GameTable {
    type Item = GameRecord;
    type IntoIter = std::vec::IntoIter<GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
