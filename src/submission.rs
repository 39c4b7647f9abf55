//! Multi-player batch submission.
//!
//! A submission arrives as a loose set of form fields: a player count, a
//! shared `date` and `place`, and a `name{i}` / `number{i}` pair per player.
//! [`submit`] validates every player in order, stopping at the first bad one,
//! and only then hands the whole batch to the store as one atomic write.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{debug, info};
use crate::store::{NewRecord, RecordStore, ScoreRecord, StoreError};

/// Form key holding the number of players.
pub const NUM_PLAYERS_FIELD: &str = "num_players";
/// Form key holding the shared event date.
pub const DATE_FIELD: &str = "date";
/// Form key holding the shared event place.
pub const PLACE_FIELD: &str = "place";

/// Form key for the name of the player at zero-based `index`.
pub fn name_field(index: usize) -> String {
    format!("name{}", index)
}

/// Form key for the score of the player at zero-based `index`.
pub fn number_field(index: usize) -> String {
    format!("number{}", index)
}

/// Why a player entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    NameRequired,
    ScoreRequired,
    InvalidNumber,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NameRequired => "name required",
            Self::ScoreRequired => "score required",
            Self::InvalidNumber => "must be a valid number",
        })
    }
}

/// A rejected player entry. `player` is 1-based.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("player {player}: {reason}")]
pub struct ValidationError {
    pub player: usize,
    pub reason: ValidationReason,
}

/// The form itself is unusable (no usable player count).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("number of players is required")]
    MissingPlayerCount,

    #[error("number of players must be a non-negative integer, got '{0}'")]
    InvalidPlayerCount(String),
}

/// Errors returned by [`submit`].
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A raw multi-player submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    pub num_players: usize,
    pub date: Option<String>,
    pub place: Option<String>,
    fields: HashMap<String, String>,
}

impl SubmissionForm {
    /// An empty form for `num_players` players sharing `date` and `place`.
    /// Empty labels are treated as absent.
    pub fn new(num_players: usize, date: Option<String>, place: Option<String>) -> Self {
        Self {
            num_players,
            date: non_empty(date),
            place: non_empty(place),
            fields: HashMap::new(),
        }
    }

    /// Build a form from flat form fields (`num_players`, `date`, `place`,
    /// `name{i}`, `number{i}`).
    pub fn from_fields(mut fields: HashMap<String, String>) -> Result<Self, FormError> {
        let raw = fields
            .remove(NUM_PLAYERS_FIELD)
            .ok_or(FormError::MissingPlayerCount)?;
        let num_players = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| FormError::InvalidPlayerCount(raw.clone()))?;

        let date = fields.remove(DATE_FIELD);
        let place = fields.remove(PLACE_FIELD);

        let mut form = Self::new(num_players, date, place);
        form.fields = fields;
        Ok(form)
    }

    /// Set a raw field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set the name and score fields of the player at zero-based `index`.
    pub fn with_player(self, index: usize, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.with_field(name_field(index), name)
            .with_field(number_field(index), number)
    }

    /// Raw value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Validate every player in order and build the batch.
    ///
    /// Stops at the first invalid player; later players are not inspected.
    pub fn validate(&self) -> Result<Vec<NewRecord>, ValidationError> {
        (0..self.num_players)
            .map(|index| self.validate_player(index))
            .collect()
    }

    fn validate_player(&self, index: usize) -> Result<NewRecord, ValidationError> {
        let reject = |reason| ValidationError {
            player: index + 1,
            reason,
        };

        let name = match self.field(&name_field(index)) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(reject(ValidationReason::NameRequired)),
        };

        let number = match self.field(&number_field(index)) {
            Some(number) if !number.is_empty() => number,
            _ => return Err(reject(ValidationReason::ScoreRequired)),
        };

        let score = parse_score(number).ok_or_else(|| reject(ValidationReason::InvalidNumber))?;

        Ok(NewRecord::new(
            name,
            score,
            self.date.clone(),
            self.place.clone(),
        ))
    }
}

/// A submission as sent by structured (JSON) clients.
///
/// `num_players` defaults to the number of entries; a larger count leaves the
/// trailing players empty, which fails validation the same way a form with
/// missing fields does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub num_players: Option<usize>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<ScoreField>,
}

/// A score given either as a JSON number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScoreField {
    Number(f64),
    Text(String),
}

impl From<SubmissionPayload> for SubmissionForm {
    fn from(payload: SubmissionPayload) -> Self {
        let num_players = payload.num_players.unwrap_or(payload.players.len());
        let mut form = Self::new(num_players, payload.date, payload.place);

        for (index, entry) in payload.players.into_iter().enumerate() {
            if let Some(name) = entry.name {
                form.fields.insert(name_field(index), name);
            }
            let number = match entry.number {
                Some(ScoreField::Number(n)) => n.to_string(),
                Some(ScoreField::Text(text)) => text,
                None => continue,
            };
            form.fields.insert(number_field(index), number);
        }
        form
    }
}

/// Parse a score as a finite real number, ignoring surrounding whitespace.
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|score| score.is_finite())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    /// Sum of every score in the batch.
    pub total_score: f64,
    /// The created records, in submission order.
    pub records: Vec<ScoreRecord>,
}

/// Validate a submission and store it as one batch.
///
/// On a validation error nothing is written. A zero-player submission
/// succeeds with no records and a zero total.
pub fn submit<S>(store: &S, form: &SubmissionForm) -> Result<SubmissionOutcome, SubmitError>
where
    S: RecordStore + ?Sized,
{
    let batch = match form.validate() {
        Ok(batch) => batch,
        Err(e) => {
            debug!(player = e.player, reason = %e.reason, "submission rejected");
            return Err(e.into());
        }
    };

    let total_score = batch.iter().fold(0.0, |total, r| total + r.score);

    let records = if batch.is_empty() {
        Vec::new()
    } else {
        store.create_many(&batch)?
    };

    info!(
        players = records.len(),
        total_score = total_score,
        "submission stored"
    );
    Ok(SubmissionOutcome {
        total_score,
        records,
    })
}
