//! Score aggregation
//!
//! Combines grader input for each criterion of an [`AllocationSchema`] into a
//! flat [`ScoreSet`] and a total. Nothing here touches the filesystem.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::allocation::{AllocationSchema, Criterion, ScoringMode};
use crate::bail_input;
use crate::error::{Result, SaitenError};

/// Flat criterion key -> awarded points, in schema order
pub type ScoreSet = IndexMap<String, u32>;

/// Grader input for one criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafInput {
    /// Checkbox-style input for full-or-zero criteria
    Flag(bool),
    /// Numeric input
    Points(i64),
}

impl FromStr for LeafInput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => return Ok(LeafInput::Flag(true)),
            "false" | "no" | "n" | "off" => return Ok(LeafInput::Flag(false)),
            _ => {}
        }
        trimmed
            .parse::<i64>()
            .map(LeafInput::Points)
            .map_err(|_| format!("expected an integer or true/false, got {:?}", s))
    }
}

impl fmt::Display for LeafInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafInput::Flag(b) => write!(f, "{}", b),
            LeafInput::Points(v) => write!(f, "{}", v),
        }
    }
}

/// Result of aggregating one student's input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub scores: ScoreSet,
    pub total: u64,
}

/// Score a single criterion.
///
/// Values are validated, never clamped: callers that take interactive input
/// should re-prompt on `OutOfRange`.
pub fn score_leaf(criterion: &Criterion, input: LeafInput) -> Result<u32> {
    score_leaf_for("criterion", criterion, input)
}

fn score_leaf_for(key: &str, criterion: &Criterion, input: LeafInput) -> Result<u32> {
    let max = criterion.max_score;
    match (criterion.mode, input) {
        (ScoringMode::FullOrZero, LeafInput::Flag(awarded)) => Ok(if awarded { max } else { 0 }),
        (ScoringMode::FullOrZero, LeafInput::Points(value)) => {
            if value == 0 || value == i64::from(max) {
                Ok(value as u32)
            } else {
                Err(SaitenError::OutOfRange {
                    key: key.to_string(),
                    value,
                    allowed: format!("0 or {}", max),
                })
            }
        }
        (ScoringMode::Partial, LeafInput::Points(value)) => {
            if (0..=i64::from(max)).contains(&value) {
                Ok(value as u32)
            } else {
                Err(SaitenError::OutOfRange {
                    key: key.to_string(),
                    value,
                    allowed: format!("0..={}", max),
                })
            }
        }
        (ScoringMode::Partial, LeafInput::Flag(_)) => bail_input!(
            key,
            format!("partial criterion expects a number between 0 and {}", max)
        ),
    }
}

/// Aggregate grader input against a schema.
///
/// Every criterion appears in the result, in schema order. Criteria without
/// input are recorded as explicit zeros. Input keys that name no criterion
/// are rejected so a mistyped key never silently drops a score.
#[tracing::instrument(level = "debug", skip_all, fields(inputs = inputs.len()))]
pub fn aggregate(
    schema: &AllocationSchema,
    inputs: &IndexMap<String, LeafInput>,
) -> Result<Aggregate> {
    let mut scores = ScoreSet::new();
    let mut total: u64 = 0;
    let mut matched = 0usize;

    for (path, criterion) in schema.flatten() {
        let key = path.flat_key();
        let points = match inputs.get(&key) {
            Some(input) => {
                matched += 1;
                score_leaf_for(&key, criterion, *input)?
            }
            None => 0,
        };
        total += u64::from(points);
        scores.insert(key, points);
    }

    if matched < inputs.len() {
        if let Some(unknown) = inputs.keys().find(|k| !scores.contains_key(k.as_str())) {
            bail_input!(unknown.as_str(), "no criterion with this key in the allocation");
        }
    }

    tracing::debug!(criteria = scores.len(), total, "aggregated");
    Ok(Aggregate { scores, total })
}
