//! Point-allocation schema
//!
//! An assignment's `allocation.json` describes questions, sub-questions and
//! the criteria they are scored by. A node is a criterion iff it is an object
//! carrying both `type` and `score`; every other object is a group of further
//! labelled nodes.
//!
//! ```json
//! {
//!   "Q1": { "type": "partial", "score": 10 },
//!   "Q2": {
//!     "A": { "type": "full-or-zero", "score": 5, "answer": "x = 2" },
//!     "B": { "type": "full-or-zero", "score": 5 }
//!   }
//! }
//! ```

mod flatten;
pub mod path;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::bail_schema;
use crate::error::{Result, SaitenError};
use crate::store::io::write_atomic;
pub use flatten::Flatten;
pub use path::{CriterionPath, FLAT_KEY_SEPARATOR};

const TYPE_KEY: &str = "type";
const SCORE_KEY: &str = "score";
const ANSWER_KEY: &str = "answer";

/// How a criterion may be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Either the full score or nothing
    FullOrZero,
    /// Any integer between zero and the full score
    Partial,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::FullOrZero => "full-or-zero",
            ScoringMode::Partial => "partial",
        }
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full-or-zero" => Ok(ScoringMode::FullOrZero),
            "partial" => Ok(ScoringMode::Partial),
            other => Err(format!(
                "unknown scoring type {:?} (expected \"full-or-zero\" or \"partial\")",
                other
            )),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf scoring unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub mode: ScoringMode,
    pub max_score: u32,
    pub reference_answer: Option<String>,
}

impl Criterion {
    pub fn new(mode: ScoringMode, max_score: u32) -> Self {
        Self {
            mode,
            max_score,
            reference_answer: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.reference_answer = Some(answer.into());
        self
    }
}

/// A node of the allocation tree
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationNode {
    /// A question or sub-question containing further labelled nodes
    Group(IndexMap<String, AllocationNode>),
    /// A leaf criterion
    Criterion(Criterion),
}

/// Parsed allocation schema for one assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationSchema {
    questions: IndexMap<String, AllocationNode>,
}

impl AllocationSchema {
    /// Parse a schema from its JSON representation.
    ///
    /// The root must be an object of top-level questions. Criteria whose flat
    /// keys collide (labels containing `_` make this possible) are rejected,
    /// because their scores could not be told apart in the ledger.
    pub fn parse(raw: &Value) -> Result<Self> {
        let root = CriterionPath::root();
        let Value::Object(map) = raw else {
            bail_schema!(root, format!("expected an object, found {}", kind_of(raw)));
        };
        if is_criterion(map) {
            bail_schema!(root, "the root must contain questions, not a single criterion");
        }

        let schema = Self {
            questions: parse_group(map, &root)?,
        };
        schema.check_flat_keys()?;
        Ok(schema)
    }

    /// Parse a schema from JSON text
    pub fn parse_str(content: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(content)
            .map_err(|e| SaitenError::schema(CriterionPath::root(), e.to_string()))?;
        Self::parse(&raw)
    }

    /// Load `allocation.json`; a missing file yields an empty schema
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no allocation file, using empty schema");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| SaitenError::io_operation("read", path.display(), e))?;
        Self::parse_str(&content)
    }

    /// Write the schema to `path` as JSON indented by four spaces, keeping
    /// non-ASCII labels unescaped.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.to_value().serialize(&mut ser)?;
        buf.push(b'\n');
        write_atomic(path, &buf)?;
        tracing::debug!(path = %path.display(), criteria = self.len(), "allocation_saved");
        Ok(())
    }

    /// Delete the schema file at `path`
    pub fn remove(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(SaitenError::not_found("allocation file", path.display()));
        }
        fs::remove_file(path).map_err(|e| SaitenError::io_operation("remove", path.display(), e))?;
        tracing::debug!(path = %path.display(), "allocation_removed");
        Ok(())
    }

    /// Top-level questions in definition order
    pub fn questions(&self) -> &IndexMap<String, AllocationNode> {
        &self.questions
    }

    /// Every criterion with its path, depth-first in definition order
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(self.questions.iter())
    }

    /// Number of criteria
    pub fn len(&self) -> usize {
        self.flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.flatten().next().is_none()
    }

    /// Sum of every criterion's maximum score
    pub fn max_total(&self) -> u64 {
        self.flatten().map(|(_, c)| u64::from(c.max_score)).sum()
    }

    /// Length of the longest path to a criterion
    pub fn depth(&self) -> usize {
        self.flatten().map(|(p, _)| p.depth()).max().unwrap_or(0)
    }

    /// Look up a criterion by its flat key
    pub fn criterion(&self, flat_key: &str) -> Option<&Criterion> {
        self.flatten()
            .find(|(path, _)| path.flat_key() == flat_key)
            .map(|(_, c)| c)
    }

    /// Serialize back to the `allocation.json` shape
    pub fn to_value(&self) -> Value {
        Value::Object(group_to_value(&self.questions))
    }

    fn check_flat_keys(&self) -> Result<()> {
        let mut seen: HashMap<String, CriterionPath> = HashMap::new();
        for (path, _) in self.flatten() {
            let key = path.flat_key();
            if let Some(first) = seen.get(&key) {
                bail_schema!(
                    path,
                    format!("flat key {:?} is also produced by {}", key, first)
                );
            }
            seen.insert(key, path);
        }
        Ok(())
    }
}

fn is_criterion(map: &Map<String, Value>) -> bool {
    map.contains_key(TYPE_KEY) && map.contains_key(SCORE_KEY)
}

fn parse_group(
    map: &Map<String, Value>,
    path: &CriterionPath,
) -> Result<IndexMap<String, AllocationNode>> {
    let mut children = IndexMap::with_capacity(map.len());
    for (label, value) in map {
        let child_path = path.child(label);
        let node = parse_node(value, &child_path)?;
        children.insert(label.clone(), node);
    }
    Ok(children)
}

fn parse_node(value: &Value, path: &CriterionPath) -> Result<AllocationNode> {
    let Value::Object(map) = value else {
        bail_schema!(
            path,
            format!("expected an object, found {}", kind_of(value))
        );
    };

    if !is_criterion(map) {
        return Ok(AllocationNode::Group(parse_group(map, path)?));
    }

    let mode = match &map[TYPE_KEY] {
        Value::String(s) => s
            .parse::<ScoringMode>()
            .map_err(|reason| SaitenError::schema(path, reason))?,
        other => bail_schema!(
            path,
            format!("\"type\" must be a string, found {}", kind_of(other))
        ),
    };

    let max_score = map[SCORE_KEY]
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            SaitenError::schema(
                path,
                format!(
                    "\"score\" must be a non-negative integer, found {}",
                    map[SCORE_KEY]
                ),
            )
        })?;

    let reference_answer = match map.get(ANSWER_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => bail_schema!(
            path,
            format!("\"answer\" must be a string, found {}", kind_of(other))
        ),
    };

    Ok(AllocationNode::Criterion(Criterion {
        mode,
        max_score,
        reference_answer,
    }))
}

fn group_to_value(children: &IndexMap<String, AllocationNode>) -> Map<String, Value> {
    children
        .iter()
        .map(|(label, node)| {
            let value = match node {
                AllocationNode::Group(grandchildren) => {
                    Value::Object(group_to_value(grandchildren))
                }
                AllocationNode::Criterion(c) => {
                    let mut obj = Map::new();
                    obj.insert(TYPE_KEY.into(), Value::from(c.mode.as_str()));
                    obj.insert(SCORE_KEY.into(), Value::from(c.max_score));
                    if let Some(answer) = &c.reference_answer {
                        obj.insert(ANSWER_KEY.into(), Value::from(answer.as_str()));
                    }
                    Value::Object(obj)
                }
            };
            (label.clone(), value)
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
