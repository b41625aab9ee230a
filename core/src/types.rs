//! Records served by the media API.
//!
//! # Design
//! The endpoint owns these records; this crate only reads them. Only `name`,
//! `genre` and `rating` are required. Anything else the endpoint sends is kept
//! in `extra` so an entry round-trips to the object it was parsed from.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One media entry as returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub name: String,
    pub genre: String,
    pub rating: Rating,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaEntry {
    pub fn new(name: impl Into<String>, genre: impl Into<String>, rating: impl Into<Rating>) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
            rating: rating.into(),
            extra: Map::new(),
        }
    }

    /// Value bound to a display column path. Returns `None` for paths that
    /// are neither a required field nor present in `extra`.
    pub fn field(&self, path: &str) -> Option<Cell<'_>> {
        match path {
            "name" => Some(Cell::Text(&self.name)),
            "genre" => Some(Cell::Text(&self.genre)),
            "rating" => Some(Cell::from(&self.rating)),
            other => self.extra.get(other).map(Cell::from),
        }
    }
}

/// A rating is usually a number but some sources send text such as `"PG"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(Number),
    Text(String),
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Rating::Number)
            .unwrap_or_else(|| Rating::Text(value.to_string()))
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Rating::Number(value.into())
    }
}

impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Rating::Text(value.to_string())
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Number(n) => write!(f, "{n}"),
            Rating::Text(s) => f.write_str(s),
        }
    }
}

/// Borrowed view of one field, as a display widget sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Number(f64),
    Text(&'a str),
    /// Any other JSON value; shown in its JSON form.
    Other(&'a Value),
}

impl<'a> From<&'a Rating> for Cell<'a> {
    fn from(rating: &'a Rating) -> Self {
        match rating {
            Rating::Number(n) => n.as_f64().map_or(Cell::Text(""), Cell::Number),
            Rating::Text(s) => Cell::Text(s),
        }
    }
}

impl<'a> From<&'a Value> for Cell<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Cell::Other(value), Cell::Number),
            Value::String(s) => Cell::Text(s),
            other => Cell::Other(other),
        }
    }
}

impl Cell<'_> {
    /// Ordering used for column sorts: numbers before text before anything
    /// else, numbers numerically, text lexically.
    pub fn sort_cmp(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Other(a), Cell::Other(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Number(_) => 0,
            Cell::Text(_) => 1,
            Cell::Other(_) => 2,
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Other(v) => write!(f, "{v}"),
        }
    }
}
