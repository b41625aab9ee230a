//! Terminal display widget for the media table.
//!
//! Renders a `Grid` as fixed-width text, one character cell per em of the
//! column width hint. Sorting happens here, not in the view: the rows arrive
//! in load order and `DataGrid` applies its sort keys, first key first.

use std::cmp::Ordering;
use std::str::FromStr;

use fancy_core::{Column, Grid, MediaEntry, COLUMNS};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One sort criterion. Parsed from `path` (ascending) or `-path`
/// (descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub path: String,
    pub direction: Direction,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortKeyError {
    #[error("empty sort key")]
    Empty,
    #[error("unknown sort column `{0}` (expected one of: name, genre, rating)")]
    UnknownColumn(String),
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (path, direction) = match s.strip_prefix('-') {
            Some(rest) => (rest, Direction::Descending),
            None => (s.strip_prefix('+').unwrap_or(s), Direction::Ascending),
        };
        if path.is_empty() {
            return Err(SortKeyError::Empty);
        }
        if !COLUMNS.iter().any(|c| c.sortable && c.path == path) {
            return Err(SortKeyError::UnknownColumn(path.to_string()));
        }
        Ok(SortKey {
            path: path.to_string(),
            direction,
        })
    }
}

/// Sortable text grid.
#[derive(Debug, Clone, Default)]
pub struct DataGrid {
    sort: Vec<SortKey>,
}

impl DataGrid {
    pub fn new(sort: Vec<SortKey>) -> Self {
        Self { sort }
    }

    /// Rows in display order. Stable: rows that compare equal on every key
    /// keep their load order.
    pub fn sorted_rows<'a>(&self, grid: &Grid<'a>) -> Vec<&'a MediaEntry> {
        let mut rows: Vec<&MediaEntry> = grid.rows.iter().collect();
        let keys = if grid.multi_sort { &self.sort[..] } else { &self.sort[..self.sort.len().min(1)] };
        if !keys.is_empty() {
            rows.sort_by(|a, b| {
                keys.iter()
                    .map(|key| compare(a, b, key))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }
        rows
    }

    pub fn render(&self, grid: &Grid<'_>) -> String {
        let mut out = String::new();
        push_line(&mut out, grid.columns.iter().map(|c| (c, c.header.to_string())));
        push_line(
            &mut out,
            grid.columns.iter().map(|c| (c, "-".repeat(usize::from(c.width_em)))),
        );
        for row in self.sorted_rows(grid) {
            push_line(
                &mut out,
                grid.columns
                    .iter()
                    .map(|c| (c, row.field(c.path).map(|v| v.to_string()).unwrap_or_default())),
            );
        }
        if let Some(notice) = &grid.notice {
            out.push_str(notice);
            out.push('\n');
        }
        out
    }
}

fn compare(a: &MediaEntry, b: &MediaEntry, key: &SortKey) -> Ordering {
    let ordering = match (a.field(&key.path), b.field(&key.path)) {
        (Some(x), Some(y)) => x.sort_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match key.direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

fn push_line<'c>(out: &mut String, cells: impl Iterator<Item = (&'c Column, String)>) {
    let line = cells
        .map(|(column, text)| fit(&text, usize::from(column.width_em)))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}
