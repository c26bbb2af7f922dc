//! Row mutation rules.
//!
//! Pure functions from (current row, request) to the resulting row. Nothing
//! here touches shared state: the caller holds the table lock and swaps the
//! returned row into place.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::mutation::clock::Clock;
use crate::storage::{Column, PrimaryKey, Row};

/// Kind of a single column update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Put,
    Delete,
    DeleteAll,
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateType::Put => write!(f, "PUT"),
            UpdateType::Delete => write!(f, "DELETE"),
            UpdateType::DeleteAll => write!(f, "DELETE_ALL"),
        }
    }
}

/// One step of a row update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnUpdate {
    /// Rewrite an existing version.
    ///
    /// Without a timestamp this replaces the latest version of the column
    /// with a freshly stamped one. With a timestamp it overwrites the value
    /// of exactly that version. If the targeted version does not exist the
    /// step does nothing, unless the same update already deleted versions of
    /// this column (see [`apply_update`]).
    Put(Column),
    /// Remove the single version at (name, timestamp).
    Delete { name: String, timestamp: i64 },
    /// Remove every version of the column.
    DeleteAll { name: String },
}

impl ColumnUpdate {
    pub fn put(column: Column) -> Self {
        ColumnUpdate::Put(column)
    }

    pub fn delete(name: impl Into<String>, timestamp: i64) -> Self {
        ColumnUpdate::Delete {
            name: name.into(),
            timestamp,
        }
    }

    pub fn delete_all(name: impl Into<String>) -> Self {
        ColumnUpdate::DeleteAll { name: name.into() }
    }

    pub fn kind(&self) -> UpdateType {
        match self {
            ColumnUpdate::Put(_) => UpdateType::Put,
            ColumnUpdate::Delete { .. } => UpdateType::Delete,
            ColumnUpdate::DeleteAll { .. } => UpdateType::DeleteAll,
        }
    }

    /// name of the column this step targets
    pub fn column_name(&self) -> &str {
        match self {
            ColumnUpdate::Put(column) => &column.name,
            ColumnUpdate::Delete { name, .. } | ColumnUpdate::DeleteAll { name } => name,
        }
    }
}

/// Apply a PUT: every column becomes a new cell version.
///
/// Version-less columns all receive the same `now`, raised above the
/// column's current latest version when that one is stamped later, so the
/// written value always becomes the latest. Columns are appended to the
/// existing row rather than replacing earlier versions of the same name;
/// only a version with an identical (name, timestamp) is overwritten.
pub fn apply_put(existing: Option<&Row>, key: &PrimaryKey, columns: &[Column], now: i64) -> Row {
    let Some(row) = existing else {
        return Row::new(key.clone(), columns.iter().map(|c| c.stamped(now)));
    };

    let mut next = row.clone();
    for column in columns {
        let latest = row.latest_column(&column.name).and_then(|c| c.timestamp);
        next.insert_version(column.stamped(after(latest, now)));
    }
    next
}

/// `now`, or one past `latest` if that is not already earlier
fn after(latest: Option<i64>, now: i64) -> i64 {
    match latest {
        Some(latest) => now.max(latest.saturating_add(1)),
        None => now,
    }
}

/// Apply an UPDATE, step by step.
///
/// Each step sees the result of the previous one, so a `DeleteAll` followed
/// by a `Put` of the same column observes the deleted state. Returns `None`
/// when there is no existing row; updates never create rows.
///
/// A `Put` whose target version is missing is a no-op, with one exception:
/// if an earlier step of the same update was a delete of that column name,
/// whether or not it removed anything, the put writes its value as a new
/// version instead. So "delete all, then put" always leaves exactly one
/// version.
///
/// A version-less `Put` that replaces the latest version is stamped after
/// it, even when that version carries a timestamp ahead of the clock.
pub fn apply_update(existing: Option<&Row>, updates: &[ColumnUpdate], clock: &dyn Clock) -> Option<Row> {
    let mut row = existing?.clone();
    let mut cleared = BTreeSet::new();
    for update in updates {
        apply_step(&mut row, update, clock, &mut cleared);
    }
    Some(row)
}

fn apply_step<'a>(
    row: &mut Row,
    update: &'a ColumnUpdate,
    clock: &dyn Clock,
    cleared: &mut BTreeSet<&'a str>,
) {
    match update {
        ColumnUpdate::Put(column) => {
            let target = match column.timestamp {
                None => row.latest_column(&column.name).and_then(|c| c.timestamp),
                Some(timestamp) => row
                    .get_column_version(&column.name, timestamp)
                    .map(|_| timestamp),
            };
            match target {
                Some(timestamp) => {
                    row.remove_version(&column.name, timestamp);
                }
                None if cleared.contains(column.name.as_str()) => {}
                None => {
                    trace!(
                        column = %column.name,
                        timestamp = ?column.timestamp,
                        "put skipped: no version to replace"
                    );
                    return;
                }
            }
            let timestamp = match column.timestamp {
                Some(timestamp) => timestamp,
                None => after(target, clock.now_nanos()),
            };
            row.insert_version(column.stamped(timestamp));
        }
        ColumnUpdate::Delete { name, timestamp } => {
            row.remove_version(name, *timestamp);
            cleared.insert(name);
        }
        ColumnUpdate::DeleteAll { name } => {
            row.remove_all_versions(name);
            cleared.insert(name);
        }
    }
}
