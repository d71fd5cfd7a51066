use std::fmt;

use serde::Serialize;

/// One record from a split, exactly as the hub returned it.
pub type Row = serde_json::Value;

/// A fully materialized split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub split: String,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split metadata as reported by the hub at open time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub split: String,
    pub num_rows: u64,
    pub streaming: bool,
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} rows{}",
            self.name,
            self.split,
            self.num_rows,
            if self.streaming { " (streaming)" } else { "" }
        )
    }
}
