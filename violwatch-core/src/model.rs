// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Wire-level data exchanged with the detector server.

use crate::error::{DashboardError, DecodeResultExt, Result};
use serde::{Deserialize, Serialize};

/// One detected rule violation.
///
/// `file` is both the deduplication key of the feed and the path suffix of the
/// screenshot. `ts` is a display string and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub file: String,
    pub ts: String,
}

impl ViolationRecord {
    pub fn new(file: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ts: ts.into(),
        }
    }

    /// Decode one event-stream payload.
    ///
    /// `source` names where the payload came from and ends up in the error.
    pub fn from_json(payload: &str, source: &str) -> Result<Self> {
        serde_json::from_str(payload).malformed_at(source)
    }
}

/// Detector process state as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorStatus {
    pub running: bool,
}

/// Aggregate violation counts, one value per label (the server sends the last
/// seven days as `dd.mm`, oldest first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationStats {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

impl ViolationStats {
    /// Reject payloads whose two series cannot be paired up.
    pub fn validate(self) -> Result<Self> {
        if self.labels.len() != self.values.len() {
            return Err(DashboardError::InconsistentStats {
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }
        Ok(self)
    }

    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Label/value pairs in server order.
    pub fn bars(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
