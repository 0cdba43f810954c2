// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Newest-first, file-keyed violation list.
//!
//! [`ViolationFeed`] mirrors exactly what the feed panel shows. The controller
//! consults it before touching the view, so the view only ever receives records
//! that are not yet on screen.

use crate::model::ViolationRecord;
use std::collections::{HashSet, VecDeque};

/// Ordered set of rendered violations, keyed by `file`.
#[derive(Debug, Clone, Default)]
pub struct ViolationFeed {
    entries: VecDeque<ViolationRecord>,
    files: HashSet<String>,
}

impl ViolationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front unless an entry with the same `file` exists.
    ///
    /// Returns `true` if the record was inserted. A duplicate leaves the feed
    /// untouched, including the position of the existing entry.
    pub fn insert_front(&mut self, record: ViolationRecord) -> bool {
        if !self.files.insert(record.file.clone()) {
            return false;
        }
        self.entries.push_front(record);
        true
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains(file)
    }

    pub fn get(&self, file: &str) -> Option<&ViolationRecord> {
        if !self.contains(file) {
            return None;
        }
        self.entries.iter().find(|r| r.file == file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Front to back, i.e. newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ViolationRecord> + '_ {
        self.entries.iter()
    }

    /// File ids front to back.
    pub fn files(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.file.as_str()).collect()
    }
}
