// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use violwatch_core::{ViolationFeed, ViolationRecord};
use violwatch_test_utils::record;

#[test]
fn test_insert_front_puts_newest_on_top() {
    // Arrange
    let mut feed = ViolationFeed::new();

    // Act
    feed.insert_front(record(1));
    feed.insert_front(record(2));

    // Assert
    assert_eq!(feed.files(), vec!["2.jpg", "1.jpg"]);
    assert_eq!(feed.len(), 2);
}

#[test]
fn test_duplicate_file_is_ignored() {
    // Arrange
    let mut feed = ViolationFeed::new();
    feed.insert_front(record(1));
    feed.insert_front(record(2));

    // Act
    let inserted = feed.insert_front(ViolationRecord::new("1.jpg", "2030-01-01 00:00:00"));

    // Assert
    assert!(!inserted);
    assert_eq!(feed.files(), vec!["2.jpg", "1.jpg"]);
    assert_eq!(feed.get("1.jpg"), Some(&record(1)));
}

#[test]
fn test_dedup_is_by_file_only() {
    // Arrange
    let mut feed = ViolationFeed::new();
    feed.insert_front(ViolationRecord::new("a.jpg", "same"));

    // Act
    let inserted = feed.insert_front(ViolationRecord::new("b.jpg", "same"));

    // Assert
    assert!(inserted);
    assert!(feed.contains("a.jpg"));
    assert!(feed.contains("b.jpg"));
}

#[test]
fn test_empty_feed() {
    let feed = ViolationFeed::new();
    assert!(feed.is_empty());
    assert_eq!(feed.get("missing.jpg"), None);
    assert_eq!(feed.iter().count(), 0);
}
