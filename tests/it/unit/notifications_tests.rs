//! Unit tests for notifications module.

use std::time::Duration;
use worldhost::notifications::{Notice, NoticeBoard, NoticeLevel};

#[test]
fn test_notice_creation() {
    let notice = Notice::success("Saved");
    assert_eq!(notice.message, "Saved");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.level.label(), "ok");
}

#[test]
fn test_notice_ids_are_unique() {
    let a = Notice::info("a");
    let b = Notice::info("b");
    assert_ne!(a.id, b.id);
}

#[test]
fn test_notice_board() {
    let mut board = NoticeBoard::new();
    assert_eq!(board.count(), 0);
    assert!(board.latest().is_none());

    let first = board.push(Notice::success("Message 1"));
    board.push(Notice::error("Message 2"));
    assert_eq!(board.count(), 2);
    assert_eq!(board.latest().unwrap().message, "Message 2");

    assert!(board.remove(first));
    assert!(!board.remove(first));
    assert_eq!(board.notices().len(), 1);

    board.clear();
    assert_eq!(board.count(), 0);
}

#[test]
fn test_fresh_notice_is_not_expired() {
    let notice = Notice::warning("Test").with_duration(Duration::from_secs(10));
    assert!(!notice.is_expired());
    assert!(notice.remaining_percent() > 0.99);
}

#[test]
fn test_zero_duration_notice_is_pruned() {
    let mut board = NoticeBoard::new();
    board.push(Notice::info("gone").with_duration(Duration::ZERO));
    board.push(Notice::info("kept").with_duration(Duration::from_secs(60)));

    assert_eq!(board.prune_expired(), 1);
    assert_eq!(board.latest().unwrap().message, "kept");
}

#[test]
fn test_level_durations() {
    assert_eq!(NoticeLevel::Success.default_duration(), Duration::from_secs(3));
    assert_eq!(NoticeLevel::Info.default_duration(), Duration::from_secs(3));
    assert_eq!(NoticeLevel::Warning.default_duration(), Duration::from_secs(4));
    assert_eq!(NoticeLevel::Error.default_duration(), Duration::from_secs(5));
}
