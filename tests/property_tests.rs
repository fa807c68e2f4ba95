//! Property-based tests for file writes and log framing.

use proptest::prelude::*;
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use ztasks::io::write_file_if_changed;
use ztasks::log::{frame, frame_width};

proptest! {
    /// A second write of the same content never touches the file.
    #[test]
    fn repeated_write_is_noop(content in ".*") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let path_str = path.to_str().unwrap();

        prop_assert!(write_file_if_changed(path_str, &content).unwrap());
        let pinned = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        fs::File::options().write(true).open(&path).unwrap().set_modified(pinned).unwrap();

        prop_assert!(!write_file_if_changed(path_str, &content).unwrap());
        prop_assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), pinned);
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    /// The last write wins when contents differ.
    #[test]
    fn different_content_replaces(first in ".*", second in ".*") {
        prop_assume!(first != second);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let path_str = path.to_str().unwrap();

        write_file_if_changed(path_str, &first).unwrap();
        prop_assert!(write_file_if_changed(path_str, &second).unwrap());
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), second);
    }

    /// Frame width follows max(12 - 2 * level, 1).
    #[test]
    fn frame_width_formula(level in 0u32..1000) {
        let expected = std::cmp::max(12i64 - 2 * level as i64, 1) as usize;
        prop_assert_eq!(frame_width(level), expected);
    }

    /// The framed line is marks, message, marks.
    #[test]
    fn frame_is_symmetric(message in "[a-zA-Z0-9 ]{0,40}", level in 0u32..10) {
        let marks = "#".repeat(frame_width(level));
        prop_assert_eq!(frame(&message, level), format!("{} {} {}", marks, message, marks));
    }
}
