//! Integration tests for the toggle pass
//!
//! These tests verify:
//! - Every matching file is flipped independently
//! - The returned history keeps only the last five changes, in walk order
//! - Files without a marker are left byte-for-byte identical
//! - Two passes restore the original state
//! - Per-file failures are skipped without stopping the pass

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tagflip::{RuleTable, apply_toggle, scan_directory};
use tempfile::TempDir;

const LOCKED: &str = "<music><firstLock>true</firstLock></music>";
const UNLOCKED: &str = "<music><firstLock>false</firstLock></music>";

fn create_test_root() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

fn write(root: &Utf8Path, relative: &str, content: &str) -> Utf8PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_scenario_a_music_files_flip_independently() {
    let (_temp_dir, root) = create_test_root();
    let a = write(&root, "a/Music.xml", LOCKED);
    let b = write(&root, "b/Music.xml", LOCKED);
    let c = write(&root, "c/Music.xml", UNLOCKED);

    let counts = scan_directory(&root, &RuleTable::default()).unwrap();
    assert_eq!(counts.count("Music.xml"), 3);
    assert_eq!(counts.count("Event.xml"), 0);
    assert_eq!(counts.count("Chara.xml"), 0);
    assert_eq!(counts.count("NamePlate.xml"), 0);
    assert_eq!(counts.count("AvatarAccessory.xml"), 0);

    let outcome = apply_toggle(&root, "Music.xml", &RuleTable::default());
    assert_eq!(outcome.history.len(), 3);
    assert_eq!(outcome.modified, 3);
    assert_eq!(outcome.file_errors, 0);
    assert!(!outcome.is_aborted());

    assert_eq!(fs::read_to_string(&a).unwrap(), UNLOCKED);
    assert_eq!(fs::read_to_string(&b).unwrap(), UNLOCKED);
    assert_eq!(fs::read_to_string(&c).unwrap(), LOCKED);

    let records: Vec<_> = outcome.history.iter().collect();
    assert_eq!(records[0].path, a);
    assert_eq!(records[0].from_marker, "<firstLock>true</firstLock>");
    assert_eq!(records[2].path, c);
    assert_eq!(records[2].from_marker, "<firstLock>false</firstLock>");
    assert_eq!(records[2].to_marker, "<firstLock>true</firstLock>");
    assert_eq!(outcome.history.highlight(), Some(2));
}

#[test]
fn test_scenario_b_history_keeps_last_five() {
    let (_temp_dir, root) = create_test_root();
    let paths: Vec<_> = (0..7)
        .map(|i| {
            write(
                &root,
                &format!("event{}/Event.xml", i),
                "<alwaysOpen>true</alwaysOpen>",
            )
        })
        .collect();

    let outcome = apply_toggle(&root, "Event.xml", &RuleTable::default());
    assert_eq!(outcome.modified, 7);
    assert_eq!(outcome.history.len(), 5);

    let kept: Vec<_> = outcome.history.iter().map(|r| r.path.clone()).collect();
    assert_eq!(kept, paths[2..].to_vec());

    for path in &paths {
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "<alwaysOpen>false</alwaysOpen>"
        );
    }
}

#[test]
fn test_scenario_c_file_without_marker_is_untouched() {
    let (_temp_dir, root) = create_test_root();
    let malformed = "<chara><defaultHave>yes</defaultHave>";
    let path = write(&root, "Chara.xml", malformed);

    let outcome = apply_toggle(&root, "Chara.xml", &RuleTable::default());
    assert!(outcome.history.is_empty());
    assert_eq!(outcome.history.highlight(), None);
    assert_eq!(outcome.modified, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), malformed);
}

#[test]
fn test_two_passes_restore_original() {
    let (_temp_dir, root) = create_test_root();
    let original = "<n>\n  <defaultHave>false</defaultHave>\n</n>\n";
    let path = write(&root, "x/y/NamePlate.xml", original);

    apply_toggle(&root, "NamePlate.xml", &RuleTable::default());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "<n>\n  <defaultHave>true</defaultHave>\n</n>\n"
    );

    apply_toggle(&root, "NamePlate.xml", &RuleTable::default());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_only_selected_filename_is_touched() {
    let (_temp_dir, root) = create_test_root();
    let chara = write(&root, "Chara.xml", "<defaultHave>true</defaultHave>");
    let plate = write(&root, "NamePlate.xml", "<defaultHave>true</defaultHave>");
    let lower = write(&root, "sub/avataraccessory.xml", "<defaultHave>true</defaultHave>");

    let outcome = apply_toggle(&root, "AvatarAccessory.xml", &RuleTable::default());
    assert!(outcome.history.is_empty());

    let outcome = apply_toggle(&root, "Chara.xml", &RuleTable::default());
    assert_eq!(outcome.history.len(), 1);

    assert_eq!(
        fs::read_to_string(&chara).unwrap(),
        "<defaultHave>false</defaultHave>"
    );
    assert_eq!(
        fs::read_to_string(&plate).unwrap(),
        "<defaultHave>true</defaultHave>"
    );
    assert_eq!(
        fs::read_to_string(&lower).unwrap(),
        "<defaultHave>true</defaultHave>"
    );
}

#[test]
fn test_incidental_repeats_are_not_replaced() {
    let (_temp_dir, root) = create_test_root();
    let content = "<alwaysOpen>true</alwaysOpen><!-- <alwaysOpen>true</alwaysOpen> -->";
    let path = write(&root, "Event.xml", content);

    apply_toggle(&root, "Event.xml", &RuleTable::default());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "<alwaysOpen>false</alwaysOpen><!-- <alwaysOpen>true</alwaysOpen> -->"
    );
}

#[test]
fn test_missing_root_aborts_with_empty_history() {
    let (_temp_dir, root) = create_test_root();
    let missing = root.join("missing");

    let outcome = apply_toggle(&missing, "Music.xml", &RuleTable::default());
    assert!(outcome.is_aborted());
    assert!(outcome.history.is_empty());
    assert!(
        outcome
            .walk_error
            .unwrap()
            .to_string()
            .contains("Directory walk aborted")
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    let (_temp_dir, root) = create_test_root();
    fs::create_dir_all(root.join("a")).unwrap();
    let dangling = root.join("a/Music.xml");
    std::os::unix::fs::symlink(root.join("nowhere.xml"), &dangling).unwrap();
    let other = write(&root, "b/Music.xml", LOCKED);

    let outcome = apply_toggle(&root, "Music.xml", &RuleTable::default());

    assert_eq!(outcome.file_errors, 1);
    assert!(!outcome.is_aborted());
    assert_eq!(outcome.modified, 1);
    assert_eq!(outcome.history.len(), 1);
    assert_eq!(outcome.history.iter().next().unwrap().path, other);
    assert_eq!(fs::read_to_string(&other).unwrap(), UNLOCKED);
    assert!(!root.join("nowhere.xml").exists());
}

#[cfg(unix)]
#[test]
fn test_walk_error_keeps_partial_history() {
    let (_temp_dir, root) = create_test_root();
    let first = write(&root, "a/Music.xml", LOCKED);
    create_overlong_tree(&root, "deep");
    let last = write(&root, "z/Music.xml", LOCKED);

    let outcome = apply_toggle(&root, "Music.xml", &RuleTable::default());

    assert!(outcome.is_aborted());
    assert_eq!(outcome.modified, 1);
    assert_eq!(outcome.history.len(), 1);
    assert_eq!(outcome.history.iter().next().unwrap().path, first);
    assert_eq!(fs::read_to_string(&first).unwrap(), UNLOCKED);
    assert_eq!(fs::read_to_string(&last).unwrap(), LOCKED);
}

/// Build `root/<name>/...` deep enough that opening its innermost directory
/// fails with ENAMETOOLONG, whatever the user's permissions.
///
/// Each half stays under PATH_MAX on its own; the rename joins them.
#[cfg(unix)]
fn create_overlong_tree(root: &Utf8Path, name: &str) {
    let segment = "d".repeat(200);
    let chain = |base: Utf8PathBuf| {
        let mut path = base;
        for _ in 0..12 {
            path.push(&segment);
        }
        path
    };

    let outer = chain(root.join(name));
    fs::create_dir_all(&outer).unwrap();
    fs::create_dir_all(chain(root.join("tail"))).unwrap();
    fs::rename(root.join("tail"), outer.join("tail")).unwrap();
}
