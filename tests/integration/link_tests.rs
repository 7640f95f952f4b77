use folderaudit::audit::Auditor;
use folderaudit::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_hardlinks_are_listed_as_separate_files() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let hardlink = dir.path().join("hardlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();

    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    // Metadata-only grouping: both names share size and extension
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.size_groups.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_file_symlink_is_read_through_by_default() {
    let dir = tempdir().unwrap();
    let outside = tempdir().unwrap();
    let target = outside.path().join("target.txt");
    File::create(&target)
        .unwrap()
        .write_all(&vec![b'x'; 20 * 1024])
        .unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name, "link.txt");
    assert_eq!(report.records[0].size_kb.to_string(), "20.00");
    assert!(!report.has_errors());
}

#[cfg(unix)]
#[test]
fn test_directory_symlink_not_entered_by_default() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    File::create(real.join("photo.jpg"))
        .unwrap()
        .write_all(b"jpeg")
        .unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].path, real.join("photo.jpg"));
    assert!(!report.has_errors());
}

#[cfg(unix)]
#[test]
fn test_broken_file_symlink_is_reported_by_default() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("real.txt")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt"))
        .unwrap();

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].path().ends_with("dangling.txt"));
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_cycle_terminates() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    fs::create_dir(&a).unwrap();
    File::create(a.join("file.txt"))
        .unwrap()
        .write_all(b"data")
        .unwrap();
    // a/back -> root, so following links would recurse forever without a guard
    std::os::unix::fs::symlink(dir.path(), a.join("back")).unwrap();

    let config = WalkerConfig::default().with_follow_symlinks(true);
    let report = Auditor::new(dir.path(), config).run().unwrap();

    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["file.txt"]);
    assert!(report.name_groups.is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_contents_listed_once() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    File::create(real.join("photo.jpg"))
        .unwrap()
        .write_all(b"jpeg")
        .unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

    let config = WalkerConfig::default().with_follow_symlinks(true);
    let report = Auditor::new(dir.path(), config).run().unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(report.name_groups.is_empty());
}
