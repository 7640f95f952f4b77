use folderaudit::audit::Auditor;
use folderaudit::duplicates::SizeKey;
use folderaudit::scanner::{SizeKb, Walker, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_kb(path: &Path, kb: usize) {
    File::create(path)
        .unwrap()
        .write_all(&vec![b'x'; kb * 1024])
        .unwrap();
}

fn min_size(kb: f64) -> WalkerConfig {
    WalkerConfig::default().with_min_size(SizeKb::from_kb(kb).unwrap())
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.statistics.total_count, 0);
    assert_eq!(report.statistics.mean_size_kb, None);
    assert_eq!(report.statistics.median_size_kb, None);
    assert!(report.size_groups.is_empty());
    assert!(report.name_groups.is_empty());
}

#[test]
fn test_scan_all_files_below_minimum() {
    let dir = tempdir().unwrap();
    write_kb(&dir.path().join("a.txt"), 1);
    write_kb(&dir.path().join("b.txt"), 1);

    let report = Auditor::new(dir.path(), min_size(10.0)).run().unwrap();

    assert_eq!(report.statistics.total_count, 0);
    assert_eq!(report.statistics.mean_size_kb, None);
    assert!(report.size_groups.is_empty());
    assert!(report.name_groups.is_empty());
    // Filtered files are not errors
    assert!(!report.has_errors());
}

#[test]
fn test_size_mode_requires_same_extension() {
    let dir = tempdir().unwrap();
    write_kb(&dir.path().join("a.txt"), 15);
    write_kb(&dir.path().join("b.txt"), 15);
    write_kb(&dir.path().join("c.log"), 15);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.size_groups.len(), 1);
    let group = &report.size_groups[0];
    assert_eq!(
        group.key,
        SizeKey {
            size_kb: SizeKb::from_centis(1500),
            extension: ".txt".to_string(),
        }
    );
    let names: Vec<&str> = group.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_name_mode_ignores_size_and_extension() {
    let dir = tempdir().unwrap();
    write_kb(&dir.path().join("report.pdf"), 50);
    write_kb(&dir.path().join("report.docx"), 80);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.name_groups.len(), 1);
    assert_eq!(report.name_groups[0].key, "report");
    assert_eq!(report.name_groups[0].len(), 2);
    assert!(report.size_groups.is_empty());
}

#[test]
fn test_scan_statistics() {
    let dir = tempdir().unwrap();
    write_kb(&dir.path().join("a.txt"), 10);
    write_kb(&dir.path().join("b.txt"), 20);
    write_kb(&dir.path().join("c.md"), 30);
    write_kb(&dir.path().join("d.md"), 40);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();
    let stats = &report.statistics;

    assert_eq!(stats.total_count, 4);
    assert_eq!(stats.total_size_kb, SizeKb::from_centis(10_000));
    assert_eq!(stats.mean_size_kb, Some(25.0));
    assert_eq!(stats.median_size_kb, Some(25.0));

    let breakdown: Vec<(&str, usize)> = stats
        .extensions
        .iter()
        .map(|e| (e.extension.as_str(), e.count))
        .collect();
    assert_eq!(breakdown, vec![(".md", 2), (".txt", 2)]);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    let deep = sub.join("deeper");
    fs::create_dir_all(&deep).unwrap();

    write_kb(&dir.path().join("top.txt"), 1);
    write_kb(&sub.join("mid.txt"), 1);
    write_kb(&deep.join("bottom.txt"), 1);

    let result = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();

    assert_eq!(result.records.len(), 3);
    // Directories are never records
    assert!(result.records.iter().all(|r| r.path.is_file()));
}

#[test]
fn test_shallow_scan_stays_at_top_level() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    fs::create_dir(&sub).unwrap();

    write_kb(&dir.path().join("top.txt"), 1);
    write_kb(&sub.join("nested.txt"), 1);

    let config = WalkerConfig::default().with_recursive(false);
    let result = Walker::new(dir.path(), config).scan().unwrap();

    assert_eq!(result.records.len(), 1);
    for record in &result.records {
        assert_eq!(record.path.parent(), Some(dir.path()));
    }
}

#[test]
fn test_min_size_boundary_is_inclusive() {
    let dir = tempdir().unwrap();
    write_kb(&dir.path().join("exact.bin"), 10);
    File::create(dir.path().join("just_under.bin"))
        .unwrap()
        .write_all(&vec![0u8; 10 * 1024 - 20])
        .unwrap();

    let result = Walker::new(dir.path(), min_size(10.0)).scan().unwrap();

    let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["exact.bin"]);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write_kb(&dir.path().join("a.txt"), 3);
    write_kb(&dir.path().join("b.txt"), 3);
    write_kb(&sub.join("a.log"), 5);

    let first = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();
    let second = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.statistics, second.statistics);
    assert_eq!(first.size_groups, second.size_groups);
    assert_eq!(first.name_groups, second.name_groups);
}

#[test]
fn test_missing_root_produces_no_records() {
    let dir = tempdir().unwrap();
    let missing: PathBuf = dir.path().join("does-not-exist");

    let result = Auditor::new(&missing, WalkerConfig::default()).run();
    assert!(result.is_err());
}

#[test]
fn test_scan_never_modifies_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keep.txt");
    write_kb(&path, 2);
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    let after = fs::metadata(&path).unwrap();
    assert_eq!(after.len(), 2048);
    assert_eq!(after.modified().unwrap(), before);
}
