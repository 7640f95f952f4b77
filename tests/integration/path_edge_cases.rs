use folderaudit::audit::Auditor;
use folderaudit::output::AuditCsv;
use folderaudit::scanner::WalkerConfig;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

fn write(dir: &std::path::Path, name: &str, bytes: usize) {
    File::create(dir.join(name))
        .unwrap()
        .write_all(&vec![b'x'; bytes])
        .unwrap();
}

#[test]
fn test_extension_rules() {
    let dir = tempdir().unwrap();
    write(dir.path(), "Makefile", 10);
    write(dir.path(), ".bashrc", 10);
    write(dir.path(), "archive.tar.GZ", 10);
    write(dir.path(), "trailing.", 10);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    let mut pairs: Vec<(String, String)> = report
        .records
        .iter()
        .map(|r| (r.name.clone(), r.extension.clone()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            (".bashrc".to_string(), String::new()),
            ("Makefile".to_string(), String::new()),
            ("archive.tar.GZ".to_string(), ".gz".to_string()),
            ("trailing.".to_string(), String::new()),
        ]
    );

    // Three files share size and the empty extension
    assert_eq!(report.size_groups.len(), 1);
    assert_eq!(report.size_groups[0].len(), 3);
    assert_eq!(report.size_groups[0].key.to_string(), "0.01 KB (no extension)");
}

#[test]
fn test_unicode_names_group_by_name() {
    let dir = tempdir().unwrap();
    write(dir.path(), "résumé.pdf", 100);
    write(dir.path(), "RÉSUMÉ.docx", 300);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.name_groups.len(), 1);
    assert_eq!(report.name_groups[0].key, "résumé");
}

#[test]
fn test_paths_with_quotes_and_commas_round_trip_through_csv() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        write(dir.path(), "file_with_\"quote\".txt", 10);
    }
    write(dir.path(), "a,b.txt", 10);

    let report = Auditor::new(dir.path(), WalkerConfig::default())
        .run()
        .unwrap();
    let csv_text = AuditCsv::new(&report.records, "%Y").to_string().unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let names: Vec<String> = reader
        .records()
        .map(|row| row.unwrap()[0].to_string())
        .collect();

    assert_eq!(names.len(), report.records.len());
    assert!(names.contains(&"a,b.txt".to_string()));
    if cfg!(not(windows)) {
        assert!(names.contains(&"file_with_\"quote\".txt".to_string()));
    }
}
