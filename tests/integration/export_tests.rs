use clap::Parser;
use filetime::FileTime;
use folderaudit::cli::Cli;
use folderaudit::error::ExitCode;
use folderaudit::run_app;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

// 2020-06-15 12:00:00 UTC, far enough from a month boundary for any timezone.
const FIXED_MTIME: i64 = 1_592_222_400;

struct Fixture {
    _root: TempDir,
    scan_dir: PathBuf,
    out_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempdir().unwrap();
        let scan_dir = root.path().join("scan");
        let out_dir = root.path().join("out");
        fs::create_dir(&scan_dir).unwrap();
        fs::create_dir(&out_dir).unwrap();
        Self {
            _root: root,
            scan_dir,
            out_dir,
        }
    }

    fn file(&self, rel: &str, kb: usize) -> PathBuf {
        let path = self.scan_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path)
            .unwrap()
            .write_all(&vec![b'x'; kb * 1024])
            .unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(FIXED_MTIME, 0)).unwrap();
        path
    }

    fn out(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    /// Run `scan` with output paths inside the fixture; flags in `extra`
    /// replace the defaults of the same name.
    fn run(&self, extra: &[&str]) -> anyhow::Result<ExitCode> {
        let defaults = [
            ("--config", self.out("absent.toml")),
            ("--csv", self.out("audit.csv")),
            ("--size-dupes-csv", self.out("size.csv")),
            ("--name-dupes-csv", self.out("name.csv")),
        ];

        let mut args: Vec<String> = vec![
            "folderaudit".into(),
            "-q".into(),
            "scan".into(),
            self.scan_dir.to_string_lossy().into_owned(),
            "--no-progress".into(),
        ];
        for (flag, value) in defaults {
            if !extra.contains(&flag) {
                args.push(flag.into());
                args.push(value.to_string_lossy().into_owned());
            }
        }
        args.extend(extra.iter().map(|s| (*s).to_string()));
        run_app(Cli::try_parse_from(args).unwrap())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_export_writes_three_tables() {
    let fx = Fixture::new();
    fx.file("a.txt", 15);
    fx.file("b.txt", 15);
    fx.file("c.log", 15);
    fx.file("docs/report.pdf", 50);
    fx.file("old/report.docx", 80);

    let code = fx.run(&["--date-format", "%Y-%m"]).unwrap();
    assert_eq!(code, ExitCode::Success);

    let audit = read_lines(&fx.out("audit.csv"));
    assert_eq!(audit[0], "Filename,Path,Extension,Size (KB),Last Modified");
    assert_eq!(audit.len(), 6);
    assert!(audit[1].starts_with("a.txt,"));
    assert!(audit[1].ends_with(",.txt,15.00,2020-06"));

    let size = read_lines(&fx.out("size.csv"));
    assert_eq!(
        size[0],
        "Duplicate Group,Filename,Path,Extension,Size (KB),Last Modified"
    );
    assert_eq!(size.len(), 3);
    assert!(size[1].starts_with("15.00 KB .txt,a.txt,"));
    assert!(size[2].starts_with("15.00 KB .txt,b.txt,"));

    let name = read_lines(&fx.out("name.csv"));
    assert_eq!(name.len(), 3);
    assert!(name[1].starts_with("report,report.pdf,"));
    assert!(name[2].starts_with("report,report.docx,"));
}

#[test]
fn test_export_empty_folder_writes_headers_only() {
    let fx = Fixture::new();

    let code = fx.run(&[]).unwrap();
    assert_eq!(code, ExitCode::Success);

    assert_eq!(read_lines(&fx.out("audit.csv")).len(), 1);
    assert_eq!(read_lines(&fx.out("size.csv")).len(), 1);
    assert_eq!(read_lines(&fx.out("name.csv")).len(), 1);
}

#[test]
fn test_export_respects_min_size_flag() {
    let fx = Fixture::new();
    fx.file("small.txt", 2);
    fx.file("large.txt", 20);

    fx.run(&["--min-size", "5"]).unwrap();

    let audit = read_lines(&fx.out("audit.csv"));
    assert_eq!(audit.len(), 2);
    assert!(audit[1].starts_with("large.txt,"));
}

#[test]
fn test_no_csv_writes_nothing() {
    let fx = Fixture::new();
    fx.file("a.txt", 15);

    fx.run(&["--no-csv"]).unwrap();

    assert!(!fx.out("audit.csv").exists());
    assert!(!fx.out("size.csv").exists());
    assert!(!fx.out("name.csv").exists());
}

#[test]
fn test_unwritable_destination_is_an_error() {
    let fx = Fixture::new();
    fx.file("a.txt", 15);
    let bad = fx.out("missing-dir").join("audit.csv");

    let err = fx
        .run(&["--csv", bad.to_string_lossy().as_ref()])
        .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("audit CSV"));
}

#[test]
fn test_json_output_with_config_file() {
    let fx = Fixture::new();
    fx.file("a.txt", 12);
    fx.file("sub/b.txt", 12);

    let config_path = fx.out("config.toml");
    fs::write(&config_path, "recursive = false\nmin_size_kb = 1.0\n").unwrap();

    let code = fx
        .run(&[
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--output",
            "json",
        ])
        .unwrap();
    assert_eq!(code, ExitCode::Success);

    // Shallow scan from the config file: the nested file is not listed
    let audit = read_lines(&fx.out("audit.csv"));
    assert_eq!(audit.len(), 2);
}
