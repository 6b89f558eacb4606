use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use crate::config::{LicenseConfig, LicenseText, ScanOptions};
use crate::header::{HeaderTemplate, HeaderVariant};
use crate::report::{ComplianceReporter, Mode, ViolationKind};

// Helper function to create a test file, creating parent directories
fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

fn header(prefix: &str, variant: HeaderVariant) -> String {
    HeaderTemplate::new(prefix, variant, &LicenseText::default())
        .rendered()
        .to_string()
}

fn check(root: &Path) -> Result<crate::report::Report> {
    Ok(ComplianceReporter::with_defaults(Mode::Check).run(root)?)
}

fn fix(root: &Path) -> Result<crate::report::Report> {
    Ok(ComplianceReporter::with_defaults(Mode::Fix).run(root)?)
}

fn sample_tree() -> Result<TempDir> {
    let dir = tempdir()?;
    let root = dir.path();
    create_test_file(root, "cmd/main.go", "package main\n")?;
    create_test_file(root, "kubesim/queue/fifo_k8s.go", "package queue\n")?;
    create_test_file(root, "scripts/run.sh", "#!/usr/bin/env bash\nset -e\n")?;
    create_test_file(root, "scripts/plot.py", "import sys\n")?;
    create_test_file(root, "vendor/k8s.io/api/types.go", "package api\n")?;
    create_test_file(root, "README.md", "# readme\n")?;
    Ok(dir)
}

#[test]
fn test_check_reports_every_missing_header() -> Result<()> {
    let dir = sample_tree()?;

    let report = check(dir.path())?;

    assert!(!report.all_ok);
    let violations: Vec<_> = report.violations().map(|r| r.relative.clone()).collect();
    assert_eq!(
        violations,
        vec![
            PathBuf::from("cmd/main.go"),
            PathBuf::from("kubesim/queue/fifo_k8s.go"),
            PathBuf::from("scripts/plot.py"),
            PathBuf::from("scripts/run.sh"),
        ]
    );
    assert!(report.violations().all(|r| r.kind == Some(ViolationKind::MissingHeader)));
    Ok(())
}

#[test]
fn test_fix_then_check_is_clean() -> Result<()> {
    let dir = sample_tree()?;
    let root = dir.path();

    let fixed = fix(root)?;
    assert!(fixed.all_ok);
    assert_eq!(fixed.stats.fixed_files, 4);

    let main_go = fs::read_to_string(root.join("cmd/main.go"))?;
    assert_eq!(main_go, format!("{}\n\n\npackage main\n", header("//", HeaderVariant::Standard)));

    let fifo = fs::read_to_string(root.join("kubesim/queue/fifo_k8s.go"))?;
    assert!(fifo.starts_with("// Modifications copyright 2019 Preferred Networks, Inc.\n"));

    let run_sh = fs::read_to_string(root.join("scripts/run.sh"))?;
    assert_eq!(
        run_sh,
        format!("#!/usr/bin/env bash\n\n{}\n\nset -e\n", header("#", HeaderVariant::Standard))
    );

    let vendored = fs::read_to_string(root.join("vendor/k8s.io/api/types.go"))?;
    assert_eq!(vendored, "package api\n");

    let rechecked = check(root)?;
    assert!(rechecked.all_ok);
    assert_eq!(rechecked.violations().count(), 0);
    assert_eq!(rechecked.stats.compliant_files, 4);
    Ok(())
}

#[test]
fn test_fix_is_idempotent() -> Result<()> {
    let dir = sample_tree()?;
    let root = dir.path();
    fix(root)?;

    let before = fs::read(root.join("scripts/run.sh"))?;
    let second = fix(root)?;
    let after = fs::read(root.join("scripts/run.sh"))?;

    assert_eq!(before, after);
    assert_eq!(second.stats.fixed_files, 0);
    Ok(())
}

#[test]
fn test_standard_header_does_not_satisfy_modification_file() -> Result<()> {
    let dir = tempdir()?;
    let standard = header("//", HeaderVariant::Standard);
    create_test_file(dir.path(), "pkg/node_k8s.go", &format!("{}\n\npackage pkg\n", standard))?;

    let report = check(dir.path())?;
    assert!(!report.all_ok);
    Ok(())
}

#[test]
fn test_only_vendor_files_is_vacuously_ok() -> Result<()> {
    let dir = tempdir()?;
    create_test_file(dir.path(), "vendor/a/a.go", "package a\n")?;
    create_test_file(dir.path(), "vendor/b.py", "print(1)\n")?;

    let report = check(dir.path())?;
    assert!(report.all_ok);
    assert!(report.results.is_empty());
    Ok(())
}

#[test]
fn test_custom_config_adds_language() -> Result<()> {
    let dir = tempdir()?;
    create_test_file(dir.path(), "src/lib.rs", "pub fn f() {}\n")?;
    create_test_file(dir.path(), "third_party/x.rs", "pub fn g() {}\n")?;

    let config = LicenseConfig::from_toml(
        r#"
        excluded_dirs = ["third_party"]

        [comment_styles]
        rs = "//"

        [license]
        copyright = "Copyright ACME"
        modification_copyright = "Modified by ACME"
        body = ["", "All rights reserved."]
        "#,
    )?;

    let mut reporter = ComplianceReporter::new(&config, ScanOptions::fix());
    let report = reporter.run(dir.path())?;

    assert_eq!(report.results.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/lib.rs"))?,
        "// Copyright ACME\n//\n// All rights reserved.\n\n\npub fn f() {}\n"
    );
    Ok(())
}

#[test]
fn test_run_paths_reports_missing_files() -> Result<()> {
    let dir = tempdir()?;
    create_test_file(dir.path(), "a.go", "package a\n")?;

    let mut reporter = ComplianceReporter::with_defaults(Mode::Check);
    let report = reporter.run_paths(
        dir.path(),
        &[PathBuf::from("a.go"), PathBuf::from("gone.py"), PathBuf::from("notes.txt")],
    )?;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].kind, Some(ViolationKind::MissingHeader));
    assert_eq!(report.results[1].kind, Some(ViolationKind::NotFound));
    assert_eq!(report.results[1].relative, PathBuf::from("gone.py"));
    Ok(())
}

#[test]
fn test_run_paths_never_touches_vendor_or_outside_root() -> Result<()> {
    let outer = tempdir()?;
    let root = outer.path().join("repo");
    create_test_file(&root, "vendor/dep/x.go", "package dep\n")?;
    create_test_file(&root, "pkg/a.go", "package pkg\n")?;
    create_test_file(outer.path(), "outside.go", "package outside\n")?;

    let mut reporter = ComplianceReporter::with_defaults(Mode::Fix);
    let report = reporter.run_paths(
        &root,
        &[
            PathBuf::from("pkg/../vendor/dep/x.go"),
            PathBuf::from("../outside.go"),
            PathBuf::from("./pkg/a.go"),
        ],
    )?;

    let relative: Vec<_> = report.results.iter().map(|r| r.relative.clone()).collect();
    assert_eq!(relative, vec![PathBuf::from("pkg/a.go")]);
    assert_eq!(fs::read_to_string(root.join("vendor/dep/x.go"))?, "package dep\n");
    assert_eq!(fs::read_to_string(outer.path().join("outside.go"))?, "package outside\n");
    Ok(())
}
