//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_u8, run_test_with_checker, TestPlan, TestPlanU8};
use pomo_i18n::gettext_lib::{Catalog, Entry};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_catalog(dir: &Path, name: &str, catalog: &Catalog) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, catalog.encode()).unwrap();
    path
}

fn mocat_plan(args: Vec<String>) -> TestPlan {
    TestPlan {
        cmd: String::from("mocat"),
        args,
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    }
}

/// Two catalogs sharing one message and one header field
fn create_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let mut first = Catalog::new();
    first.set_header("Language", "bg");
    first.set_header("Project-Id-Version", "first 1.0");
    first.add_entry(Entry::new("red").with_translations(["червен"]));
    first.add_entry(Entry::new("green").with_translations(["зелен"]));

    let mut second = Catalog::new();
    second.set_header("Project-Id-Version", "second 2.0");
    second.set_header("Plural-Forms", "nplurals=2; plural=n != 1;");
    second.add_entry(Entry::new("green").with_translations(["ЗЕЛЕН"]));
    second.add_entry(
        Entry::new("day")
            .with_plural("days")
            .with_translations(["ден", "дни"]),
    );

    (
        write_catalog(dir, "first.mo", &first),
        write_catalog(dir, "second.mo", &second),
    )
}

#[test]
fn test_mocat_merge() {
    let temp_dir = TempDir::new().unwrap();
    let (first, second) = create_inputs(temp_dir.path());
    let output = temp_dir.path().join("merged.mo");

    run_test(mocat_plan(vec![
        String::from("-o"),
        output.to_str().unwrap().to_string(),
        first.to_str().unwrap().to_string(),
        second.to_str().unwrap().to_string(),
    ]));

    let data = fs::read(&output).unwrap();
    assert_eq!(&data[..4], &[0xde, 0x12, 0x04, 0x95]);

    let merged = Catalog::decode(&data).unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.translate(b"red", None), "червен".as_bytes());
    assert_eq!(merged.translate(b"green", None), "ЗЕЛЕН".as_bytes());
    assert_eq!(merged.translate_plural(b"day", b"days", 5, None), "дни".as_bytes());

    // header fields from the first file win
    assert_eq!(merged.header("Project-Id-Version"), Some("first 1.0"));
    assert_eq!(merged.header("Language"), Some("bg"));
    assert_eq!(merged.nplurals(), 2);
}

#[test]
fn test_mocat_big_endian() {
    let temp_dir = TempDir::new().unwrap();
    let (first, _) = create_inputs(temp_dir.path());
    let output = temp_dir.path().join("be.mo");

    run_test(mocat_plan(vec![
        String::from("--big-endian"),
        String::from("-o"),
        output.to_str().unwrap().to_string(),
        first.to_str().unwrap().to_string(),
    ]));

    let data = fs::read(&output).unwrap();
    assert_eq!(&data[..4], &[0x95, 0x04, 0x12, 0xde]);

    let catalog = Catalog::decode(&data).unwrap();
    assert_eq!(catalog.translate(b"green", None), "зелен".as_bytes());
    assert_eq!(catalog.header("Language"), Some("bg"));
}

#[test]
fn test_mocat_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let (first, _) = create_inputs(temp_dir.path());
    let expected = Catalog::decode(&fs::read(&first).unwrap())
        .unwrap()
        .encode();

    run_test_u8(TestPlanU8 {
        cmd: String::from("mocat"),
        args: vec![
            String::from("-o"),
            String::from("-"),
            first.to_str().unwrap().to_string(),
        ],
        stdin_data: Vec::new(),
        expected_out: expected,
        expected_err: Vec::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_mocat_verbose() {
    let temp_dir = TempDir::new().unwrap();
    let (first, second) = create_inputs(temp_dir.path());
    let output = temp_dir.path().join("merged.mo");
    let output = output.to_str().unwrap().to_string();

    let mut plan = mocat_plan(vec![
        String::from("-v"),
        String::from("-o"),
        output.clone(),
        first.to_str().unwrap().to_string(),
        second.to_str().unwrap().to_string(),
    ]);
    plan.expected_err = format!("mocat: 3 messages written to {}\n", output);
    run_test(plan);
}

#[test]
fn test_mocat_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.mo");
    let output = temp_dir.path().join("out.mo");

    let mut plan = mocat_plan(vec![
        String::from("-o"),
        output.to_str().unwrap().to_string(),
        missing.to_str().unwrap().to_string(),
    ]);
    plan.expected_exit_code = 1;

    run_test_with_checker(plan, |plan, output| {
        assert_eq!(output.status.code(), Some(plan.expected_exit_code));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("mocat: "));
        assert!(stderr.contains("missing.mo"));
    });

    assert!(!output.exists());
}

#[test]
fn test_mocat_rejects_bad_input() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.mo");
    fs::write(&bogus, b"hello world\n").unwrap();
    let output = temp_dir.path().join("out.mo");

    let mut plan = mocat_plan(vec![
        String::from("-o"),
        output.to_str().unwrap().to_string(),
        bogus.to_str().unwrap().to_string(),
    ]);
    plan.expected_err = format!(
        "mocat: {}: not a .mo file (magic number 0x6c6c6568)\n",
        bogus.to_str().unwrap()
    );
    plan.expected_exit_code = 1;
    run_test(plan);
}
