//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_u8, run_test_with_checker, TestPlan, TestPlanU8};
use pomo_i18n::gettext_lib::{Catalog, Endian, Entry, MoWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_catalog(dir: &Path, name: &str, catalog: &Catalog, endian: Endian) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, MoWriter::with_endian(endian).write_to_bytes(catalog)).unwrap();
    path
}

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.set_header("Language", "bg");
    catalog.set_header("Plural-Forms", "nplurals=2; plural=n != 1;");
    catalog.add_entry(Entry::new("red").with_context("color").with_translations(["червен"]));
    catalog.add_entry(
        Entry::new("day")
            .with_plural("days")
            .with_translations(["ден", "дни"]),
    );
    catalog
}

const SAMPLE_PO: &str = concat!(
    "msgid \"\"\n",
    "msgstr \"\"\n",
    "\"Language: bg\\n\"\n",
    "\"Plural-Forms: nplurals=2; plural=n != 1;\\n\"\n",
    "\n",
    "msgctxt \"color\"\n",
    "msgid \"red\"\n",
    "msgstr \"червен\"\n",
    "\n",
    "msgid \"day\"\n",
    "msgid_plural \"days\"\n",
    "msgstr[0] \"ден\"\n",
    "msgstr[1] \"дни\"\n",
    "\n",
);

fn msgunfmt_plan(args: Vec<String>, expected_out: &str) -> TestPlan {
    TestPlan {
        cmd: String::from("msgunfmt"),
        args,
        stdin_data: String::new(),
        expected_out: String::from(expected_out),
        expected_err: String::new(),
        expected_exit_code: 0,
    }
}

#[test]
fn test_msgunfmt_simple() {
    let temp_dir = TempDir::new().unwrap();
    let mo_path = write_catalog(temp_dir.path(), "bg.mo", &sample_catalog(), Endian::Little);

    run_test(msgunfmt_plan(
        vec![mo_path.to_str().unwrap().to_string()],
        SAMPLE_PO,
    ));
}

#[test]
fn test_msgunfmt_big_endian() {
    let temp_dir = TempDir::new().unwrap();
    let mo_path = write_catalog(temp_dir.path(), "bg.mo", &sample_catalog(), Endian::Big);

    run_test(msgunfmt_plan(
        vec![mo_path.to_str().unwrap().to_string()],
        SAMPLE_PO,
    ));
}

#[test]
fn test_msgunfmt_stdin() {
    run_test_u8(TestPlanU8 {
        cmd: String::from("msgunfmt"),
        args: vec![String::from("-")],
        stdin_data: sample_catalog().encode(),
        expected_out: SAMPLE_PO.as_bytes().to_vec(),
        expected_err: Vec::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_msgunfmt_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let mo_path = write_catalog(temp_dir.path(), "bg.mo", &sample_catalog(), Endian::Little);
    let po_path = temp_dir.path().join("bg.po");

    run_test(msgunfmt_plan(
        vec![
            String::from("-o"),
            po_path.to_str().unwrap().to_string(),
            mo_path.to_str().unwrap().to_string(),
        ],
        "",
    ));

    assert_eq!(fs::read_to_string(&po_path).unwrap(), SAMPLE_PO);
}

#[test]
fn test_msgunfmt_later_file_wins() {
    let temp_dir = TempDir::new().unwrap();

    let mut first = Catalog::new();
    first.add_entry(Entry::new("blue").with_translations(["син"]));
    first.add_entry(Entry::new("grey").with_translations(["сив"]));
    let mut second = Catalog::new();
    second.add_entry(Entry::new("blue").with_translations(["СИН"]));

    let first = write_catalog(temp_dir.path(), "first.mo", &first, Endian::Little);
    let second = write_catalog(temp_dir.path(), "second.mo", &second, Endian::Big);

    run_test(msgunfmt_plan(
        vec![
            first.to_str().unwrap().to_string(),
            second.to_str().unwrap().to_string(),
        ],
        concat!(
            "msgid \"blue\"\n",
            "msgstr \"СИН\"\n",
            "\n",
            "msgid \"grey\"\n",
            "msgstr \"сив\"\n",
            "\n",
        ),
    ));
}

#[test]
fn test_msgunfmt_bad_magic() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.mo");
    fs::write(&bogus, b"hello world\n").unwrap();

    let mut plan = msgunfmt_plan(vec![bogus.to_str().unwrap().to_string()], "");
    plan.expected_err = format!(
        "msgunfmt: {}: not a .mo file (magic number 0x6c6c6568)\n",
        bogus.to_str().unwrap()
    );
    plan.expected_exit_code = 1;
    run_test(plan);
}

#[test]
fn test_msgunfmt_truncated() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = sample_catalog().encode();
    data.truncate(40);
    let truncated = temp_dir.path().join("truncated.mo");
    fs::write(&truncated, &data).unwrap();

    let mut plan = msgunfmt_plan(vec![truncated.to_str().unwrap().to_string()], "");
    plan.expected_exit_code = 1;

    run_test_with_checker(plan, |plan, output| {
        assert_eq!(output.status.code(), Some(plan.expected_exit_code));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("msgunfmt: "));
        assert!(stderr.contains("outside the file"));
    });
}
