//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, TestPlan};
use pomo_i18n::gettext_lib::{Catalog, Entry};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SLAVIC_PLURAL_FORMS: &str = "nplurals=3; plural=n%10==1 && n%100!=11 ? 0 : \
     n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2;";

/// Write a catalog with three plural forms for "file" and a context entry
fn create_slavic_catalog() -> (TempDir, PathBuf) {
    let mut catalog = Catalog::new();
    catalog.set_header("Content-Type", "text/plain; charset=UTF-8");
    catalog.set_header("Plural-Forms", SLAVIC_PLURAL_FORMS);
    catalog.add_entry(
        Entry::new("file")
            .with_plural("files")
            .with_translations(["fajl", "fajla", "fajlova"]),
    );
    catalog.add_entry(
        Entry::new("file")
            .with_plural("files")
            .with_context("menu")
            .with_translations(["datoteka", "datoteke", "datoteka!"]),
    );

    let temp_dir = TempDir::new().unwrap();
    let mo_path = temp_dir.path().join("sr.mo");
    fs::write(&mo_path, catalog.encode()).unwrap();
    (temp_dir, mo_path)
}

fn mongettext_test(args: &[&str], expected_out: &str) {
    run_test(TestPlan {
        cmd: String::from("mongettext"),
        args: args.iter().map(|s| s.to_string()).collect(),
        stdin_data: String::new(),
        expected_out: String::from(expected_out),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_mongettext_plural_forms() {
    let (_temp_dir, mo_path) = create_slavic_catalog();
    let catalog = mo_path.to_str().unwrap();

    mongettext_test(&["-c", catalog, "file", "files", "1"], "fajl\n");
    mongettext_test(&["-c", catalog, "file", "files", "21"], "fajl\n");
    mongettext_test(&["-c", catalog, "file", "files", "3"], "fajla\n");
    mongettext_test(&["-c", catalog, "file", "files", "11"], "fajlova\n");
    mongettext_test(&["-c", catalog, "file", "files", "100"], "fajlova\n");
}

#[test]
fn test_mongettext_negative_count() {
    let (_temp_dir, mo_path) = create_slavic_catalog();

    // -8 % 10 is -8, so neither of the first two branches match
    mongettext_test(
        &["-c", mo_path.to_str().unwrap(), "file", "files", "-8"],
        "fajlova\n",
    );
}

#[test]
fn test_mongettext_context() {
    let (_temp_dir, mo_path) = create_slavic_catalog();
    let catalog = mo_path.to_str().unwrap();

    mongettext_test(
        &["-c", catalog, "--context", "menu", "file", "files", "2"],
        "datoteke\n",
    );
    mongettext_test(
        &["-c", catalog, "-x", "other", "file", "files", "2"],
        "files\n",
    );
}

#[test]
fn test_mongettext_untranslated() {
    let (_temp_dir, mo_path) = create_slavic_catalog();
    let catalog = mo_path.to_str().unwrap();

    mongettext_test(&["-c", catalog, "dir", "dirs", "1"], "dir\n");
    mongettext_test(&["-c", catalog, "dir", "dirs", "5"], "dirs\n");
}

#[test]
fn test_mongettext_missing_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.mo");
    let catalog = missing.to_str().unwrap();

    mongettext_test(&["-c", catalog, "apple", "apples", "1"], "apple\n");
    mongettext_test(&["-c", catalog, "apple", "apples", "0"], "apples\n");
}

#[test]
fn test_mongettext_no_catalog() {
    mongettext_test(&["apple", "apples", "2"], "apples\n");
}

#[test]
fn test_mongettext_invalid_count() {
    run_test(TestPlan {
        cmd: String::from("mongettext"),
        args: vec![
            String::from("apple"),
            String::from("apples"),
            String::from("many"),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::from("mongettext: invalid count: many\n"),
        expected_exit_code: 1,
    });
}
