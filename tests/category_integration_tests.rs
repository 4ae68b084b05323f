//! Integration tests for the `category` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn freeboard_rules_pass() {
    let fixture = TestFixture::new();
    fixture.create_passing_state();

    naval_compliance!()
        .current_dir(fixture.path())
        .args(["category", "freeboard", "state.toml", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 findings: 2 passed, 0 failed, 0 other"));
}

#[test]
fn stability_failure_exits_one() {
    let fixture = TestFixture::new();
    fixture.create_low_gm_state();

    naval_compliance!()
        .current_dir(fixture.path())
        .args(["category", "stability", "state.json", "-F", "hsc_2000", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("HSC-2000-A7-1.6"))
        .stdout(predicate::str::contains("6 findings: 5 passed, 1 failed, 0 other"));
}

#[test]
fn category_without_checker_has_no_findings() {
    let fixture = TestFixture::new();
    fixture.create_passing_state();

    naval_compliance!()
        .current_dir(fixture.path())
        .args(["category", "fire_safety", "state.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 findings"))
        .stderr(predicate::str::contains("no checker registered"));
}
