//! End-to-end tests for the registrygen binary
//!
//! Each test builds a small project on disk and runs the CLI against it.
//! Foreign registry references use the `@shadcn` shorthand, so no network
//! access is needed.

mod common;

use assert_cmd::Command;
use common::{create_login_registry, create_project_files, create_temp_dir, read_registry, write_file};
use predicates::prelude::*;
use serde_json::json;

fn registrygen() -> Command {
    let mut cmd = Command::cargo_bin("registrygen").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    registrygen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DIRECTORY"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--homepage"));
}

#[test]
fn test_requires_directory() {
    registrygen()
        .assert()
        .failure()
        .stderr(predicate::str::contains("DIRECTORY"));
}

#[test]
fn test_generates_login_block() {
    let temp = create_temp_dir();
    let directory = create_login_registry(temp.path());

    registrygen()
        .arg(&directory)
        .assert()
        .success()
        .stderr(predicate::str::contains("Pass 1: Scanning directory..."))
        .stderr(predicate::str::contains("Pass 3: Building registry.json for acme-registry"));

    let registry = read_registry(&directory.join("registry.json"));
    assert_eq!(registry["$schema"], "https://ui.shadcn.com/schema/registry.json");
    assert_eq!(registry["name"], "acme-registry");
    assert_eq!(registry["homepage"], "https://acme.dev");

    let items = registry["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];

    assert_eq!(item["name"], "login-form");
    assert_eq!(item["type"], "registry:block");
    assert_eq!(item["title"], "Login form");
    assert_eq!(
        item["description"],
        "Email and password login\nwith remember-me support"
    );
    assert_eq!(item["categories"], json!(["auth", "forms"]));
    assert_eq!(item["dependencies"], json!(["react", "clsx"]));
    assert_eq!(item["registryDependencies"], json!(["button", "label"]));
    assert_eq!(
        item["files"],
        json!([
            {
                "path": "./src/registry/login/login-form.tsx",
                "type": "registry:block",
                "target": "~/src/registry/login/login-form.tsx"
            },
            {
                "path": "./src/registry/lib/utils.ts",
                "type": "registry:file",
                "target": "~/src/registry/lib/utils.ts"
            },
            {
                "path": "./src/registry/login/field.tsx",
                "type": "registry:file",
                "target": "~/src/registry/login/field.tsx"
            },
            {
                "path": "./src/registry/login/login.css",
                "type": "registry:file",
                "target": "~/src/registry/login/login.css"
            }
        ])
    );
}

#[test]
fn test_overrides_name_homepage_and_output() {
    let temp = create_temp_dir();
    let directory = create_login_registry(temp.path());
    let output = temp.path().join("public").join("r.json");
    std::fs::create_dir_all(output.parent().unwrap()).unwrap();

    registrygen()
        .arg(&directory)
        .args(["--name", "custom", "--homepage", "https://example.org"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(!directory.join("registry.json").exists());
    let registry = read_registry(&output);
    assert_eq!(registry["name"], "custom");
    assert_eq!(registry["homepage"], "https://example.org");
}

#[test]
fn test_validation_failure_writes_nothing() {
    let temp = create_temp_dir();
    create_project_files(temp.path());
    write_file(
        temp.path(),
        "src/registry/nameless.tsx",
        "//@root\n//@type: registry:ui\nexport const X = 1;\n",
    );
    let directory = temp.path().join("src").join("registry");

    registrygen()
        .arg(&directory)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "- /items/0 must have required property 'name'",
        ))
        .stderr(predicate::str::contains("registry.json was not written"));

    assert!(!directory.join("registry.json").exists());
}

#[test]
fn test_missing_directory_fails() {
    let temp = create_temp_dir();

    registrygen()
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_missing_package_manifest_fails() {
    let temp = create_temp_dir();
    write_file(
        temp.path(),
        "src/registry/card.tsx",
        "//@root\n//@name: card\n",
    );

    registrygen()
        .arg(temp.path().join("src").join("registry"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package.json found"));
}

#[test]
fn test_malformed_generator_config_fails() {
    let temp = create_temp_dir();
    create_project_files(temp.path());
    write_file(temp.path(), "registrygen-config.json", "{ \"registryPrefix\": ");
    write_file(temp.path(), "src/registry/card.tsx", "//@root\n//@name: card\n");

    registrygen()
        .arg(temp.path().join("src").join("registry"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}
