//! Common test utilities and fixtures
//!
//! This module provides shared test helpers for registrygen CLI tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Writes `content` to `relative` below `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Project files shared by every fixture
pub fn create_project_files(root: &Path) {
    write_file(
        root,
        "package.json",
        r#"{
  "name": "acme-ui",
  "dependencies": { "react": "^19.0.0", "clsx": "^2.1.0" },
  "devDependencies": { "typescript": "^5.6.0" }
}"#,
    );
    write_file(
        root,
        "tsconfig.json",
        r#"{
  "compilerOptions": {
    "paths": { "@/*": ["./src/*"] }
  }
}"#,
    );
    write_file(
        root,
        "registrygen-config.json",
        r#"{
  "registryPrefix": "acme-",
  "homePage": "https://acme.dev",
  "knownRegistries": {
    "@shadcn": { "prefix": "@shadcn" },
    "./src/registry": { "prefix": "@acme" }
  }
}"#,
    );
}

/// A project with one login block under `src/registry`
///
/// Returns the directory to pass to the CLI.
pub fn create_login_registry(root: &Path) -> PathBuf {
    create_project_files(root);

    write_file(
        root,
        "src/registry/login/login-form.tsx",
        r#"//@root
//@type: registry:block
//@name: login-form
//@title: Login form
//@description: Email and password login
//- with remember-me support
//@category: auth, forms
//@resource: ./login.css
import * as React from "react";
import { Button } from "@shadcn/button";
import { cn } from "@/registry/lib/utils";
import { Field } from "./field";

export function LoginForm() {
  return null;
}
"#,
    );
    write_file(
        root,
        "src/registry/login/field.tsx",
        r#"import { Label } from "@shadcn/label";

export function Field() {
  return null;
}
"#,
    );
    write_file(root, "src/registry/login/login.css", ".login { display: grid; }\n");
    write_file(
        root,
        "src/registry/lib/utils.ts",
        r#"import { clsx } from "clsx";

export const cn = (...inputs: string[]) => clsx(inputs);
"#,
    );
    write_file(
        root,
        "src/registry/node_modules/ignored/index.ts",
        "//@root\n//@name: ignored\n",
    );

    root.join("src").join("registry")
}

/// Parse a written registry document
pub fn read_registry(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("Failed to read registry.json");
    serde_json::from_str(&content).expect("registry.json is not valid JSON")
}
