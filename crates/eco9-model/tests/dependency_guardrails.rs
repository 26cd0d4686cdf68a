// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

#[test]
fn model_crate_runtime_dependencies_stay_minimal() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cargo_toml =
        std::fs::read_to_string(manifest_dir.join("Cargo.toml")).expect("read Cargo.toml");
    let manifest: toml::Table = toml::from_str(&cargo_toml).expect("parse Cargo.toml");
    let deps = manifest
        .get("dependencies")
        .and_then(toml::Value::as_table)
        .expect("dependencies table");
    let mut names: Vec<&str> = deps.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["eco9-core", "serde"]);
}
