// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

fn runtime_dependencies() -> String {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cargo_toml =
        std::fs::read_to_string(manifest_dir.join("Cargo.toml")).expect("read Cargo.toml");
    cargo_toml
        .split("\n[")
        .find(|section| section.starts_with("dependencies]"))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn store_crate_encodes_json_only_through_core() {
    let deps = runtime_dependencies();
    assert!(deps.contains("eco9-core"), "store must depend on eco9-core");
    for forbidden in ["serde_json", "eco9-cli", "eco9-impact"] {
        assert!(
            !deps.contains(forbidden),
            "forbidden dependency in store crate: {forbidden}"
        );
    }
}
