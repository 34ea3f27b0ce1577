use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DockDefaults {
    position: String,
    icon_size: f64,
    magnified_icon_size: f64,
    spacing: f64,
    distance_to_screen_edge: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DockIconEntry {
    id: String,
    label: String,
    asset: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LaunchpadSection {
    icons: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DockManifest {
    schema_version: u32,
    dock: DockDefaults,
    dock_icons: Vec<DockIconEntry>,
    launchpad: LaunchpadSection,
}

#[derive(Debug, Serialize)]
struct GeneratedCatalog<'a> {
    dock: &'a DockDefaults,
    dock_icons: &'a [DockIconEntry],
    launchpad_icons: &'a [String],
}

fn validate(manifest: &DockManifest, path: &str) {
    if manifest.schema_version != 1 {
        panic!(
            "dock manifest schema mismatch in {path}: expected 1 found {}",
            manifest.schema_version
        );
    }
    if !["top", "bottom", "left", "right"].contains(&manifest.dock.position.as_str()) {
        panic!(
            "unknown dock position `{}` in {path}",
            manifest.dock.position
        );
    }
    if manifest.dock.magnified_icon_size < manifest.dock.icon_size {
        panic!("magnified_icon_size must be >= icon_size in {path}");
    }
    if manifest.dock_icons.is_empty() {
        panic!("{path} declares no dock icons");
    }

    let mut seen = BTreeSet::new();
    for icon in &manifest.dock_icons {
        if !seen.insert(icon.id.as_str()) {
            panic!("duplicate dock icon `{}` in {path}", icon.id);
        }
    }
    for id in &manifest.launchpad.icons {
        if !seen.contains(id.as_str()) {
            panic!("launchpad icon `{id}` in {path} is not a dock icon");
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("dock.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DockManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&manifest, &path.display().to_string());

    let catalog = GeneratedCatalog {
        dock: &manifest.dock,
        dock_icons: &manifest.dock_icons,
        launchpad_icons: &manifest.launchpad.icons,
    };
    let json = serde_json::to_string_pretty(&catalog).expect("serialize dock catalog");
    let generated = format!(
        "/// Build-time generated dock and launchpad catalog JSON.\n\
pub const DOCK_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("dock_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
