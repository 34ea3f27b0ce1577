//! Dock and launchpad icon catalog generated from `dock.toml` at build time.

use std::collections::BTreeSet;

use leptos::logging;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dock::DockConfig;
use crate::model::DockIconId;

include!(concat!(env!("OUT_DIR"), "/dock_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockIconEntry {
    pub id: DockIconId,
    pub label: String,
    /// Image path relative to the site root.
    pub asset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockCatalog {
    pub dock: DockConfig,
    pub dock_icons: Vec<DockIconEntry>,
    /// Launchpad row, in initial order. Indices into this list are the launchpad identities.
    pub launchpad_icons: Vec<DockIconId>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dock catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dock catalog declares no dock icons")]
    EmptyDock,
    #[error("icon `{0}` is listed more than once")]
    DuplicateIcon(String),
}

impl DockCatalog {
    pub fn dock_icon_ids(&self) -> Vec<DockIconId> {
        self.dock_icons.iter().map(|entry| entry.id).collect()
    }

    pub fn entry(&self, id: DockIconId) -> Option<&DockIconEntry> {
        self.dock_icons.iter().find(|entry| entry.id == id)
    }

    pub fn label(&self, id: DockIconId) -> String {
        self.entry(id)
            .map(|entry| entry.label.clone())
            .unwrap_or_else(|| format!("{id:?}"))
    }

    pub fn asset(&self, id: DockIconId) -> Option<String> {
        self.entry(id).map(|entry| entry.asset.clone())
    }

    fn validate(self) -> Result<Self, CatalogError> {
        if self.dock_icons.is_empty() {
            return Err(CatalogError::EmptyDock);
        }
        let mut seen = BTreeSet::new();
        for entry in &self.dock_icons {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateIcon(entry.label.clone()));
            }
        }
        let mut seen = BTreeSet::new();
        for id in &self.launchpad_icons {
            if !seen.insert(*id) {
                return Err(CatalogError::DuplicateIcon(format!("{id:?}")));
            }
        }
        Ok(Self {
            dock: self.dock.normalized(),
            ..self
        })
    }
}

impl Default for DockCatalog {
    fn default() -> Self {
        let entry = |id: DockIconId, label: &str, asset: &str| DockIconEntry {
            id,
            label: label.to_string(),
            asset: asset.to_string(),
        };
        Self {
            dock: DockConfig::default(),
            dock_icons: vec![
                entry(DockIconId::Finder, "Finder", "icons/finder.png"),
                entry(DockIconId::Launchpad, "Launchpad", "icons/launchpad.png"),
                entry(DockIconId::Preferences, "Preferences", "icons/preferences.png"),
                entry(DockIconId::Chrome, "Chrome", "icons/chrome.png"),
                entry(DockIconId::Terminal, "Terminal", "icons/terminal.png"),
                entry(DockIconId::Calculator, "Calculator", "icons/calculator.png"),
                entry(DockIconId::Drawing, "Drawing", "icons/drawing.png"),
            ],
            launchpad_icons: vec![
                DockIconId::Preferences,
                DockIconId::Chrome,
                DockIconId::Calculator,
                DockIconId::Drawing,
            ],
        }
    }
}

/// Parses and validates a catalog payload.
pub fn parse_catalog(json: &str) -> Result<DockCatalog, CatalogError> {
    serde_json::from_str::<DockCatalog>(json)?.validate()
}

/// Loads the build-time catalog, falling back to the built-in defaults when it is unusable.
pub fn load_catalog() -> DockCatalog {
    match parse_catalog(DOCK_CATALOG_JSON) {
        Ok(catalog) => catalog,
        Err(err) => {
            logging::warn!("dock catalog unavailable, using defaults: {err}");
            DockCatalog::default()
        }
    }
}
