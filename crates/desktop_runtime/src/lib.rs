pub mod apps;
pub mod catalog;
pub mod components;
pub mod dock;
mod effect_executor;
pub mod launchpad;
pub mod model;
pub mod reducer;
mod runtime_context;

pub use catalog::{load_catalog, CatalogError, DockCatalog};
pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use dock::{DockConfig, DockEngine, DockPosition};
pub use launchpad::LaunchpadEngine;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
