use serde::{Deserialize, Serialize};

use crate::dock::DockConfig;

/// Page opened by the browser dock icon.
pub const BROWSER_HOME_URL: &str = "https://www.google.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Preferences,
    Calculator,
    Drawing,
}

impl AppId {
    pub const ALL: [AppId; 3] = [Self::Preferences, Self::Calculator, Self::Drawing];

    pub fn title(self) -> &'static str {
        match self {
            Self::Preferences => "System Preferences",
            Self::Calculator => "Calculator",
            Self::Drawing => "Drawing",
        }
    }

    pub fn default_rect(self) -> WindowRect {
        match self {
            Self::Preferences => WindowRect {
                x: 160,
                y: 90,
                w: 520,
                h: 360,
            },
            Self::Calculator => WindowRect {
                x: 420,
                y: 120,
                w: 232,
                h: 320,
            },
            Self::Drawing => WindowRect {
                x: 240,
                y: 70,
                w: 640,
                h: 460,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockIconId {
    Finder,
    Launchpad,
    Preferences,
    Chrome,
    Terminal,
    Calculator,
    Drawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockIconAction {
    OpenApp(AppId),
    ShowLaunchpad,
    OpenUrl(&'static str),
    Inert,
}

impl DockIconId {
    pub fn action(self) -> DockIconAction {
        match self {
            Self::Preferences => DockIconAction::OpenApp(AppId::Preferences),
            Self::Calculator => DockIconAction::OpenApp(AppId::Calculator),
            Self::Drawing => DockIconAction::OpenApp(AppId::Drawing),
            Self::Launchpad => DockIconAction::ShowLaunchpad,
            Self::Chrome => DockIconAction::OpenUrl(BROWSER_HOME_URL),
            Self::Finder | Self::Terminal => DockIconAction::Inert,
        }
    }

    pub fn app_id(self) -> Option<AppId> {
        match self.action() {
            DockIconAction::OpenApp(app_id) => Some(app_id),
            _ => None,
        }
    }

    /// Whether clicking the icon does anything (drives the pointer cursor).
    pub fn is_interactive(self) -> bool {
        !matches!(self.action(), DockIconAction::Inert)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn delta_from(self, origin: PointerPosition) -> PointerPosition {
        PointerPosition {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppLifecycle {
    Closed,
    /// Dock icon is bouncing; the window opens when the bounce completes.
    Launching,
    Running,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub app_id: AppId,
    pub lifecycle: AppLifecycle,
    pub rect: WindowRect,
    pub z_index: u32,
    pub is_focused: bool,
    /// Running dot under the dock icon. Lags behind `lifecycle` when closing.
    pub indicator_active: bool,
}

impl AppRecord {
    pub fn closed(app_id: AppId) -> Self {
        Self {
            app_id,
            lifecycle: AppLifecycle::Closed,
            rect: app_id.default_rect(),
            z_index: 0,
            is_focused: false,
            indicator_active: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == AppLifecycle::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Back-to-front stacking order.
    pub apps: Vec<AppRecord>,
    pub launchpad_open: bool,
    pub dock: DockConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_dock_config(DockConfig::default())
    }
}

impl DesktopState {
    pub fn with_dock_config(dock: DockConfig) -> Self {
        Self {
            apps: AppId::ALL.into_iter().map(AppRecord::closed).collect(),
            launchpad_open: false,
            dock: dock.normalized(),
        }
    }

    pub fn app(&self, app_id: AppId) -> Option<&AppRecord> {
        self.apps.iter().find(|app| app.app_id == app_id)
    }

    pub fn lifecycle(&self, app_id: AppId) -> AppLifecycle {
        self.app(app_id)
            .map(|app| app.lifecycle)
            .unwrap_or(AppLifecycle::Closed)
    }

    pub fn frontmost_app(&self) -> Option<AppId> {
        self.apps
            .iter()
            .find(|app| app.is_focused && app.is_running())
            .map(|app| app.app_id)
    }

    pub fn running_apps(&self) -> Vec<AppRecord> {
        self.apps
            .iter()
            .filter(|app| app.is_running())
            .cloned()
            .collect()
    }
}
