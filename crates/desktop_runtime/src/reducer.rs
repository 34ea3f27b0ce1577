//! Reducer actions, side-effect intents, and transition logic for the desktop shell.

use thiserror::Error;

use crate::dock::DockConfig;
use crate::model::{AppId, AppLifecycle, AppRecord, DesktopState, DockIconAction, DockIconId};

/// Time the dock icon bounces before the app window opens.
pub const LAUNCH_BOUNCE_MS: u32 = 1_500;
/// Delay between closing an app and clearing its running indicator.
pub const INDICATOR_RELEASE_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Dock or launchpad icon clicked.
    ActivateIcon {
        /// Icon that was clicked.
        icon: DockIconId,
    },
    /// The launch bounce for an app finished.
    CompleteLaunch {
        /// App whose window should open.
        app_id: AppId,
    },
    /// Raise a running app's window.
    FocusApp {
        /// App to raise.
        app_id: AppId,
    },
    /// Close an app window.
    CloseApp {
        /// App to close.
        app_id: AppId,
    },
    /// Clear a closed app's running indicator once its exit animation ran.
    ReleaseIndicator {
        /// App whose indicator should be cleared.
        app_id: AppId,
    },
    OpenLaunchpad,
    CloseLaunchpad,
    /// Replace the dock configuration (normalized on entry).
    SetDockConfig {
        /// New dock configuration.
        config: DockConfig,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Dispatch [`DesktopAction::CompleteLaunch`] after `delay_ms`.
    ScheduleLaunchCompletion { app_id: AppId, delay_ms: u32 },
    /// Dispatch [`DesktopAction::ReleaseIndicator`] after `delay_ms`.
    ScheduleIndicatorRelease { app_id: AppId, delay_ms: u32 },
    /// Open an external URL (for icons that leave the shell).
    OpenExternalUrl(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not fit the current state.
pub enum ReducerError {
    /// The app has no record in the desktop state.
    #[error("app {0:?} is not registered with the desktop")]
    AppNotRegistered(AppId),
    /// A launch completion arrived for an app that is not launching.
    #[error("app {0:?} has no pending launch")]
    LaunchNotPending(AppId),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::AppNotRegistered`] when an action references an app without a record
/// and [`ReducerError::LaunchNotPending`] when a launch completion arrives out of turn. The state
/// is left untouched in both cases.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ActivateIcon { icon } => match icon.action() {
            DockIconAction::OpenApp(app_id) => {
                let lifecycle = find_app_mut(state, app_id)?.lifecycle;
                state.launchpad_open = false;
                match lifecycle {
                    AppLifecycle::Closed => {
                        find_app_mut(state, app_id)?.lifecycle = AppLifecycle::Launching;
                        effects.push(RuntimeEffect::ScheduleLaunchCompletion {
                            app_id,
                            delay_ms: LAUNCH_BOUNCE_MS,
                        });
                    }
                    AppLifecycle::Launching => {}
                    AppLifecycle::Running => focus_app_internal(state, app_id)?,
                }
            }
            DockIconAction::ShowLaunchpad => state.launchpad_open = true,
            DockIconAction::OpenUrl(url) => {
                effects.push(RuntimeEffect::OpenExternalUrl(url.to_string()))
            }
            DockIconAction::Inert => {}
        },
        DesktopAction::CompleteLaunch { app_id } => {
            let app = find_app_mut(state, app_id)?;
            if app.lifecycle != AppLifecycle::Launching {
                return Err(ReducerError::LaunchNotPending(app_id));
            }
            app.lifecycle = AppLifecycle::Running;
            app.indicator_active = true;
            app.rect = app_id.default_rect();
            focus_app_internal(state, app_id)?;
        }
        DesktopAction::FocusApp { app_id } => {
            if find_app_mut(state, app_id)?.is_running() {
                focus_app_internal(state, app_id)?;
            }
        }
        DesktopAction::CloseApp { app_id } => {
            let app = find_app_mut(state, app_id)?;
            if app.lifecycle == AppLifecycle::Closed {
                return Ok(effects);
            }
            app.lifecycle = AppLifecycle::Closed;
            app.is_focused = false;
            normalize_app_stack(state);
            effects.push(RuntimeEffect::ScheduleIndicatorRelease {
                app_id,
                delay_ms: INDICATOR_RELEASE_MS,
            });
        }
        DesktopAction::ReleaseIndicator { app_id } => {
            let app = find_app_mut(state, app_id)?;
            if app.lifecycle == AppLifecycle::Closed {
                app.indicator_active = false;
            }
        }
        DesktopAction::OpenLaunchpad => state.launchpad_open = true,
        DesktopAction::CloseLaunchpad => state.launchpad_open = false,
        DesktopAction::SetDockConfig { config } => state.dock = config.normalized(),
    }
    Ok(effects)
}

fn find_app_mut(state: &mut DesktopState, app_id: AppId) -> Result<&mut AppRecord, ReducerError> {
    state
        .apps
        .iter_mut()
        .find(|app| app.app_id == app_id)
        .ok_or(ReducerError::AppNotRegistered(app_id))
}

fn focus_app_internal(state: &mut DesktopState, app_id: AppId) -> Result<(), ReducerError> {
    let index = state
        .apps
        .iter()
        .position(|app| app.app_id == app_id)
        .ok_or(ReducerError::AppNotRegistered(app_id))?;
    let already_focused_top = index + 1 == state.apps.len()
        && state
            .apps
            .get(index)
            .map(|app| app.is_focused && app.is_running())
            .unwrap_or(false);
    if already_focused_top {
        return Ok(());
    }
    for app in &mut state.apps {
        app.is_focused = false;
    }
    let mut app = state.apps.remove(index);
    app.is_focused = true;
    state.apps.push(app);
    normalize_app_stack(state);
    Ok(())
}

fn normalize_app_stack(state: &mut DesktopState) {
    let mut has_focused = false;
    for (idx, app) in state.apps.iter_mut().enumerate() {
        app.z_index = (idx + 1) as u32;
        if !app.is_running() {
            app.is_focused = false;
        }
        if app.is_focused {
            if has_focused {
                app.is_focused = false;
            } else {
                has_focused = true;
            }
        }
    }

    if !has_focused {
        if let Some(top_running) = state.apps.iter_mut().rev().find(|app| app.is_running()) {
            top_running.is_focused = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dock::DockPosition;

    fn launch(state: &mut DesktopState, icon: DockIconId) -> AppId {
        let effects =
            reduce_desktop(state, DesktopAction::ActivateIcon { icon }).expect("activate icon");
        let app_id = icon.app_id().expect("launchable icon");
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleLaunchCompletion {
                app_id,
                delay_ms: LAUNCH_BOUNCE_MS,
            }]
        );
        reduce_desktop(state, DesktopAction::CompleteLaunch { app_id }).expect("complete launch");
        app_id
    }

    #[test]
    fn dock_click_bounces_then_runs_app() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Calculator,
            },
        )
        .expect("activate");
        assert_eq!(state.lifecycle(AppId::Calculator), AppLifecycle::Launching);
        assert!(!state.app(AppId::Calculator).expect("record").indicator_active);

        reduce_desktop(
            &mut state,
            DesktopAction::CompleteLaunch {
                app_id: AppId::Calculator,
            },
        )
        .expect("complete");
        let record = state.app(AppId::Calculator).expect("record");
        assert_eq!(record.lifecycle, AppLifecycle::Running);
        assert!(record.indicator_active);
        assert_eq!(state.frontmost_app(), Some(AppId::Calculator));
    }

    #[test]
    fn click_while_launching_is_ignored() {
        let mut state = DesktopState::default();
        let activate = DesktopAction::ActivateIcon {
            icon: DockIconId::Drawing,
        };
        reduce_desktop(&mut state, activate.clone()).expect("first click");
        let effects = reduce_desktop(&mut state, activate).expect("second click");

        assert_eq!(effects, Vec::new());
        assert_eq!(state.lifecycle(AppId::Drawing), AppLifecycle::Launching);
    }

    #[test]
    fn clicking_running_app_brings_it_to_front() {
        let mut state = DesktopState::default();
        launch(&mut state, DockIconId::Calculator);
        launch(&mut state, DockIconId::Preferences);
        assert_eq!(state.frontmost_app(), Some(AppId::Preferences));

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Calculator,
            },
        )
        .expect("refocus");
        assert_eq!(effects, Vec::new());
        assert_eq!(state.frontmost_app(), Some(AppId::Calculator));
        let top = state.apps.last().expect("top app");
        assert_eq!(top.app_id, AppId::Calculator);
        assert_eq!(top.z_index, state.apps.len() as u32);
    }

    #[test]
    fn focus_ignores_closed_apps() {
        let mut state = DesktopState::default();
        launch(&mut state, DockIconId::Drawing);
        reduce_desktop(
            &mut state,
            DesktopAction::FocusApp {
                app_id: AppId::Preferences,
            },
        )
        .expect("focus closed app");
        assert_eq!(state.frontmost_app(), Some(AppId::Drawing));
    }

    #[test]
    fn close_schedules_indicator_release() {
        let mut state = DesktopState::default();
        let app_id = launch(&mut state, DockIconId::Preferences);

        let effects =
            reduce_desktop(&mut state, DesktopAction::CloseApp { app_id }).expect("close");
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleIndicatorRelease {
                app_id,
                delay_ms: INDICATOR_RELEASE_MS,
            }]
        );
        assert_eq!(state.lifecycle(app_id), AppLifecycle::Closed);
        assert!(state.app(app_id).expect("record").indicator_active);
        assert_eq!(state.frontmost_app(), None);

        reduce_desktop(&mut state, DesktopAction::ReleaseIndicator { app_id }).expect("release");
        assert!(!state.app(app_id).expect("record").indicator_active);
    }

    #[test]
    fn release_after_reopen_keeps_indicator() {
        let mut state = DesktopState::default();
        let app_id = launch(&mut state, DockIconId::Calculator);
        reduce_desktop(&mut state, DesktopAction::CloseApp { app_id }).expect("close");
        launch(&mut state, DockIconId::Calculator);

        reduce_desktop(&mut state, DesktopAction::ReleaseIndicator { app_id }).expect("release");
        assert!(state.app(app_id).expect("record").indicator_active);
    }

    #[test]
    fn closing_focused_app_focuses_next_running_app() {
        let mut state = DesktopState::default();
        launch(&mut state, DockIconId::Drawing);
        let top = launch(&mut state, DockIconId::Calculator);

        reduce_desktop(&mut state, DesktopAction::CloseApp { app_id: top }).expect("close");
        assert_eq!(state.frontmost_app(), Some(AppId::Drawing));
    }

    #[test]
    fn closing_closed_app_is_noop() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::CloseApp {
                app_id: AppId::Drawing,
            },
        )
        .expect("close");
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn launch_completion_out_of_turn_is_rejected() {
        let mut state = DesktopState::default();
        let err = reduce_desktop(
            &mut state,
            DesktopAction::CompleteLaunch {
                app_id: AppId::Preferences,
            },
        )
        .expect_err("not launching");
        assert_eq!(err, ReducerError::LaunchNotPending(AppId::Preferences));
        assert_eq!(state, DesktopState::default());
    }

    #[test]
    fn unknown_app_reports_not_registered() {
        let mut state = DesktopState::default();
        state.apps.retain(|app| app.app_id != AppId::Drawing);

        let err = reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Drawing,
            },
        )
        .expect_err("missing record");
        assert_eq!(err, ReducerError::AppNotRegistered(AppId::Drawing));
    }

    #[test]
    fn launching_from_launchpad_closes_overlay() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Launchpad,
            },
        )
        .expect("open launchpad");
        assert!(state.launchpad_open);

        reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Preferences,
            },
        )
        .expect("launch");
        assert!(!state.launchpad_open);
    }

    #[test]
    fn browser_icon_requests_external_url() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ActivateIcon {
                icon: DockIconId::Chrome,
            },
        )
        .expect("chrome");
        assert_eq!(
            effects,
            vec![RuntimeEffect::OpenExternalUrl(
                "https://www.google.com".to_string()
            )]
        );
    }

    #[test]
    fn inert_icons_change_nothing() {
        let mut state = DesktopState::default();
        for icon in [DockIconId::Finder, DockIconId::Terminal] {
            let effects =
                reduce_desktop(&mut state, DesktopAction::ActivateIcon { icon }).expect("inert");
            assert_eq!(effects, Vec::new());
        }
        assert_eq!(state, DesktopState::default());
    }

    #[test]
    fn dock_config_is_normalized_on_entry() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::SetDockConfig {
                config: DockConfig {
                    position: DockPosition::Left,
                    icon_size: 80.0,
                    magnified_icon_size: 40.0,
                    spacing: 100.0,
                    distance_to_screen_edge: 12.0,
                },
            },
        )
        .expect("set dock");
        assert_eq!(state.dock.position, DockPosition::Left);
        assert_eq!(state.dock.magnified_icon_size, 80.0);
        assert_eq!(state.dock.spacing, 32.0);
        assert_eq!(state.dock.distance_to_screen_edge, 12.0);
    }
}
