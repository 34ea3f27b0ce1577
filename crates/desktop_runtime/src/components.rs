//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod launchpad;
mod menu_bar;
mod window;

use leptos::*;

use self::{dock::Dock, launchpad::LaunchpadOverlay, menu_bar::MenuBar, window::DesktopWindow};

use crate::{
    model::{AppId, DockIconId, PointerPosition},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// Path of a catalog icon asset relative to the site root.
fn icon_asset_url(asset: &str) -> String {
    format!("/{}", asset.trim_start_matches('/'))
}

#[component]
/// Renders the full desktop shell UI and processes queued [`crate::RuntimeEffect`] values.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div id="desktop-shell-root" class="desktop-shell">
            <MenuBar />

            <div class="desktop-window-layer">
                <For
                    each=move || {
                        state
                            .get()
                            .running_apps()
                            .into_iter()
                            .map(|app| app.app_id)
                            .collect::<Vec<AppId>>()
                    }
                    key=|app_id| *app_id
                    let:app_id
                >
                    <DesktopWindow app_id=app_id />
                </For>
            </div>

            <LaunchpadOverlay />
            <Dock />
        </div>
    }
}
