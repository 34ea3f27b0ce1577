use super::*;
use crate::dock::{DockBounds, DockEngine};
use crate::model::AppLifecycle;

fn dock_icon_class(icon: DockIconId, lifecycle: Option<AppLifecycle>) -> String {
    let mut class = String::from("dock-icon");
    if icon.is_interactive() {
        class.push_str(" interactive");
    }
    if lifecycle == Some(AppLifecycle::Launching) {
        class.push_str(" bounce");
    }
    class
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let catalog = runtime.catalog.get_value();
    let engine = create_rw_signal(DockEngine::new(
        catalog.dock_icon_ids(),
        state.get_untracked().dock,
    ));
    let container = create_node_ref::<html::Div>();

    container.on_load(move |_| engine.update(|dock| dock.mount()));
    on_cleanup(move || {
        let _ = engine.try_update(|dock| dock.unmount());
    });

    create_effect(move |_| {
        let config = state.with(|desktop| desktop.dock);
        if engine.with_untracked(|dock| *dock.config() != config) {
            engine.update(|dock| dock.set_config(config));
        }
    });

    let on_mouse_move = move |ev: web_sys::MouseEvent| {
        let Some(element) = container.get_untracked() else {
            return;
        };
        let rect = element.get_bounding_client_rect();
        let bounds = DockBounds {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        let client = pointer_from_mouse_event(&ev);
        engine.update(|dock| {
            dock.pointer_move_client(client, bounds);
        });
    };
    let on_mouse_leave = move |_| {
        engine.update(|dock| {
            dock.reset_scales();
        });
    };

    view! {
        <div
            class=move || format!("dock-container dock-{}", state.with(|desktop| desktop.dock.position.css_id()))
        >
            <div
                node_ref=container
                class="dock"
                style=move || engine.with(|dock| dock.container_style().css())
                on:mousemove=on_mouse_move
                on:mouseleave=on_mouse_leave
            >
                <For each=move || catalog.dock_icons.clone() key=|entry| entry.id let:entry>
                    {{
                        let icon = entry.id;
                        let app_id = icon.app_id();
                        let lifecycle = move || app_id.map(|app_id| state.with(|desktop| desktop.lifecycle(app_id)));
                        let indicator_active = move || {
                            app_id
                                .and_then(|app_id| {
                                    state.with(|desktop| desktop.app(app_id).map(|app| app.indicator_active))
                                })
                                .unwrap_or(false)
                        };
                        let label = entry.label.clone();
                        view! {
                            <div
                                class="dock-item"
                                style=move || state.with(|desktop| desktop.dock.icon_margin_css())
                            >
                                <span class="dock-tooltip">{entry.label.clone()}</span>
                                <img
                                    class=move || dock_icon_class(icon, lifecycle())
                                    src=icon_asset_url(&entry.asset)
                                    alt=label
                                    draggable="false"
                                    style=move || {
                                        let length = engine.with(|dock| dock.icon_length(icon));
                                        format!("width:{length}px;height:{length}px;")
                                    }
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::ActivateIcon { icon })
                                    }
                                />
                                <span
                                    class=move || {
                                        if indicator_active() {
                                            "dock-indicator active"
                                        } else {
                                            "dock-indicator"
                                        }
                                    }
                                    aria-hidden="true"
                                />
                            </div>
                        }
                    }}
                </For>
            </div>
        </div>
    }
}
