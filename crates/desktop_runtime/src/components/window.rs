use super::*;
use crate::apps;

#[component]
pub(super) fn DesktopWindow(app_id: AppId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let record = Signal::derive(move || runtime.state.with(|state| state.app(app_id).cloned()));

    let focus = move |_| {
        let should_focus = record.get().map(|app| !app.is_focused).unwrap_or(false);
        if should_focus {
            runtime.dispatch_action(DesktopAction::FocusApp { app_id });
        }
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::CloseApp { app_id });
    };
    let style = move || {
        record
            .get()
            .map(|app| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    app.rect.x, app.rect.y, app.rect.w, app.rect.h, app.z_index
                )
            })
            .unwrap_or_default()
    };
    let class = move || {
        let focused = record.get().map(|app| app.is_focused).unwrap_or(false);
        format!(
            "desktop-window window-{}{}",
            app_css_id(app_id),
            if focused { " focused" } else { "" }
        )
    };

    // The body is built once; only chrome attributes follow focus and stacking changes.
    view! {
        <section
            class=class
            style=style
            on:mousedown=focus
            role="dialog"
            aria-label=app_id.title()
        >
            <header class="titlebar">
                <div class="titlebar-controls">
                    <button
                        class="titlebar-button close"
                        aria-label="Close window"
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:click=close
                    />
                    <span class="titlebar-button minimize" aria-hidden="true" />
                    <span class="titlebar-button zoom" aria-hidden="true" />
                </div>
                <div class="titlebar-title">{app_id.title()}</div>
            </header>
            <div class="window-body">{apps::app_body(app_id)}</div>
        </section>
    }
}

fn app_css_id(app_id: AppId) -> &'static str {
    match app_id {
        AppId::Preferences => "preferences",
        AppId::Calculator => "calculator",
        AppId::Drawing => "drawing",
    }
}
