//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use std::time::Duration;

use leptos::*;

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::ScheduleLaunchCompletion { app_id, delay_ms } => {
            dispatch_later(
                runtime,
                DesktopAction::CompleteLaunch { app_id },
                delay_ms,
            );
        }
        RuntimeEffect::ScheduleIndicatorRelease { app_id, delay_ms } => {
            dispatch_later(
                runtime,
                DesktopAction::ReleaseIndicator { app_id },
                delay_ms,
            );
        }
        RuntimeEffect::OpenExternalUrl(url) => open_external_url(&url),
    }
}

fn dispatch_later(runtime: DesktopRuntimeContext, action: DesktopAction, delay_ms: u32) {
    set_timeout(
        move || runtime.dispatch_action(action),
        Duration::from_millis(u64::from(delay_ms)),
    );
}

fn open_external_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            logging::warn!("open external url failed for `{url}`: no window");
            return;
        };
        if let Err(err) = window.open_with_url_and_target(url, "_blank") {
            logging::warn!("open external url failed for `{url}`: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    logging::log!("open external url `{url}`");
}
