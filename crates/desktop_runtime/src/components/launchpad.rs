use std::time::Duration;

use leptos::leptos_dom::helpers::{IntervalHandle, WindowListenerHandle};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::launchpad::LaunchpadEngine;

const STALE_DRAG_POLL_MS: u64 = 250;
const PRIMARY_BUTTON_MASK: u16 = 1;

fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
fn is_launchpad_icon_target(ev: &web_sys::MouseEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(".launchpad-icon").ok().flatten())
        .is_some()
}

#[cfg(not(target_arch = "wasm32"))]
fn is_launchpad_icon_target(_: &web_sys::MouseEvent) -> bool {
    false
}

/// A move reporting the primary button up means its release happened where no listener saw it.
fn primary_button_released(buttons: u16) -> bool {
    buttons & PRIMARY_BUTTON_MASK == 0
}

/// Window-level listeners that live exactly as long as one icon drag.
struct DragSubscription {
    pointer_move: WindowListenerHandle,
    pointer_up: WindowListenerHandle,
    focus_lost: WindowListenerHandle,
    watchdog: Option<IntervalHandle>,
}

impl DragSubscription {
    fn remove(self) {
        self.pointer_move.remove();
        self.pointer_up.remove();
        self.focus_lost.remove();
        if let Some(watchdog) = self.watchdog {
            watchdog.clear();
        }
    }
}

fn unsubscribe(subscription: StoredValue<Option<DragSubscription>>) {
    let _ = subscription.try_update_value(|slot| {
        if let Some(active) = slot.take() {
            active.remove();
        }
    });
}

fn subscribe(
    engine: RwSignal<LaunchpadEngine>,
    subscription: StoredValue<Option<DragSubscription>>,
) {
    unsubscribe(subscription);

    let release_lost = move |reason: &str| {
        let cancelled = engine
            .try_update(|launchpad| launchpad.release_lost())
            .unwrap_or(false);
        if cancelled {
            logging::warn!("launchpad drag lost its pointer release ({reason}); reverting order");
        }
        unsubscribe(subscription);
    };

    let pointer_move = window_event_listener(ev::mousemove, move |ev| {
        if primary_button_released(ev.buttons()) {
            release_lost("button up");
            return;
        }
        let pointer = pointer_from_mouse_event(&ev);
        engine.update(|launchpad| {
            launchpad.drag_to(pointer, now_ms());
        });
    });
    let pointer_up = window_event_listener(ev::mouseup, move |_| {
        engine.update(|launchpad| launchpad.on_drag_end());
        unsubscribe(subscription);
    });
    let focus_lost = window_event_listener(ev::blur, move |_| release_lost("window blur"));
    let watchdog = set_interval_with_handle(
        move || {
            let mut next = engine.get_untracked();
            if next.expire_stale_drag(now_ms()) {
                logging::warn!("launchpad drag idle past its timeout; reverting order");
                engine.set(next);
                unsubscribe(subscription);
            }
        },
        Duration::from_millis(STALE_DRAG_POLL_MS),
    )
    .ok();

    subscription.set_value(Some(DragSubscription {
        pointer_move,
        pointer_up,
        focus_lost,
        watchdog,
    }));
}

#[component]
pub(super) fn LaunchpadOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let engine = runtime.launchpad;
    let catalog = runtime.catalog.get_value();
    let open = Signal::derive(move || runtime.state.with(|desktop| desktop.launchpad_open));
    let subscription = store_value(None::<DragSubscription>);

    let dismiss_listener = window_event_listener(ev::mousedown, move |ev| {
        if !open.get_untracked() || is_launchpad_icon_target(&ev) {
            return;
        }
        runtime.dispatch_action(DesktopAction::CloseLaunchpad);
    });
    let escape_listener = window_event_listener(ev::keyup, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            runtime.dispatch_action(DesktopAction::CloseLaunchpad);
        }
    });
    on_cleanup(move || {
        dismiss_listener.remove();
        escape_listener.remove();
        unsubscribe(subscription);
    });

    let icons = catalog
        .launchpad_icons
        .iter()
        .enumerate()
        .map(|(slot, icon)| {
            (
                slot,
                *icon,
                catalog.label(*icon),
                catalog.asset(*icon).map(|asset| icon_asset_url(&asset)),
            )
        })
        .collect::<Vec<_>>();

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div id="launchpad" class="launchpad">
                <div class="launchpad-row">
                    <For each={
                        let icons = icons.clone();
                        move || icons.clone()
                    } key=|(slot, _, _, _)| *slot let:item>
                        {{
                            let (slot, icon, label, asset) = item;
                            let held_style = move || {
                                engine.with(|launchpad| {
                                    let translation = launchpad.translation(slot);
                                    let held = launchpad.is_held(slot);
                                    format!(
                                        "cursor:{};transform:translate({}px, {}px);transition:{};z-index:{};",
                                        launchpad.cursor(slot),
                                        translation.x,
                                        translation.y,
                                        if held { "none" } else { "transform 500ms" },
                                        if held { 2 } else { 1 }
                                    )
                                })
                            };
                            let slot_style = move || {
                                engine.with(|launchpad| {
                                    let dragged = launchpad.dragged_icon_id() == Some(slot);
                                    format!(
                                        "left:{}px;transition:{};",
                                        launchpad.icon_offset(slot),
                                        if dragged { "none" } else { "all 500ms" }
                                    )
                                })
                            };
                            let image_style = asset
                                .map(|url| format!("background-image:url('{url}');"))
                                .unwrap_or_default();
                            view! {
                                <div
                                    class="launchpad-draggable"
                                    style=held_style
                                    on:mousedown=move |ev: web_sys::MouseEvent| {
                                        if ev.button() != 0 {
                                            return;
                                        }
                                        ev.prevent_default();
                                        let origin = pointer_from_mouse_event(&ev);
                                        let started = engine
                                            .try_update(|launchpad| launchpad.begin_drag(slot, origin, now_ms()))
                                            .unwrap_or(false);
                                        if started {
                                            subscribe(engine, subscription);
                                        }
                                    }
                                >
                                    <div class="launchpad-item" style=slot_style>
                                        <div
                                            class="launchpad-icon"
                                            role="button"
                                            aria-label=label.clone()
                                            style=image_style
                                            on:click=move |_| {
                                                let launch = engine
                                                    .try_update(|launchpad| launchpad.click_icon(slot))
                                                    .flatten();
                                                if launch.is_some() {
                                                    runtime.dispatch_action(DesktopAction::ActivateIcon { icon });
                                                }
                                            }
                                        />
                                        <span class="launchpad-label">{label}</span>
                                    </div>
                                </div>
                            }
                        }}
                    </For>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_without_the_primary_button_count_as_lost_releases() {
        assert!(primary_button_released(0));
        assert!(primary_button_released(2));
        assert!(!primary_button_released(1));
        assert!(!primary_button_released(3));
    }
}
