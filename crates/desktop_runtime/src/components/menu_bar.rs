use std::time::Duration;

use super::*;

const DEFAULT_USER_NAME: &str = "West Liu";
const MENU_LABELS: [&str; 6] = ["File", "Edit", "View", "Go", "Window", "Help"];
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MenuClockSnapshot {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl MenuClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }

    /// `MMM D, YYYY h:mm A`, e.g. `Oct 5, 2026 3:07 PM`.
    fn format(self) -> String {
        let month = MONTH_ABBREVIATIONS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Jan");
        let hour12 = match self.hour % 12 {
            0 => 12,
            hour => hour,
        };
        let meridiem = if self.hour < 12 { "AM" } else { "PM" };
        format!(
            "{month} {}, {} {hour12}:{:02} {meridiem}",
            self.day, self.year, self.minute
        )
    }
}

/// Trimmed user name, or the default when nothing but whitespace was entered.
fn commit_user_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_USER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let clock_now = create_rw_signal(MenuClockSnapshot::now());
    let user_name = create_rw_signal(DEFAULT_USER_NAME.to_string());
    let editing = create_rw_signal(false);
    let name_input = create_node_ref::<html::Input>();

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(MenuClockSnapshot::now()),
        Duration::from_secs(60),
    ) {
        on_cleanup(move || interval.clear());
    }

    create_effect(move |_| {
        if editing.get() {
            if let Some(input) = name_input.get() {
                let _ = input.focus();
            }
        }
    });

    let commit = move |ev: web_sys::FocusEvent| {
        user_name.set(commit_user_name(&event_target_value(&ev)));
        editing.set(false);
    };

    view! {
        <header class="menu-bar">
            <div class="menu-bar-left">
                <span class="menu-bar-logo" aria-hidden="true"></span>
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        view! {
                            <span
                                class="menu-bar-user"
                                title="Click to rename"
                                on:click=move |_| editing.set(true)
                            >
                                {move || user_name.get()}
                            </span>
                        }
                    }
                >
                    <input
                        node_ref=name_input
                        class="menu-bar-user-input"
                        type="text"
                        prop:value=move || user_name.get_untracked()
                        on:blur=commit
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                if let Some(input) = name_input.get_untracked() {
                                    let _ = input.blur();
                                }
                            }
                        }
                    />
                </Show>
                {MENU_LABELS
                    .iter()
                    .map(|label| view! { <span class="menu-bar-item">{*label}</span> })
                    .collect_view()}
            </div>
            <div class="menu-bar-right">
                <span class="menu-bar-clock">{move || clock_now.get().format()}</span>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(month: u32, day: u32, hour: u32, minute: u32) -> MenuClockSnapshot {
        MenuClockSnapshot {
            year: 2026,
            month,
            day,
            hour,
            minute,
        }
    }

    #[test]
    fn clock_uses_twelve_hour_format_with_meridiem() {
        assert_eq!(snapshot(10, 5, 15, 7).format(), "Oct 5, 2026 3:07 PM");
        assert_eq!(snapshot(1, 31, 0, 0).format(), "Jan 31, 2026 12:00 AM");
        assert_eq!(snapshot(12, 1, 12, 30).format(), "Dec 1, 2026 12:30 PM");
        assert_eq!(snapshot(6, 9, 11, 59).format(), "Jun 9, 2026 11:59 AM");
    }

    #[test]
    fn blank_user_name_falls_back_to_default() {
        assert_eq!(commit_user_name("  "), DEFAULT_USER_NAME);
        assert_eq!(commit_user_name(" Ada "), "Ada");
    }
}
