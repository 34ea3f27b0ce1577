//! Dock preferences: position, icon sizes, spacing and screen-edge distance.

use leptos::*;

use crate::{
    components::use_desktop_runtime,
    dock::{
        DockConfig, DockPosition, MAX_ICON_PX, MAX_ICON_SPACING_PX, MAX_MAGNIFIED_ICON_PX,
        MAX_SCREEN_EDGE_PX, MIN_ICON_PX,
    },
    reducer::DesktopAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DockField {
    IconSize,
    MagnifiedIconSize,
    Spacing,
    DistanceToScreenEdge,
}

impl DockField {
    fn label(self) -> &'static str {
        match self {
            Self::IconSize => "Size",
            Self::MagnifiedIconSize => "Magnification",
            Self::Spacing => "Spacing",
            Self::DistanceToScreenEdge => "Distance to edge",
        }
    }

    fn range(self, config: &DockConfig) -> (f64, f64) {
        match self {
            Self::IconSize => (MIN_ICON_PX, MAX_ICON_PX),
            Self::MagnifiedIconSize => (config.icon_size, MAX_MAGNIFIED_ICON_PX),
            Self::Spacing => (0.0, MAX_ICON_SPACING_PX),
            Self::DistanceToScreenEdge => (0.0, MAX_SCREEN_EDGE_PX),
        }
    }

    fn value(self, config: &DockConfig) -> f64 {
        match self {
            Self::IconSize => config.icon_size,
            Self::MagnifiedIconSize => config.magnified_icon_size,
            Self::Spacing => config.spacing,
            Self::DistanceToScreenEdge => config.distance_to_screen_edge,
        }
    }

    /// Applies a slider value. Changing the base size keeps the magnification ratio.
    fn apply(self, config: DockConfig, raw: &str) -> DockConfig {
        let Ok(value) = raw.trim().parse::<f64>() else {
            return config;
        };
        let mut next = config;
        match self {
            Self::IconSize => {
                let ratio = config.magnification();
                next.icon_size = value;
                next.magnified_icon_size = value * ratio;
            }
            Self::MagnifiedIconSize => next.magnified_icon_size = value,
            Self::Spacing => next.spacing = value,
            Self::DistanceToScreenEdge => next.distance_to_screen_edge = value,
        }
        next.normalized()
    }
}

const DOCK_FIELDS: [DockField; 4] = [
    DockField::IconSize,
    DockField::MagnifiedIconSize,
    DockField::Spacing,
    DockField::DistanceToScreenEdge,
];

#[component]
pub(super) fn PreferencesApp() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let dock = Signal::derive(move || runtime.state.with(|desktop| desktop.dock));
    let set_dock = move |config: DockConfig| {
        runtime.dispatch_action(DesktopAction::SetDockConfig { config })
    };

    view! {
        <div class="app-shell app-preferences-shell">
            <fieldset class="pref-group" role="radiogroup" aria-label="Dock position">
                <legend>"Position on screen"</legend>
                {DockPosition::ALL
                    .into_iter()
                    .map(|position| {
                        view! {
                            <label class="pref-radio">
                                <input
                                    type="radio"
                                    name="dock-position"
                                    value=position.css_id()
                                    prop:checked=move || dock.get().position == position
                                    on:change=move |ev| {
                                        if let Some(position) =
                                            DockPosition::from_css_id(&event_target_value(&ev))
                                        {
                                            set_dock(DockConfig { position, ..dock.get_untracked() });
                                        }
                                    }
                                />
                                {position.label()}
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>

            {DOCK_FIELDS
                .into_iter()
                .map(|field| {
                    view! {
                        <label class="pref-slider">
                            <span>{field.label()}</span>
                            <input
                                type="range"
                                step="1"
                                min=move || field.range(&dock.get()).0.to_string()
                                max=move || field.range(&dock.get()).1.to_string()
                                prop:value=move || field.value(&dock.get()).to_string()
                                on:input=move |ev| {
                                    set_dock(field.apply(dock.get_untracked(), &event_target_value(&ev)))
                                }
                            />
                            <output>{move || format!("{}px", field.value(&dock.get()))}</output>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}
