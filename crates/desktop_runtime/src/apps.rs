//! Built-in app bodies mounted inside desktop windows.

mod drawing;
mod preferences;

use desktop_app_calculator::CalculatorApp;
use leptos::*;

use crate::model::AppId;

use self::{drawing::DrawingApp, preferences::PreferencesApp};

/// Builds the window body for an app.
pub fn app_body(app_id: AppId) -> View {
    match app_id {
        AppId::Preferences => view! { <PreferencesApp /> }.into_view(),
        AppId::Calculator => view! { <CalculatorApp /> }.into_view(),
        AppId::Drawing => view! { <DrawingApp /> }.into_view(),
    }
}
