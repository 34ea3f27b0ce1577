//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the launchpad
//! drag engine and the dock catalog. UI composition stays in [`crate::components`].

use leptos::*;

use crate::{
    catalog::{load_catalog, DockCatalog},
    effect_executor,
    launchpad::LaunchpadEngine,
    model::DesktopState,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Launchpad icon order; outlives the overlay so reorders survive closing it.
    pub launchpad: RwSignal<LaunchpadEngine>,
    /// Dock and launchpad icon catalog loaded at boot.
    pub catalog: StoredValue<DockCatalog>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let catalog = load_catalog();
    let state = create_rw_signal(DesktopState::with_dock_config(catalog.dock));
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let launchpad = create_rw_signal(LaunchpadEngine::new(catalog.launchpad_icons.len()));
    let catalog = store_value(catalog);

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        match reduce_desktop(&mut desktop, action) {
            Ok(new_effects) => {
                if desktop != previous {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        state,
        effects,
        launchpad,
        catalog,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
