//! Calculator app: an operand/operator state machine behind a 19-key keypad.

mod engine;

use leptos::*;

pub use engine::{
    format_number, normalize_scientific, parse_float, to_precision, BinaryOp, CalcKey,
    CalculatorState, UnaryOp, KEY_LABELS,
};

const FUNCTION_KEY_SLOTS: [usize; 3] = [0, 1, 2];
const OPERATOR_KEY_SLOTS: [usize; 5] = [3, 7, 11, 15, 18];

fn key_class(slot: usize, label: &str) -> String {
    if FUNCTION_KEY_SLOTS.contains(&slot) {
        "calc-key dark".to_string()
    } else if OPERATOR_KEY_SLOTS.contains(&slot) {
        "calc-key orange".to_string()
    } else if label == "0" {
        "calc-key digit wide".to_string()
    } else {
        "calc-key digit".to_string()
    }
}

#[component]
pub fn CalculatorApp() -> impl IntoView {
    let calc = create_rw_signal(CalculatorState::default());

    view! {
        <div class="app-shell app-calculator-shell">
            <div class="calc-display-panel">
                <div class="calc-display" role="status" aria-live="polite">
                    {move || calc.with(|state| state.display_text().to_string())}
                </div>
            </div>

            <div class="calc-keypad" role="group" aria-label="Calculator keys">
                <For
                    each=move || {
                        calc.with(|state| state.keys())
                            .into_iter()
                            .enumerate()
                            .collect::<Vec<_>>()
                    }
                    key=|(slot, label)| (*slot, *label)
                    let:key
                >
                    {{
                        let (slot, label) = key;
                        view! {
                            <button
                                type="button"
                                class=key_class(slot, label)
                                on:click=move |_| calc.update(|state| state.press(label))
                            >
                                {label}
                            </button>
                        }
                    }}
                </For>
            </div>
        </div>
    }
}
