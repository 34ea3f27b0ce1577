//! Freehand drawing canvas.

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::model::PointerPosition;

const CANVAS_WIDTH: u32 = 620;
const CANVAS_HEIGHT: u32 = 380;
const MIN_BRUSH_PX: f64 = 1.0;
const MAX_BRUSH_PX: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
struct Brush {
    color: String,
    width: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: "#1d1d1f".to_string(),
            width: 4.0,
        }
    }
}

impl Brush {
    fn with_width(&self, raw: &str) -> Self {
        let width = raw
            .trim()
            .parse::<f64>()
            .map(|value| value.clamp(MIN_BRUSH_PX, MAX_BRUSH_PX))
            .unwrap_or(self.width);
        Self {
            width,
            ..self.clone()
        }
    }
}

/// Pointer state of the stroke in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Stroke {
    last: Option<PointerPosition>,
}

impl Stroke {
    fn start(&mut self, at: PointerPosition) {
        self.last = Some(at);
    }

    /// Segment to draw for a move to `to`, if a stroke is in progress.
    fn extend(&mut self, to: PointerPosition) -> Option<(PointerPosition, PointerPosition)> {
        let from = self.last?;
        self.last = Some(to);
        Some((from, to))
    }

    fn finish(&mut self) {
        self.last = None;
    }
}

#[cfg(target_arch = "wasm32")]
fn canvas_context(canvas: &web_sys::HtmlCanvasElement) -> Option<web_sys::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
}

#[cfg(target_arch = "wasm32")]
fn draw_segment(
    canvas: &web_sys::HtmlCanvasElement,
    brush: &Brush,
    (from, to): (PointerPosition, PointerPosition),
) {
    let Some(context) = canvas_context(canvas) else {
        return;
    };
    context.set_stroke_style_str(&brush.color);
    context.set_line_width(brush.width);
    context.set_line_cap("round");
    context.set_line_join("round");
    context.begin_path();
    context.move_to(from.x, from.y);
    context.line_to(to.x, to.y);
    context.stroke();
}

#[cfg(not(target_arch = "wasm32"))]
fn draw_segment(
    _: &web_sys::HtmlCanvasElement,
    _: &Brush,
    _: (PointerPosition, PointerPosition),
) {
}

#[cfg(target_arch = "wasm32")]
fn clear_canvas(canvas: &web_sys::HtmlCanvasElement) {
    if let Some(context) = canvas_context(canvas) {
        context.clear_rect(
            0.0,
            0.0,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_canvas(_: &web_sys::HtmlCanvasElement) {}

fn canvas_point(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[component]
pub(super) fn DrawingApp() -> impl IntoView {
    let brush = create_rw_signal(Brush::default());
    let stroke = store_value(Stroke::default());
    let canvas = create_node_ref::<html::Canvas>();

    let on_mouse_down = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        stroke.update_value(|stroke| stroke.start(canvas_point(&ev)));
    };
    let on_mouse_move = move |ev: web_sys::MouseEvent| {
        let Some(segment) = stroke
            .try_update_value(|stroke| stroke.extend(canvas_point(&ev)))
            .flatten()
        else {
            return;
        };
        if let Some(element) = canvas.get_untracked() {
            brush.with_untracked(|brush| draw_segment(&element, brush, segment));
        }
    };
    let on_stroke_end = move |_| stroke.update_value(Stroke::finish);

    view! {
        <div class="app-shell app-drawing-shell">
            <div class="app-toolbar" role="group" aria-label="Brush controls">
                <label>
                    "Color "
                    <input
                        type="color"
                        prop:value=move || brush.get().color
                        on:input=move |ev| {
                            let color = event_target_value(&ev);
                            brush.update(|brush| brush.color = color);
                        }
                    />
                </label>
                <label>
                    "Brush "
                    <input
                        type="range"
                        min=MIN_BRUSH_PX.to_string()
                        max=MAX_BRUSH_PX.to_string()
                        prop:value=move || brush.get().width.to_string()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            brush.update(|brush| *brush = brush.with_width(&raw));
                        }
                    />
                </label>
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| {
                        if let Some(element) = canvas.get_untracked() {
                            clear_canvas(&element);
                        }
                    }
                >
                    "Clear"
                </button>
            </div>
            <canvas
                node_ref=canvas
                class="drawing-canvas"
                width=CANVAS_WIDTH
                height=CANVAS_HEIGHT
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=on_stroke_end
                on:mouseleave=on_stroke_end
            />
        </div>
    }
}
