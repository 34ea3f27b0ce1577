//! Launchpad drag engine: live reordering of a row of icons with a committed and a temporary
//! order.
//!
//! Icon identities are the indices `0..N` of the launchpad catalog. `order` only changes on
//! [`LaunchpadEngine::on_drag_end`]; every drag tick rebuilds `temporary_order` from `order`.

use crate::model::PointerPosition;

/// Horizontal pointer travel that shifts a dragged icon by one slot.
pub const SLOT_WIDTH_PX: f64 = 100.0;
/// Rendered distance between neighbouring icon slots.
pub const SLOT_SPACING_PX: f64 = 200.0;
/// Last-resort timeout: a drag with no pointer activity for this long is cancelled even though
/// no lost release was observed.
pub const STALE_DRAG_TIMEOUT_MS: f64 = 30_000.0;

/// Pointer bookkeeping for the icon currently held down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub icon_id: usize,
    pub origin: PointerPosition,
    pub translation: PointerPosition,
    pub last_activity_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchpadEngine {
    order: Vec<usize>,
    temporary_order: Vec<usize>,
    dragged_icon_id: Option<usize>,
    dragging: bool,
    session: Option<DragSession>,
    suppress_click: bool,
}

impl LaunchpadEngine {
    pub fn new(icon_count: usize) -> Self {
        let order: Vec<usize> = (0..icon_count).collect();
        Self {
            temporary_order: order.clone(),
            order,
            dragged_icon_id: None,
            dragging: false,
            session: None,
            suppress_click: false,
        }
    }

    pub fn icon_count(&self) -> usize {
        self.order.len()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn temporary_order(&self) -> &[usize] {
        &self.temporary_order
    }

    pub fn dragged_icon_id(&self) -> Option<usize> {
        self.dragged_icon_id
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Pointer pressed on an icon. Unknown identities are ignored.
    pub fn begin_drag(&mut self, icon_id: usize, origin: PointerPosition, now_ms: f64) -> bool {
        if !self.order.contains(&icon_id) {
            return false;
        }
        self.session = Some(DragSession {
            icon_id,
            origin,
            translation: PointerPosition::default(),
            last_activity_ms: now_ms,
        });
        self.suppress_click = false;
        true
    }

    /// Pointer moved while an icon is held down; forwards the translation from the drag origin
    /// to [`Self::on_drag_delta`].
    pub fn drag_to(&mut self, pointer: PointerPosition, now_ms: f64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.translation = pointer.delta_from(session.origin);
        session.last_activity_ms = now_ms;
        let (icon_id, translation) = (session.icon_id, session.translation);
        self.on_drag_delta(icon_id, translation)
    }

    /// Rebuilds the temporary order for one drag tick. Returns `false` when the shifted target
    /// slot falls outside the row, in which case the previous temporary order is kept.
    pub fn on_drag_delta(&mut self, icon_id: usize, delta: PointerPosition) -> bool {
        self.dragging = true;

        let Some(index) = self.order.iter().position(|id| *id == icon_id) else {
            return false;
        };
        let shift = js_round(delta.x / SLOT_WIDTH_PX);
        let target = index as f64 + shift;
        if target < 0.0 || target >= self.order.len() as f64 {
            return false;
        }

        let mut temporary_order: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|id| *id != icon_id)
            .collect();
        temporary_order.insert(target as usize, icon_id);
        self.temporary_order = temporary_order;
        self.dragged_icon_id = Some(icon_id);
        true
    }

    /// Pointer released: commits the temporary order. The click that the browser delivers right
    /// after a moved drag is swallowed by [`Self::click_icon`].
    pub fn on_drag_end(&mut self) {
        self.order = self.temporary_order.clone();
        self.dragged_icon_id = None;
        self.suppress_click = self.dragging;
        self.dragging = false;
        self.session = None;
    }

    /// Drops the drag without committing: `temporary_order` reverts to `order`.
    pub fn cancel_drag(&mut self) {
        self.temporary_order = self.order.clone();
        self.dragged_icon_id = None;
        self.dragging = false;
        self.session = None;
        self.suppress_click = false;
    }

    /// The pointer moved with the primary button up, or the window lost focus, while a drag
    /// was open: the release was never delivered. Cancels the drag; returns `true` when one was
    /// open.
    pub fn release_lost(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.cancel_drag();
        true
    }

    /// Cancels a drag that has seen no pointer activity for [`STALE_DRAG_TIMEOUT_MS`]. Returns
    /// `true` when a drag was cancelled.
    pub fn expire_stale_drag(&mut self, now_ms: f64) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if now_ms - session.last_activity_ms < STALE_DRAG_TIMEOUT_MS {
            return false;
        }
        self.cancel_drag();
        true
    }

    /// Click on an icon; returns the identity to launch unless the click ends a drag.
    pub fn click_icon(&mut self, icon_id: usize) -> Option<usize> {
        if self.suppress_click {
            self.suppress_click = false;
            return None;
        }
        self.order.contains(&icon_id).then_some(icon_id)
    }

    /// Offset of an icon along the row, in px. The dragged icon keeps its committed slot so it
    /// does not jump ahead of the pointer; the rest follow the temporary order.
    pub fn icon_offset(&self, icon_id: usize) -> f64 {
        let sequence = if self.dragged_icon_id == Some(icon_id) {
            &self.order
        } else {
            &self.temporary_order
        };
        sequence
            .iter()
            .position(|id| *id == icon_id)
            .map(|slot| slot as f64 * SLOT_SPACING_PX)
            .unwrap_or(0.0)
    }

    /// Pointer translation applied to the icon being held, zero for every other icon.
    pub fn translation(&self, icon_id: usize) -> PointerPosition {
        self.session
            .filter(|session| session.icon_id == icon_id)
            .map(|session| session.translation)
            .unwrap_or_default()
    }

    pub fn is_held(&self, icon_id: usize) -> bool {
        self.session
            .is_some_and(|session| session.icon_id == icon_id)
    }

    pub fn cursor(&self, icon_id: usize) -> &'static str {
        if self.is_held(icon_id) {
            "grabbing"
        } else {
            "grab"
        }
    }
}

/// Rounds half-way values toward positive infinity.
fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}
