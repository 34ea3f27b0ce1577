//! Dock engine: proximity-based icon magnification and container placement.
//!
//! Icon centers are derived from the un-magnified layout (container padding, base icon length
//! and spacing) rather than from rendered node offsets, so every pointer tick is a pure function
//! of the pointer position and the current [`DockConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{DockIconId, PointerPosition};

/// Extra cross-axis length added around the icons.
pub const DOCK_CROSS_PADDING_PX: f64 = 12.0;
/// Padding before the first icon along the main axis.
pub const DOCK_MAIN_PADDING_PX: f64 = 6.0;

pub const MIN_ICON_PX: f64 = 16.0;
pub const MAX_ICON_PX: f64 = 128.0;
pub const MAX_MAGNIFIED_ICON_PX: f64 = 256.0;
pub const MAX_ICON_SPACING_PX: f64 = 32.0;
pub const MAX_SCREEN_EDGE_PX: f64 = 64.0;

const DEFAULT_ICON_PX: f64 = 68.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl DockPosition {
    pub const ALL: [DockPosition; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Stable token used for CSS classes and form values.
    pub fn css_id(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn from_css_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|position| position.css_id() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    pub position: DockPosition,
    /// Base (un-magnified) icon side length in px.
    pub icon_size: f64,
    /// Side length of an icon directly under the pointer.
    pub magnified_icon_size: f64,
    /// Margin on both main-axis sides of every icon.
    pub spacing: f64,
    pub distance_to_screen_edge: f64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            position: DockPosition::Bottom,
            icon_size: DEFAULT_ICON_PX,
            magnified_icon_size: DEFAULT_ICON_PX * 1.5,
            spacing: 0.0,
            distance_to_screen_edge: 5.0,
        }
    }
}

impl DockConfig {
    /// Clamps every field into its supported range; the magnified length never drops below the
    /// base length.
    pub fn normalized(self) -> Self {
        let icon_size = finite_or(self.icon_size, DEFAULT_ICON_PX).clamp(MIN_ICON_PX, MAX_ICON_PX);
        let magnified_icon_size = finite_or(self.magnified_icon_size, icon_size)
            .clamp(icon_size, MAX_MAGNIFIED_ICON_PX);
        Self {
            position: self.position,
            icon_size,
            magnified_icon_size,
            spacing: finite_or(self.spacing, 0.0).clamp(0.0, MAX_ICON_SPACING_PX),
            distance_to_screen_edge: finite_or(self.distance_to_screen_edge, 0.0)
                .clamp(0.0, MAX_SCREEN_EDGE_PX),
        }
    }

    /// Ratio of magnified to base icon length.
    pub fn magnification(&self) -> f64 {
        self.magnified_icon_size / self.icon_size
    }

    pub fn container_style(&self) -> DockContainerStyle {
        DockContainerStyle {
            position: self.position,
            cross_length: self.icon_size + DOCK_CROSS_PADDING_PX,
            edge_margin: self.distance_to_screen_edge,
        }
    }

    /// Inline margins applied to each icon along the main axis.
    pub fn icon_margin_css(&self) -> String {
        if self.position.is_horizontal() {
            format!("margin-left:{0}px;margin-right:{0}px;", self.spacing)
        } else {
            format!("margin-top:{0}px;margin-bottom:{0}px;", self.spacing)
        }
    }

    /// Main-axis length of the un-magnified icon row including container padding.
    pub fn base_main_length(&self, icon_count: usize) -> f64 {
        2.0 * DOCK_MAIN_PADDING_PX + icon_count as f64 * (self.icon_size + 2.0 * self.spacing)
    }

    /// Center of the icon at `index` in container coordinates, as (main axis, cross axis).
    fn icon_center(&self, index: usize) -> (f64, f64) {
        let slot = self.icon_size + 2.0 * self.spacing;
        let main =
            DOCK_MAIN_PADDING_PX + index as f64 * slot + self.spacing + self.icon_size / 2.0;
        let cross = (self.icon_size + DOCK_CROSS_PADDING_PX) / 2.0;
        (main, cross)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Rendered client rectangle of the dock container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DockBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DockBounds {
    /// Maps a client-space pointer into un-magnified container coordinates.
    ///
    /// Magnified icons widen the rendered container around its center, so the main axis is
    /// measured from the center and re-anchored on the base row length. The cross axis is
    /// measured from the container's top or left edge.
    pub fn to_layout(
        &self,
        client: PointerPosition,
        icon_count: usize,
        config: &DockConfig,
    ) -> PointerPosition {
        let half_base = config.base_main_length(icon_count) / 2.0;
        if config.position.is_horizontal() {
            PointerPosition::new(
                client.x - (self.left + self.width / 2.0) + half_base,
                client.y - self.top,
            )
        } else {
            PointerPosition::new(
                client.x - self.left,
                client.y - (self.top + self.height / 2.0) + half_base,
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockContainerStyle {
    pub position: DockPosition,
    /// Height for horizontal docks, width for vertical ones.
    pub cross_length: f64,
    /// Margin on the side facing the screen edge.
    pub edge_margin: f64,
}

impl DockContainerStyle {
    pub fn css(&self) -> String {
        let dimension = if self.position.is_horizontal() {
            "height"
        } else {
            "width"
        };
        format!(
            "{dimension}:{}px;margin-{}:{}px;",
            self.cross_length,
            self.position.css_id(),
            self.edge_margin
        )
    }
}

/// Proximity factor for one icon, floored at `icon_size / magnified_icon_size`.
///
/// `pointer` is in container coordinates. For vertical docks the pointer's y coordinate runs
/// along the icon column and x across it.
pub fn magnify_scale(
    pointer: PointerPosition,
    index: usize,
    icon_count: usize,
    config: &DockConfig,
) -> f64 {
    let floor = config.icon_size / config.magnified_icon_size;
    if icon_count == 0 {
        return floor;
    }

    let (main_center, cross_center) = config.icon_center(index);
    let (main_pointer, cross_pointer) = if config.position.is_horizontal() {
        (pointer.x, pointer.y)
    } else {
        (pointer.y, pointer.x)
    };
    let distance = (main_center - main_pointer).hypot(cross_center - cross_pointer);
    let scale = 1.0 - distance / (icon_count as f64 * config.icon_size);

    scale.max(floor)
}

/// Rendered side length of one icon for the given pointer position, in
/// `[icon_size, magnified_icon_size]`.
pub fn magnified_icon_length(
    pointer: PointerPosition,
    index: usize,
    icon_count: usize,
    config: &DockConfig,
) -> f64 {
    let scale = magnify_scale(pointer, index, icon_count, config);
    (config.icon_size * config.magnification() * scale)
        .clamp(config.icon_size, config.magnified_icon_size)
}

/// Per-icon magnification state for one dock.
#[derive(Debug, Clone, PartialEq)]
pub struct DockEngine {
    config: DockConfig,
    icons: Vec<DockIconId>,
    lengths: BTreeMap<DockIconId, f64>,
    mounted: bool,
}

impl DockEngine {
    pub fn new(icons: Vec<DockIconId>, config: DockConfig) -> Self {
        let config = config.normalized();
        let lengths = icons.iter().map(|icon| (*icon, config.icon_size)).collect();
        Self {
            config,
            icons,
            lengths,
            mounted: false,
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn icons(&self) -> &[DockIconId] {
        &self.icons
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Marks the container geometry as available and starts from the un-magnified baseline.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.reset_scales();
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Replaces the configuration and resets every icon to the new base length.
    pub fn set_config(&mut self, config: DockConfig) {
        self.config = config.normalized();
        self.reset_scales();
    }

    /// Recomputes every icon length for a pointer position. Returns `false` when the container
    /// is not mounted.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> bool {
        if !self.mounted {
            return false;
        }
        let count = self.icons.len();
        for (index, icon) in self.icons.iter().enumerate() {
            let length = magnified_icon_length(pointer, index, count, &self.config);
            self.lengths.insert(*icon, length);
        }
        true
    }

    /// Same as [`Self::pointer_move`] for a client-space pointer over the rendered container.
    pub fn pointer_move_client(&mut self, client: PointerPosition, bounds: DockBounds) -> bool {
        let pointer = bounds.to_layout(client, self.icons.len(), &self.config);
        self.pointer_move(pointer)
    }

    /// Returns every icon to the base length. Returns `false` when the container is not
    /// mounted.
    pub fn reset_scales(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let base = self.config.icon_size;
        for length in self.lengths.values_mut() {
            *length = base;
        }
        true
    }

    pub fn icon_length(&self, icon: DockIconId) -> f64 {
        self.lengths
            .get(&icon)
            .copied()
            .unwrap_or(self.config.icon_size)
    }

    pub fn container_style(&self) -> DockContainerStyle {
        self.config.container_style()
    }
}
