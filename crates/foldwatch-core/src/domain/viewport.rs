//! Viewport geometry: the fold predicate and the layout width estimate.

use serde::{Deserialize, Serialize};

/// Viewport metrics measured once per scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub height: f64,
    pub scroll_top: f64,
}

impl ViewportState {
    pub fn new(height: f64, scroll_top: f64) -> Self {
        Self { height, scroll_top }
    }

    /// Document offset of the visible bottom edge.
    pub fn bottom(&self) -> f64 {
        self.height + self.scroll_top
    }

    /// Whether an element whose top edge sits at `offset_top` (document
    /// coordinates) is at most `fold_distance` pixels below the visible bottom edge.
    pub fn within_fold(&self, offset_top: f64, fold_distance: f64) -> bool {
        self.bottom() > offset_top - fold_distance
    }
}

/// Layout widths reported by the host, in CSS pixels.
///
/// Any of them may be missing or NaN on exotic hosts; non-finite values are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutWidths {
    pub document_client: Option<f64>,
    pub document_offset: Option<f64>,
    pub body_client: Option<f64>,
}

impl LayoutWidths {
    fn finite(&self) -> impl Iterator<Item = f64> {
        [self.document_client, self.document_offset, self.body_client]
            .into_iter()
            .flatten()
            .filter(|w| w.is_finite())
    }
}

/// Estimate the layout viewport width in CSS pixels.
///
/// The widest layout width wins, clamped to the screen width in CSS pixels
/// (`ceil(screen_width / device_pixel_ratio)`) when that is known. Falls back
/// to the screen-derived width, then to 0.
pub fn estimate_viewport_width(
    widths: &LayoutWidths,
    screen_width: Option<f64>,
    device_pixel_ratio: Option<f64>,
) -> f64 {
    let ratio = device_pixel_ratio
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(1.0);
    let screen_fallback = screen_width
        .map(|w| (w / ratio).ceil())
        .filter(|w| w.is_finite());

    let widest = widths.finite().reduce(f64::max).map(|width| match screen_fallback {
        Some(screen) => width.min(screen),
        None => width,
    });

    match widest {
        Some(width) if width != 0.0 => width,
        _ => screen_fallback.filter(|w| *w != 0.0).unwrap_or(0.0),
    }
}
