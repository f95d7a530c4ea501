//! Window port - ビューポートの計測とイベントリスナー

use crate::domain::{LayoutWidths, Trigger};

pub trait Window {
    fn viewport_height(&self) -> f64;

    fn scroll_top(&self) -> f64;

    /// `window.orientation`; `None` when the host does not report one
    /// (or has no `orientationchange` event).
    fn orientation(&self) -> Option<i32>;

    fn layout_widths(&self) -> LayoutWidths;

    fn screen_width(&self) -> Option<f64>;

    fn device_pixel_ratio(&self) -> Option<f64>;

    /// Start delivering `trigger` events to the loader. Attaching twice is a no-op.
    fn attach(&self, trigger: Trigger);

    /// Stop delivering `trigger` events. Detaching a detached trigger is a no-op.
    fn detach(&self, trigger: Trigger);
}
