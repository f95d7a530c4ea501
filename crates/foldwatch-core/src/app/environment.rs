//! EnvironmentContext - ローダー 1 インスタンスが所有する環境情報
//!
//! グローバルなキャッシュ（画面幅、帯域など）の代わりに、構築時に明示的に作って
//! ローダーに渡します。帯域判定は一度だけ行い、コールバックが参照できるよう公開します
//! （ローダー自身は使わない）。

use serde::Serialize;

use crate::domain::{Bandwidth, estimate_viewport_width};
use crate::ports::{NetworkInformation, Window};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentContext {
    bandwidth: Bandwidth,
    orientation_supported: bool,
    screen_width: Option<f64>,
    device_pixel_ratio: Option<f64>,
    viewport_width: Option<f64>,
}

impl EnvironmentContext {
    pub fn probe<H: Window + NetworkInformation + ?Sized>(host: &H) -> Self {
        let connection = host.connection();
        Self {
            bandwidth: Bandwidth::classify(connection.as_ref()),
            orientation_supported: host.orientation().is_some(),
            screen_width: host.screen_width(),
            device_pixel_ratio: host.device_pixel_ratio(),
            viewport_width: None,
        }
    }

    /// A fast-connection environment with no orientation support and nothing measured.
    pub fn detached() -> Self {
        Self {
            bandwidth: Bandwidth::High,
            orientation_supported: false,
            screen_width: None,
            device_pixel_ratio: None,
            viewport_width: None,
        }
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn has_low_bandwidth(&self) -> bool {
        self.bandwidth.is_low()
    }

    pub fn orientation_supported(&self) -> bool {
        self.orientation_supported
    }

    pub fn screen_width(&self) -> Option<f64> {
        self.screen_width
    }

    /// Layout viewport width estimate; `None` until the loader has bootstrapped.
    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport_width
    }

    /// Compute the viewport width estimate once; later calls return the cached value.
    pub(crate) fn resolve_viewport_width<H: Window + ?Sized>(&mut self, host: &H) -> f64 {
        if let Some(width) = self.viewport_width {
            return width;
        }
        let width = estimate_viewport_width(
            &host.layout_widths(),
            self.screen_width,
            self.device_pixel_ratio,
        );
        self.viewport_width = Some(width);
        width
    }
}

impl Default for EnvironmentContext {
    fn default() -> Self {
        Self::detached()
    }
}
