//! Connection speed heuristic.
//!
//! 2G/3G 回線、または 100 KB/s 未満の帯域を「低速」とみなします。
//! 情報が取れない場合やオフライン（帯域 0 / type = none）は「高速」扱い。

use serde::{Deserialize, Serialize};

/// 0.09765625 MB/s = 100 KB/s, rounded up.
const SLOW_BANDWIDTH_MBPS: f64 = 0.1;

/// What the host's network information capability reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionInfo {
    /// Connection type (`"2g"`, `"wifi"`, legacy numeric codes, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Bandwidth in MB/s.
    pub bandwidth: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bandwidth {
    Low,
    #[default]
    High,
}

impl Bandwidth {
    pub fn classify(connection: Option<&ConnectionInfo>) -> Self {
        let Some(connection) = connection else {
            return Self::High;
        };

        let bandwidth = connection
            .bandwidth
            .filter(|b| !b.is_nan())
            .unwrap_or(f64::INFINITY);
        let slow_link = bandwidth > 0.0 && bandwidth < SLOW_BANDWIDTH_MBPS;
        let slow_kind = connection.kind.as_deref().is_some_and(is_slow_kind);

        if slow_link || slow_kind {
            Self::Low
        } else {
            Self::High
        }
    }

    pub fn is_low(self) -> bool {
        self == Self::Low
    }
}

/// Whole-token match on the type name. `3` and `4` are the legacy numeric
/// codes for 2G and 3G; `slow-2g` (Network Information API) counts as slow.
///
/// Older script loaders used the unanchored pattern `/^[23]g|3|4$/`, which
/// misses `slow-2g` and flags any type containing a `3` (e.g. `"lte-3"`).
/// Neither quirk is reproduced here.
fn is_slow_kind(kind: &str) -> bool {
    let kind = kind.trim().to_ascii_lowercase();
    matches!(kind.as_str(), "2g" | "3g" | "slow-2g" | "3" | "4")
}
