//! Status - ローダーの状態スナップショット
//!
//! CLI や診断用に JSON で出せる形にまとめます。

use serde::Serialize;

use crate::domain::LoaderId;

/// Lifecycle phase of a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Waiting for the document to become structurally ready.
    Constructed,
    /// Scope resolved; the initial scan waits for the window `load` event.
    AwaitingLoad,
    /// Scope resolved and the initial scan requested.
    Ready,
}

/// What a single scan pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Elements newly admitted to the pending set.
    pub discovered: usize,
    pub dispatched: usize,
    /// Pending elements left after the pass.
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderStatus {
    pub id: LoaderId,
    pub phase: Phase,
    pub marker: String,
    pub pending: usize,
    /// Elements ever admitted (pending + dispatched).
    pub seen: usize,
    pub dispatched: u64,
    pub scans: u64,
    pub listening: bool,
    pub scan_requested: bool,
    /// Scan requests folded into an already queued one.
    pub coalesced_requests: u64,
    pub low_bandwidth: bool,
    pub viewport_width: Option<f64>,
}
