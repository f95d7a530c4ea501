//! TaskQueue - 1 スロットの scan 要求キュー
//!
//! `load_images` は同期的に scan せず、ここに要求を置くだけです。ホストの
//! スケジューラが次のターンで `take` して実行します。スロットが埋まっている間の
//! 要求は 1 つにまとめられ、`force` は OR されます。

/// A queued scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    /// Re-query the scope root for marked elements even if some are still pending.
    pub force: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    slot: Option<ScanRequest>,
    coalesced: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a scan request. Returns `false` when it was folded into the one already queued.
    pub fn post(&mut self, force: bool) -> bool {
        match &mut self.slot {
            Some(request) => {
                request.force |= force;
                self.coalesced += 1;
                false
            }
            None => {
                self.slot = Some(ScanRequest { force });
                true
            }
        }
    }

    pub fn take(&mut self) -> Option<ScanRequest> {
        self.slot.take()
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<ScanRequest> {
        self.slot
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Requests folded into an already queued one so far.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
