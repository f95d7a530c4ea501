//! PendingSet - 発見済み・未 dispatch の要素集合
//!
//! 要素ごとの「処理済み」フラグはホスト要素に書き込まず、
//! identity をキーにした `seen` テーブルとしてローダー側が所有します。

use std::collections::HashSet;
use std::hash::Hash;

/// Ordered set of discovered elements that have not been dispatched yet.
///
/// # Invariants
/// - An element is admitted at most once for the lifetime of the set
///   (`seen` is never cleared).
/// - An element leaves `order` exactly once, through [`PendingSet::take`].
#[derive(Debug, Clone)]
pub struct PendingSet<E> {
    order: Vec<E>,
    seen: HashSet<E>,
}

impl<E: Clone + Eq + Hash> PendingSet<E> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Admit a newly discovered element. Returns `false` if it was seen before,
    /// whether it is still pending or already dispatched.
    pub fn admit(&mut self, element: E) -> bool {
        if !self.seen.insert(element.clone()) {
            return false;
        }
        self.order.push(element);
        true
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.order.get(index)
    }

    /// Remove the element at `index` for dispatch. It stays in the seen table.
    pub fn take(&mut self, index: usize) -> E {
        self.order.remove(index)
    }

    pub fn has_seen(&self, element: &E) -> bool {
        self.seen.contains(element)
    }

    #[cfg(test)]
    pub fn is_pending(&self, element: &E) -> bool {
        self.order.contains(element)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.order.iter()
    }
}

impl<E: Clone + Eq + Hash> Default for PendingSet<E> {
    fn default() -> Self {
        Self::new()
    }
}
