//! Document port - ホストページの DOM
//!
//! 要素の検索（marker による）、位置の計測、ready state を提供します。
//! 要素そのものは不透明なハンドルで、ローダーは identity（`Eq + Hash`）しか使いません。

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::domain::Marker;

/// `document.readyState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Past `Loading`: the document is structurally ready.
    pub fn is_structurally_ready(self) -> bool {
        self != ReadyState::Loading
    }
}

pub trait Document {
    /// Host element handle. Equality is node identity.
    type Element: Clone + Eq + Hash + fmt::Debug;

    fn ready_state(&self) -> ReadyState;

    fn body(&self) -> Option<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Descendants of `scope` carrying `marker`, in document order.
    fn query_marked(&self, scope: &Self::Element, marker: &Marker) -> Vec<Self::Element>;

    /// Top edge of `element` relative to the document, in CSS pixels.
    fn offset_top(&self, element: &Self::Element) -> f64;

    /// `class` attribute of the document root (`<html>`) element.
    fn root_class_name(&self) -> String;

    fn set_root_class_name(&self, value: &str);

    /// The loader is done with `element` (it has been dispatched). Hosts that
    /// keep per-element state may drop it; the handle must keep its identity.
    fn release(&self, _element: &Self::Element) {}
}
