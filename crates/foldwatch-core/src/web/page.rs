//! WebPage - `web-sys` による ports の実装
//!
//! # 実装詳細
//! - 要素の同一性はページごとの identity table の添字。ノード → 添字は `WeakMap` で
//!   引く（O(1)、ノードに書き込まない、DOM から外れたノードを引き留めない）
//! - dispatch 済みの要素はローダーが `release` するので、テーブルのスロットを空ける
//! - `navigator.connection` / `window.orientation` は型付き API がないので `Reflect` で読む
//! - attach/detach するリスナー関数は `mount` が登録する（未登録なら何もしない）

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Reflect, WeakMap};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::domain::{ConnectionInfo, LayoutWidths, Marker, Trigger};
use crate::ports::{Document, NetworkInformation, ReadyState, Window};

const CONNECTION_PROPERTIES: [&str; 3] = ["connection", "mozConnection", "webkitConnection"];

/// Handle of a host element: an index into the page's identity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebElement(usize);

#[derive(Clone)]
pub struct WebPage {
    window: web_sys::Window,
    document: web_sys::Document,
    slots: Rc<RefCell<Vec<Option<Element>>>>,
    indices: WeakMap,
    listeners: Rc<RefCell<HashMap<Trigger, Function>>>,
}

impl WebPage {
    /// The page of the global `window`; `None` outside a browser.
    pub fn from_global() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            slots: Rc::new(RefCell::new(Vec::new())),
            indices: WeakMap::new(),
            listeners: Rc::new(RefCell::new(HashMap::new())),
        })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// Resolve a handle back to the host element; `None` once released.
    pub fn element(&self, handle: &WebElement) -> Option<Element> {
        self.slots.borrow().get(handle.0).cloned().flatten()
    }

    /// Handles still holding their element.
    pub fn retained(&self) -> usize {
        self.slots.borrow().iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn register_listener(&self, trigger: Trigger, listener: Function) {
        self.listeners.borrow_mut().insert(trigger, listener);
    }

    fn intern(&self, element: Element) -> WebElement {
        if let Some(index) = self.indices.get(&element).as_f64() {
            return WebElement(index as usize);
        }
        let mut slots = self.slots.borrow_mut();
        let index = slots.len();
        self.indices.set(&element, &JsValue::from_f64(index as f64));
        slots.push(Some(element));
        WebElement(index)
    }

    fn root_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn property(target: &JsValue, name: &str) -> Option<JsValue> {
        Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }
}

impl std::fmt::Debug for WebPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPage")
            .field("handles", &self.slots.borrow().len())
            .field("retained", &self.retained())
            .finish_non_exhaustive()
    }
}

impl Document for WebPage {
    type Element = WebElement;

    fn ready_state(&self) -> ReadyState {
        let state = Self::property(&self.document, "readyState").and_then(|v| v.as_string());
        match state.as_deref() {
            Some("complete") => ReadyState::Complete,
            Some("interactive") => ReadyState::Interactive,
            _ => ReadyState::Loading,
        }
    }

    fn body(&self) -> Option<WebElement> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.intern(element))
    }

    fn query_marked(&self, scope: &WebElement, marker: &Marker) -> Vec<WebElement> {
        let Some(scope) = self.element(scope) else {
            return Vec::new();
        };
        let collection = scope.get_elements_by_class_name(marker.as_str());
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .map(|element| self.intern(element))
            .collect()
    }

    fn offset_top(&self, element: &WebElement) -> f64 {
        match self.element(element) {
            Some(element) => element.get_bounding_client_rect().top() + self.scroll_top(),
            None => f64::INFINITY,
        }
    }

    fn root_class_name(&self) -> String {
        self.root_element()
            .map(|root| root.class_name())
            .unwrap_or_default()
    }

    fn set_root_class_name(&self, value: &str) {
        if let Some(root) = self.root_element() {
            root.set_class_name(value);
        }
    }

    fn release(&self, element: &WebElement) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(element.0) {
            *slot = None;
        }
    }
}

impl Window for WebPage {
    fn viewport_height(&self) -> f64 {
        self.root_element()
            .map(|root| f64::from(root.client_height()))
            .unwrap_or(0.0)
    }

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn orientation(&self) -> Option<i32> {
        Self::property(&self.window, "orientation")
            .and_then(|v| v.as_f64())
            .map(|degrees| degrees as i32)
    }

    fn layout_widths(&self) -> LayoutWidths {
        let root = self.root_element();
        LayoutWidths {
            document_client: root.as_ref().map(|r| f64::from(r.client_width())),
            document_offset: root
                .and_then(|r| r.dyn_into::<HtmlElement>().ok())
                .map(|r| f64::from(r.offset_width())),
            body_client: self.document.body().map(|b| f64::from(b.client_width())),
        }
    }

    fn screen_width(&self) -> Option<f64> {
        let screen = self.window.screen().ok()?;
        screen.width().ok().map(f64::from)
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        Some(self.window.device_pixel_ratio())
    }

    fn attach(&self, trigger: Trigger) {
        if let Some(listener) = self.listeners.borrow().get(&trigger) {
            if let Err(err) = self
                .window
                .add_event_listener_with_callback(trigger.event_name(), listener)
            {
                log::warn!("failed to attach {} listener: {err:?}", trigger.event_name());
            }
        }
    }

    fn detach(&self, trigger: Trigger) {
        if let Some(listener) = self.listeners.borrow().get(&trigger) {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(trigger.event_name(), listener)
            {
                log::warn!("failed to detach {} listener: {err:?}", trigger.event_name());
            }
        }
    }
}

impl NetworkInformation for WebPage {
    fn connection(&self) -> Option<ConnectionInfo> {
        let navigator: JsValue = self.window.navigator().into();
        let connection = CONNECTION_PROPERTIES
            .iter()
            .find_map(|name| Self::property(&navigator, name))?;
        Some(ConnectionInfo {
            kind: Self::property(&connection, "type").and_then(|v| v.as_string()),
            bandwidth: Self::property(&connection, "bandwidth").and_then(|v| v.as_f64()),
        })
    }
}
