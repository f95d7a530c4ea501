//! InMemoryPage - テスト・CLI 用のシミュレートされたページ
//!
//! # 実装詳細
//! - `Rc<RefCell<PageState>>` で状態を共有（clone したハンドルは同じページを指す）
//! - ノードは挿入順 = ドキュメント順。`NodeId(0)` は `<body>`
//! - attach/detach されたリスナーを記録するので、テストから観測できる

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionInfo, LayoutWidths, Marker, Trigger};
use crate::ports::{Document, NetworkInformation, ReadyState, Window};

/// Handle of a node in an [`InMemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const BODY: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    html_id: Option<String>,
    class: String,
    offset_top: f64,
    parent: Option<NodeId>,
}

#[derive(Debug)]
struct PageState {
    nodes: Vec<Node>,
    root_class: String,
    ready_state: ReadyState,
    viewport_height: f64,
    scroll_top: f64,
    orientation: Option<i32>,
    layout_widths: LayoutWidths,
    screen_width: Option<f64>,
    device_pixel_ratio: Option<f64>,
    connection: Option<ConnectionInfo>,
    attached: BTreeSet<Trigger>,
    attach_calls: usize,
    detach_calls: usize,
    released: Vec<NodeId>,
}

impl PageState {
    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes[node.index()].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent.index()].parent;
        }
        false
    }
}

#[derive(Clone)]
pub struct InMemoryPage {
    state: Rc<RefCell<PageState>>,
}

impl InMemoryPage {
    /// An interactive (structurally ready) page with an empty body, scrolled to the top.
    pub fn new(viewport_height: f64) -> Self {
        let body = Node {
            html_id: None,
            class: String::new(),
            offset_top: 0.0,
            parent: None,
        };
        Self {
            state: Rc::new(RefCell::new(PageState {
                nodes: vec![body],
                root_class: String::new(),
                ready_state: ReadyState::Interactive,
                viewport_height,
                scroll_top: 0.0,
                orientation: None,
                layout_widths: LayoutWidths::default(),
                screen_width: None,
                device_pixel_ratio: None,
                connection: None,
                attached: BTreeSet::new(),
                attach_calls: 0,
                detach_calls: 0,
                released: Vec::new(),
            })),
        }
    }

    /// Append an element under the body.
    pub fn add(&self, class: &str, offset_top: f64) -> NodeId {
        self.add_child(NodeId::BODY, class, offset_top)
    }

    /// Append an element under `parent`.
    pub fn add_child(&self, parent: NodeId, class: &str, offset_top: f64) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len() as u32);
        state.nodes.push(Node {
            html_id: None,
            class: class.to_string(),
            offset_top,
            parent: Some(parent),
        });
        id
    }

    pub fn set_html_id(&self, node: NodeId, html_id: &str) {
        self.state.borrow_mut().nodes[node.index()].html_id = Some(html_id.to_string());
    }

    pub fn set_class(&self, node: NodeId, class: &str) {
        self.state.borrow_mut().nodes[node.index()].class = class.to_string();
    }

    pub fn class_of(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.index()].class.clone()
    }

    pub fn set_offset_top(&self, node: NodeId, offset_top: f64) {
        self.state.borrow_mut().nodes[node.index()].offset_top = offset_top;
    }

    pub fn scroll_to(&self, scroll_top: f64) {
        self.state.borrow_mut().scroll_top = scroll_top;
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.state.borrow_mut().viewport_height = height;
    }

    pub fn set_orientation(&self, orientation: Option<i32>) {
        self.state.borrow_mut().orientation = orientation;
    }

    pub fn set_connection(&self, connection: Option<ConnectionInfo>) {
        self.state.borrow_mut().connection = connection;
    }

    pub fn set_layout_widths(&self, widths: LayoutWidths) {
        self.state.borrow_mut().layout_widths = widths;
    }

    pub fn set_screen(&self, width: Option<f64>, device_pixel_ratio: Option<f64>) {
        let mut state = self.state.borrow_mut();
        state.screen_width = width;
        state.device_pixel_ratio = device_pixel_ratio;
    }

    pub fn set_ready_state(&self, ready_state: ReadyState) {
        self.state.borrow_mut().ready_state = ready_state;
    }

    pub fn attached(&self) -> BTreeSet<Trigger> {
        self.state.borrow().attached.clone()
    }

    pub fn is_attached(&self, trigger: Trigger) -> bool {
        self.state.borrow().attached.contains(&trigger)
    }

    /// Elements the loader released, in order.
    pub fn released(&self) -> Vec<NodeId> {
        self.state.borrow().released.clone()
    }

    /// `(attach, detach)` calls received so far.
    pub fn listener_calls(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.attach_calls, state.detach_calls)
    }
}

impl fmt::Debug for InMemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("InMemoryPage")
            .field("nodes", &state.nodes.len())
            .field("scroll_top", &state.scroll_top)
            .field("viewport_height", &state.viewport_height)
            .field("attached", &state.attached)
            .finish()
    }
}

impl Document for InMemoryPage {
    type Element = NodeId;

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready_state
    }

    fn body(&self) -> Option<NodeId> {
        Some(NodeId::BODY)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.html_id.as_deref() == Some(id))
            .map(|index| NodeId(index as u32))
    }

    fn query_marked(&self, scope: &NodeId, marker: &Marker) -> Vec<NodeId> {
        let state = self.state.borrow();
        (0..state.nodes.len())
            .map(|index| NodeId(index as u32))
            .filter(|node| marker.matches(&state.nodes[node.index()].class))
            .filter(|node| state.is_descendant(*node, *scope))
            .collect()
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.state.borrow().nodes[element.index()].offset_top
    }

    fn root_class_name(&self) -> String {
        self.state.borrow().root_class.clone()
    }

    fn set_root_class_name(&self, value: &str) {
        self.state.borrow_mut().root_class = value.to_string();
    }

    fn release(&self, element: &NodeId) {
        self.state.borrow_mut().released.push(*element);
    }
}

impl Window for InMemoryPage {
    fn viewport_height(&self) -> f64 {
        self.state.borrow().viewport_height
    }

    fn scroll_top(&self) -> f64 {
        self.state.borrow().scroll_top
    }

    fn orientation(&self) -> Option<i32> {
        self.state.borrow().orientation
    }

    fn layout_widths(&self) -> LayoutWidths {
        self.state.borrow().layout_widths
    }

    fn screen_width(&self) -> Option<f64> {
        self.state.borrow().screen_width
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.state.borrow().device_pixel_ratio
    }

    fn attach(&self, trigger: Trigger) {
        let mut state = self.state.borrow_mut();
        state.attach_calls += 1;
        state.attached.insert(trigger);
    }

    fn detach(&self, trigger: Trigger) {
        let mut state = self.state.borrow_mut();
        state.detach_calls += 1;
        state.attached.remove(&trigger);
    }
}

impl NetworkInformation for InMemoryPage {
    fn connection(&self) -> Option<ConnectionInfo> {
        self.state.borrow().connection.clone()
    }
}
