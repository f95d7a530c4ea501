//! Scenario file: a simulated page plus the steps to replay against it.

use std::collections::HashMap;

use anyhow::{Context, bail};
use serde::Deserialize;

use foldwatch_core::domain::{ConnectionInfo, LayoutWidths, LoaderConfig};
use foldwatch_core::impls::{InMemoryPage, NodeId};
use foldwatch_core::ports::{Document, ReadyState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub options: LoaderConfig,
    #[serde(default)]
    pub page: PageSpec,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSpec {
    pub viewport_height: f64,
    pub scroll_top: f64,
    pub orientation: Option<i32>,
    pub connection: Option<ConnectionInfo>,
    pub widths: LayoutWidths,
    pub screen_width: Option<f64>,
    pub device_pixel_ratio: Option<f64>,
    pub ready_state: ReadyState,
    pub root_class: String,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            scroll_top: 0.0,
            orientation: None,
            connection: None,
            widths: LayoutWidths::default(),
            screen_width: None,
            device_pixel_ratio: None,
            ready_state: ReadyState::Interactive,
            root_class: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    /// Label used in the output and as `parent` reference.
    pub label: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub top: f64,
    /// `id` attribute, for the `root` option.
    #[serde(default)]
    pub html_id: Option<String>,
    /// Label of the parent element; the body when absent.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Scroll(f64),
    Resize(f64),
    Orientation(i32),
    AdvanceMs(i64),
    Insert(ElementSpec),
    RequestLoad,
    DomContentLoaded,
    Load,
    Tick,
}

/// The simulated page with its label table.
pub struct Stage {
    pub page: InMemoryPage,
    labels: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
}

impl Stage {
    pub fn build(spec: &PageSpec, elements: &[ElementSpec]) -> anyhow::Result<Self> {
        let page = InMemoryPage::new(spec.viewport_height);
        page.scroll_to(spec.scroll_top);
        page.set_orientation(spec.orientation);
        page.set_connection(spec.connection.clone());
        page.set_layout_widths(spec.widths);
        page.set_screen(spec.screen_width, spec.device_pixel_ratio);
        page.set_ready_state(spec.ready_state);
        page.set_root_class_name(&spec.root_class);

        let mut stage = Self {
            page,
            labels: HashMap::new(),
            names: HashMap::new(),
        };
        for element in elements {
            stage.insert(element)?;
        }
        Ok(stage)
    }

    pub fn insert(&mut self, spec: &ElementSpec) -> anyhow::Result<NodeId> {
        if self.labels.contains_key(&spec.label) {
            bail!("duplicate element label `{}`", spec.label);
        }
        let node = match &spec.parent {
            Some(parent) => {
                let parent = *self
                    .labels
                    .get(parent)
                    .with_context(|| format!("unknown parent `{parent}` for `{}`", spec.label))?;
                self.page.add_child(parent, &spec.class, spec.top)
            }
            None => self.page.add(&spec.class, spec.top),
        };
        if let Some(html_id) = &spec.html_id {
            self.page.set_html_id(node, html_id);
        }
        self.labels.insert(spec.label.clone(), node);
        self.names.insert(node, spec.label.clone());
        Ok(node)
    }

    pub fn label(&self, node: NodeId) -> String {
        self.names
            .get(&node)
            .cloned()
            .unwrap_or_else(|| node.to_string())
    }
}
