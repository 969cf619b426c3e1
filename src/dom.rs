use super::*;

mod focus;
mod form_state;
mod layout;
mod query;
mod tree;

/// Handle to a node of a loaded page.
///
/// Handles are only meaningful for the page that produced them and are
/// invalidated when the page reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

/// An element with the form state the behaviors read and write.
///
/// Attributes are kept sorted by name so serialization is stable.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    pub(crate) scroll: ScrollMetrics,
}

impl Element {
    fn new(tag: String, attrs: BTreeMap<String, String>) -> Self {
        Self {
            checked: attrs.contains_key("checked"),
            disabled: attrs.contains_key("disabled"),
            tag,
            attrs,
            scroll: ScrollMetrics::default(),
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub(crate) fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
    }

    pub(crate) fn is_checkbox(&self) -> bool {
        self.tag == "input"
            && self
                .attr("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
    }
}

/// Layout measurements of a scroll container, in CSS pixels.
///
/// Browsers report these as whole or fractional pixels, so every field is a
/// float and comparisons are threshold based.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_height,
            client_height,
        }
    }

    /// Content taller than the visible box.
    pub fn is_scrollable(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// `scroll_top + client_height >= scroll_height`.
    pub fn is_scrolled_to_end(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height
    }

    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    pub(crate) fn clamp_scroll_top(&self, top: f64) -> f64 {
        if top.is_nan() {
            return 0.0;
        }
        top.clamp(0.0, self.max_scroll_top())
    }
}

/// Arena of nodes rooted at a document node, plus the focus pointer.
#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    /// First element in document order for each `id` value.
    pub(crate) ids: HashMap<String, NodeId>,
    pub(crate) active_element: Option<NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            root: NodeId(0),
            ids: HashMap::new(),
            active_element: None,
        }
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends as the last child of `parent`. Nodes are only ever appended
    /// while parsing, so arena order is document order and the first `id`
    /// registered wins.
    pub(crate) fn append_element(
        &mut self,
        parent: NodeId,
        tag: String,
        attrs: BTreeMap<String, String>,
    ) -> NodeId {
        let id_attr = attrs.get("id").cloned();
        let node = self.append(parent, NodeData::Element(Element::new(tag, attrs)));
        if let Some(id_attr) = id_attr {
            self.ids.entry(id_attr).or_insert(node);
        }
        node
    }

    /// Adjacent text merges into one node, as a browser's parser produces.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.0].children.last() {
            if let NodeData::Text(existing) = &mut self.nodes[last.0].data {
                existing.push_str(text);
                return;
            }
        }
        self.append(parent, NodeData::Text(text.to_string()));
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn is_checkbox_input(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(Element::is_checkbox)
    }
}
