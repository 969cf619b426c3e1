use super::*;

/// Read and write access to a loaded document, as the form behaviors see it.
///
/// Behaviors only talk to the document through this trait, so focus position
/// and layout are always read live at dispatch time rather than cached.
pub trait DocumentAccess {
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First element matching `selector` in document order.
    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>>;

    /// All elements matching `selector` in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>>;

    /// Elements whose `name` attribute equals `name`, in document order.
    fn elements_by_name(&self, name: &str) -> Vec<NodeId>;

    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    fn active_element(&self) -> Option<NodeId>;

    /// Moves focus; returns false when the node cannot take focus.
    fn focus(&mut self, node: NodeId) -> bool;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn is_checked(&self, node: NodeId) -> Result<bool>;

    fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<()>;

    fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()>;

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()>;

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> Result<()>;

    fn scroll_metrics(&self, node: NodeId) -> Result<ScrollMetrics>;
}

impl DocumentAccess for Dom {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Dom::query_selector(self, selector)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        Dom::query_selector_all(self, selector)
    }

    fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        Dom::elements_by_name(self, name)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        Dom::contains(self, ancestor, node)
    }

    fn active_element(&self) -> Option<NodeId> {
        Dom::active_element(self)
    }

    fn focus(&mut self, node: NodeId) -> bool {
        Dom::focus(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.attr(node, name)
    }

    fn is_checked(&self, node: NodeId) -> Result<bool> {
        self.checked(node)
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<()> {
        Dom::set_checked(self, node, checked)
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        Dom::set_disabled(self, node, disabled)
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        Dom::set_text_content(self, node, text)
    }

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        Dom::set_style_property(self, node, name, value)
    }

    fn scroll_metrics(&self, node: NodeId) -> Result<ScrollMetrics> {
        Dom::scroll_metrics(self, node)
    }
}
