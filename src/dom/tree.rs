use super::*;

impl Dom {
    /// Parent, grandparent and so on up to the document node.
    pub(crate) fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node_id), |node| self.parent(*node))
    }

    /// Inclusive descendant check, like `Node.contains`.
    pub(crate) fn contains(&self, ancestor: NodeId, node_id: NodeId) -> bool {
        node_id == ancestor || self.ancestors(node_id).any(|node| node == ancestor)
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Every element in document order.
    pub(crate) fn elements_in_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending = vec![self.root];
        while let Some(node) = pending.pop() {
            if self.element(node).is_some() {
                out.push(node);
            }
            pending.extend(self.nodes[node.0].children.iter().rev());
        }
        out
    }

    /// Elements whose `name` attribute equals `name`, in document order.
    pub(crate) fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.elements_in_order()
            .into_iter()
            .filter(|node| {
                self.element(*node)
                    .and_then(|element| element.attr("name"))
                    == Some(name)
            })
            .collect()
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        self.elements_in_order()
            .into_iter()
            .find(|node| self.tag_name(*node) == Some("body"))
    }

    /// Concatenated text of the subtree, like `Node.textContent`.
    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        let mut pending = vec![node_id];
        while let Some(node) = pending.pop() {
            match &self.nodes[node.0].data {
                NodeData::Text(text) => out.push_str(text),
                _ => pending.extend(self.nodes[node.0].children.iter().rev()),
            }
        }
        out
    }

    /// Replaces the children of an element with a single text node.
    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::DomOperation(
                "textContent target is not an element".into(),
            ));
        }
        for child in std::mem::take(&mut self.nodes[node_id.0].children) {
            self.nodes[child.0].parent = None;
        }
        self.append_text(node_id, value);
        Ok(())
    }

    /// Markup of the node and its subtree with attributes in name order.
    pub(crate) fn outer_html(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(node_id, &mut out);
        out
    }

    fn write_markup(&self, node_id: NodeId, out: &mut String) {
        let node = &self.nodes[node_id.0];
        let element = match &node.data {
            NodeData::Text(text) => {
                out.push_str(text);
                return;
            }
            NodeData::Document => None,
            NodeData::Element(element) => Some(element),
        };

        if let Some(element) = element {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push_str(&format!(" {name}=\"{value}\""));
            }
            out.push('>');
            if crate::html::is_void_element(&element.tag) {
                return;
            }
        }
        for child in &node.children {
            self.write_markup(*child, out);
        }
        if let Some(element) = element {
            out.push_str(&format!("</{}>", element.tag));
        }
    }
}
