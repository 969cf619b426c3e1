use super::*;

impl Dom {
    pub(crate) fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    fn tab_index(&self, node_id: NodeId) -> Option<i64> {
        self.attr(node_id, "tabindex")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    fn is_natively_focusable(&self, node_id: NodeId) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        match element.tag.as_str() {
            "input" => !element
                .attrs
                .get("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")),
            "button" | "select" | "textarea" => true,
            "a" => element.attrs.contains_key("href"),
            _ => false,
        }
    }

    /// Whether `focus()` on this node would move focus to it.
    pub(crate) fn is_focusable(&self, node_id: NodeId) -> bool {
        if self.element(node_id).is_none() {
            return false;
        }
        if !self.is_natively_focusable(node_id) && self.tab_index(node_id).is_none() {
            return false;
        }
        if self.is_effectively_disabled(node_id) && self.is_natively_focusable(node_id) {
            return false;
        }
        self.is_displayed(node_id)
    }

    /// Moves focus to `node_id`. Returns false when the node cannot take focus.
    pub(crate) fn focus(&mut self, node_id: NodeId) -> bool {
        if !self.is_focusable(node_id) {
            return false;
        }
        self.active_element = Some(node_id);
        true
    }

    pub(crate) fn blur(&mut self, node_id: NodeId) -> bool {
        if self.active_element != Some(node_id) {
            return false;
        }
        self.active_element = None;
        true
    }

    /// Sequential focus navigation order: positive `tabindex` ascending, then
    /// `tabindex=0` and natively focusable elements in document order.
    pub(crate) fn tab_order(&self) -> Vec<NodeId> {
        let mut positive = Vec::new();
        let mut natural = Vec::new();
        for node in self.elements_in_order() {
            if !self.is_focusable(node) {
                continue;
            }
            match self.tab_index(node) {
                Some(index) if index < 0 => {}
                Some(index) if index > 0 => positive.push((index, node)),
                _ => natural.push(node),
            }
        }
        // Stable sort keeps document order among equal indices.
        positive.sort_by_key(|(index, _)| *index);
        positive
            .into_iter()
            .map(|(_, node)| node)
            .chain(natural)
            .collect()
    }

    /// Target of a Tab (or Shift+Tab when `backward`) from the current focus.
    /// `None` means focus leaves the document.
    pub(crate) fn next_in_tab_order(&self, backward: bool) -> Option<NodeId> {
        let order = self.tab_order();
        if order.is_empty() {
            return None;
        }
        let Some(active) = self.active_element else {
            return if backward {
                order.last().copied()
            } else {
                order.first().copied()
            };
        };
        if let Some(index) = order.iter().position(|node| *node == active) {
            return if backward {
                index.checked_sub(1).and_then(|prev| order.get(prev).copied())
            } else {
                order.get(index + 1).copied()
            };
        }

        // Focus sits on an element outside the sequence (e.g. tabindex=-1):
        // continue from its position in document order.
        let document_order = self.elements_in_order();
        let position = |node: NodeId| document_order.iter().position(|candidate| *candidate == node);
        let active_position = position(active)?;
        if backward {
            order
                .iter()
                .rev()
                .copied()
                .find(|node| position(*node).is_some_and(|pos| pos < active_position))
        } else {
            order
                .iter()
                .copied()
                .find(|node| position(*node).is_some_and(|pos| pos > active_position))
        }
    }
}
