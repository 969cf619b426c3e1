use super::*;

use std::fmt;

/// Declarations of an inline `style` attribute, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InlineStyle(Vec<(String, String)>);

impl InlineStyle {
    /// Lenient parse: malformed declarations are dropped and a repeated
    /// property keeps its last value at its first position.
    pub(crate) fn parse(attr: &str) -> Self {
        let mut style = Self::default();
        for (name, value) in attr.split(';').filter_map(|decl| decl.split_once(':')) {
            let name = name.trim();
            if !name.is_empty() {
                style.set(name, value.trim());
            }
        }
        style
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// An empty value removes the property, like `style.setProperty`.
    pub(crate) fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let position = self.0.iter().position(|(existing, _)| *existing == name);
        match (position, value.is_empty()) {
            (Some(index), true) => {
                self.0.remove(index);
            }
            (Some(index), false) => self.0[index].1 = value.to_string(),
            (None, false) => self.0.push((name, value.to_string())),
            (None, true) => {}
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

impl Dom {
    pub(crate) fn inline_style(&self, node_id: NodeId) -> InlineStyle {
        self.element(node_id)
            .and_then(|element| element.attr("style"))
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    /// Writes one property back into the `style` attribute. Removing the last
    /// property leaves `style=""` behind, as browsers do.
    pub(crate) fn set_style_property(
        &mut self,
        node_id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let mut style = self.inline_style(node_id);
        style.set(name, value);
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::DomOperation("style target is not an element".into()))?;
        element.attrs.insert("style".into(), style.to_string());
        Ok(())
    }

    /// Rendered unless the element or an ancestor is `hidden` or has inline
    /// `display: none`. Stylesheets are not evaluated.
    pub(crate) fn is_displayed(&self, node_id: NodeId) -> bool {
        std::iter::once(node_id)
            .chain(self.ancestors(node_id))
            .filter_map(|node| self.element(node))
            .all(|element| !hides_itself(element))
    }

    fn scroll_state_mut(&mut self, node_id: NodeId) -> Result<&mut ScrollMetrics> {
        self.element_mut(node_id)
            .map(|element| &mut element.scroll)
            .ok_or_else(|| Error::DomOperation("scroll target is not an element".into()))
    }

    pub(crate) fn scroll_metrics(&self, node_id: NodeId) -> Result<ScrollMetrics> {
        self.element(node_id)
            .map(|element| element.scroll)
            .ok_or_else(|| Error::DomOperation("scroll target is not an element".into()))
    }

    /// Mocks the layout extent. Negative sizes are treated as zero and the
    /// current position is re-clamped into the new range.
    pub(crate) fn set_scroll_extent(
        &mut self,
        node_id: NodeId,
        scroll_height: f64,
        client_height: f64,
    ) -> Result<()> {
        let scroll = self.scroll_state_mut(node_id)?;
        scroll.scroll_height = scroll_height.max(0.0);
        scroll.client_height = client_height.max(0.0);
        scroll.scroll_top = scroll.clamp_scroll_top(scroll.scroll_top);
        Ok(())
    }

    /// Returns the clamped position actually applied.
    pub(crate) fn set_scroll_top(&mut self, node_id: NodeId, top: f64) -> Result<f64> {
        let scroll = self.scroll_state_mut(node_id)?;
        scroll.scroll_top = scroll.clamp_scroll_top(top);
        Ok(scroll.scroll_top)
    }
}

fn hides_itself(element: &Element) -> bool {
    if element.attrs.contains_key("hidden") {
        return true;
    }
    element
        .attr("style")
        .map(InlineStyle::parse)
        .and_then(|style| style.get("display").map(|d| d.eq_ignore_ascii_case("none")))
        .unwrap_or(false)
}
