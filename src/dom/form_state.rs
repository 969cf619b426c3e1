use super::*;

impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::DomOperation("checked target is not an element".into()))?;
        Ok(element.checked)
    }

    /// Sets the checkedness of a control without touching the `checked`
    /// content attribute, like assigning `input.checked`.
    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::DomOperation("checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.disabled).unwrap_or(false)
    }

    /// Flips the disabled flag and keeps the `disabled` content attribute in
    /// step, so serialized markup shows the current state.
    pub(crate) fn set_disabled(&mut self, node_id: NodeId, disabled: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::DomOperation("disabled target is not an element".into()))?;
        element.disabled = disabled;
        if disabled {
            element.attrs.insert("disabled".into(), String::new());
        } else {
            element.attrs.remove("disabled");
        }
        Ok(())
    }

    /// Disabled itself, or inside a disabled `<fieldset>`.
    pub(crate) fn is_effectively_disabled(&self, node_id: NodeId) -> bool {
        self.disabled(node_id)
            || self
                .ancestors(node_id)
                .any(|node| self.tag_name(node) == Some("fieldset") && self.disabled(node))
    }
}
