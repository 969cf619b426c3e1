use super::*;

/// Mirrors the "toggle all" control onto the consent checkbox group and keeps
/// the checked counter in step with the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxSync {
    toggle_all_id: String,
    group_name: String,
    counter_id: String,
}

impl CheckboxSync {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            toggle_all_id: config.toggle_all_id.clone(),
            group_name: config.checkbox_group_name.clone(),
            counter_id: config.checked_count_id.clone(),
        }
    }

    pub fn toggle_all<D: DocumentAccess + ?Sized>(&self, doc: &D) -> Option<NodeId> {
        doc.element_by_id(&self.toggle_all_id)
    }

    /// Group members, resolved live by name.
    pub fn members<D: DocumentAccess + ?Sized>(&self, doc: &D) -> Vec<NodeId> {
        doc.elements_by_name(&self.group_name)
    }

    pub fn checked_count<D: DocumentAccess + ?Sized>(&self, doc: &D) -> Result<usize> {
        let mut count = 0;
        for member in self.members(doc) {
            if doc.is_checked(member)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Sets every member to the toggle's state, then refreshes the counter.
    /// Members change silently: no `change` event fires for them.
    pub fn on_toggle_all_changed<D: DocumentAccess + ?Sized>(&self, doc: &mut D) -> Result<usize> {
        if let Some(toggle) = self.toggle_all(doc) {
            let checked = doc.is_checked(toggle)?;
            for member in self.members(doc) {
                doc.set_checked(member, checked)?;
            }
        }
        self.refresh_counter(doc)
    }

    pub fn on_member_changed<D: DocumentAccess + ?Sized>(&self, doc: &mut D) -> Result<usize> {
        self.refresh_counter(doc)
    }

    fn refresh_counter<D: DocumentAccess + ?Sized>(&self, doc: &mut D) -> Result<usize> {
        let count = self.checked_count(doc)?;
        if let Some(counter) = doc.element_by_id(&self.counter_id) {
            doc.set_text_content(counter, &count.to_string())?;
        }
        Ok(count)
    }
}
