use super::*;

impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        if let Some(id) = selector.as_id() {
            return Ok(self.by_id(id));
        }
        Ok(self
            .elements_in_order()
            .into_iter()
            .find(|node| selector.matches(self, *node)))
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        if let Some(id) = selector.as_id() {
            return Ok(self.by_id(id).into_iter().collect());
        }
        Ok(self
            .elements_in_order()
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect())
    }
}
