use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    Unchanged,
    Unlocked,
}

/// What the gate found when the document finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSetup {
    /// No region matched; the gate stays locked and watches nothing.
    RegionMissing,
    /// The region had nothing to scroll, so validation opened right away.
    UnlockedImmediately,
    /// The region scrolls; its `scroll` events must reach [`ScrollGate::on_scroll`].
    Observing(NodeId),
}

/// Keeps the validate button disabled until the consent table has been
/// scrolled to its end. Once unlocked it never locks again.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollGate {
    region_selector: String,
    button_id: String,
    alert_id: String,
    state: GateState,
    region: Option<NodeId>,
}

impl ScrollGate {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            region_selector: config.scroll_region_selector.clone(),
            button_id: config.validate_button_id.clone(),
            alert_id: config.validate_alert_id.clone(),
            state: GateState::Locked,
            region: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// The region captured by [`ScrollGate::on_ready`], if it is being observed.
    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    pub fn on_ready<D: DocumentAccess + ?Sized>(&mut self, doc: &mut D) -> Result<GateSetup> {
        let Some(region) = doc.query_selector(&self.region_selector)? else {
            return Ok(GateSetup::RegionMissing);
        };
        if !doc.scroll_metrics(region)?.is_scrollable() {
            self.unlock(doc)?;
            return Ok(GateSetup::UnlockedImmediately);
        }
        self.region = Some(region);
        Ok(GateSetup::Observing(region))
    }

    pub fn on_scroll<D: DocumentAccess + ?Sized>(&mut self, doc: &mut D) -> Result<GateTransition> {
        if self.state == GateState::Unlocked {
            return Ok(GateTransition::Unchanged);
        }
        let Some(region) = self.region else {
            return Ok(GateTransition::Unchanged);
        };
        // inequality, not equality: fractional zoom can overshoot the exact sum
        if !doc.scroll_metrics(region)?.is_scrolled_to_end() {
            return Ok(GateTransition::Unchanged);
        }
        self.unlock(doc)?;
        Ok(GateTransition::Unlocked)
    }

    fn unlock<D: DocumentAccess + ?Sized>(&mut self, doc: &mut D) -> Result<()> {
        self.state = GateState::Unlocked;
        if let Some(button) = doc.element_by_id(&self.button_id) {
            doc.set_disabled(button, false)?;
        }
        if let Some(alert) = doc.element_by_id(&self.alert_id) {
            doc.set_style_property(alert, "display", "none")?;
        }
        Ok(())
    }
}
