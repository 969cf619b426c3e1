use super::*;

/// Where keyboard focus sits relative to the consent table, read from the
/// live active element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Outside,
    InsideTable,
    AtSentinel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The key does not apply to where focus is.
    Ignored,
    /// Escape inside the table moved focus to the sentinel.
    ExitedRegion,
    /// Shift+Tab on the sentinel moved focus back to the re-entry target.
    ReturnedToStart,
    /// Escape inside the table, but there is no sentinel to go to.
    SentinelMissing,
    /// Shift+Tab on the sentinel, but the re-entry target is gone.
    ReentryTargetMissing,
    /// The sentinel exists but cannot take focus.
    SentinelUnfocusable,
    /// The re-entry target exists but cannot take focus.
    ReentryTargetUnfocusable,
}

impl RouteOutcome {
    /// Shift+Tab on the sentinel always replaces the browser's own focus move,
    /// even when the re-entry target cannot be focused.
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::ReturnedToStart | Self::ReentryTargetMissing | Self::ReentryTargetUnfocusable
        )
    }
}

/// Keyboard loop around the scrollable consent table: Escape leaves the table
/// for the sentinel, Shift+Tab on the sentinel re-enters at the toggle-all
/// control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRouter {
    region_selector: String,
    sentinel_id: String,
    reentry_target_id: String,
    escape_key: String,
}

impl FocusRouter {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            region_selector: config.scroll_region_selector.clone(),
            sentinel_id: config.sentinel_id.clone(),
            reentry_target_id: config.reentry_target_id.clone(),
            escape_key: config.escape_key.clone(),
        }
    }

    fn inside_region<D: DocumentAccess + ?Sized>(
        &self,
        doc: &D,
        active: Option<NodeId>,
    ) -> Result<bool> {
        let Some(active) = active else {
            return Ok(false);
        };
        let Some(region) = doc.query_selector(&self.region_selector)? else {
            return Ok(false);
        };
        Ok(doc.contains(region, active))
    }

    fn at_sentinel<D: DocumentAccess + ?Sized>(&self, doc: &D, active: Option<NodeId>) -> bool {
        active
            .and_then(|node| doc.attribute(node, "id"))
            .is_some_and(|id| id == self.sentinel_id)
    }

    pub fn state<D: DocumentAccess + ?Sized>(&self, doc: &D) -> Result<FocusState> {
        let active = doc.active_element();
        if self.at_sentinel(doc, active) {
            return Ok(FocusState::AtSentinel);
        }
        if self.inside_region(doc, active)? {
            return Ok(FocusState::InsideTable);
        }
        Ok(FocusState::Outside)
    }

    /// Routes one keydown. Both rules look at the element that was focused
    /// when the key went down.
    pub fn on_keydown<D: DocumentAccess + ?Sized>(
        &self,
        doc: &mut D,
        key: &KeyInput,
    ) -> Result<RouteOutcome> {
        let active = doc.active_element();

        if key.key == self.escape_key && self.inside_region(doc, active)? {
            let Some(sentinel) = doc.element_by_id(&self.sentinel_id) else {
                return Ok(RouteOutcome::SentinelMissing);
            };
            if Some(sentinel) == active {
                return Ok(RouteOutcome::Ignored);
            }
            return Ok(if doc.focus(sentinel) {
                RouteOutcome::ExitedRegion
            } else {
                RouteOutcome::SentinelUnfocusable
            });
        }

        if key.is_backward_tab() && self.at_sentinel(doc, active) {
            let Some(target) = doc.element_by_id(&self.reentry_target_id) else {
                return Ok(RouteOutcome::ReentryTargetMissing);
            };
            return Ok(if doc.focus(target) {
                RouteOutcome::ReturnedToStart
            } else {
                RouteOutcome::ReentryTargetUnfocusable
            });
        }

        Ok(RouteOutcome::Ignored)
    }
}
