use super::*;

/// A key press as `KeyboardEvent` exposes it: the `key` value plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    pub fn tab() -> Self {
        Self::new("Tab")
    }

    pub fn shift_tab() -> Self {
        Self::tab().with_shift()
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub(crate) fn is_tab(&self) -> bool {
        self.key == "Tab"
    }

    pub(crate) fn is_backward_tab(&self) -> bool {
        self.is_tab() && self.shift
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) key: Option<KeyInput>,
    pub(crate) default_prevented: bool,
    pub(crate) bubbles: bool,
    pub(crate) cancelable: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: None,
            default_prevented: false,
            // scroll does not bubble on elements
            bubbles: event_type != "scroll",
            cancelable: true,
        }
    }

    pub(crate) fn keydown(target: NodeId, key: KeyInput) -> Self {
        let mut event = Self::new("keydown", target);
        event.key = Some(key);
        event
    }

    pub(crate) fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }
}

/// What a registered listener runs. Each variant is one form behavior entry
/// point; the page owns the behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    ToggleAllChanged,
    GroupMemberChanged,
    RouteKeydown,
    ScrollGateScrolled,
    LanguageSelected,
}

impl Handler {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::ToggleAllChanged => "toggle-all",
            Self::GroupMemberChanged => "group-member",
            Self::RouteKeydown => "focus-router",
            Self::ScrollGateScrolled => "scroll-gate",
            Self::LanguageSelected => "language-switcher",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    pub(crate) map: HashMap<NodeId, HashMap<String, Vec<Handler>>>,
}

impl ListenerStore {
    /// Registering the same handler twice for a node and type is a no-op,
    /// like `addEventListener` with the same callback reference.
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, handler: Handler) {
        let listeners = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default();
        if !listeners.contains(&handler) {
            listeners.push(handler);
        }
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Handler> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.map
            .values()
            .filter_map(|events| events.get(event))
            .map(Vec::len)
            .sum()
    }
}
