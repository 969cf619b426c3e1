use super::*;

/// `document.readyState` of a loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Interactive => "interactive",
            Self::Complete => "complete",
        }
    }
}

/// A consent form page: the parsed document, the bound behaviors and the
/// browser state that survives a reload (cookies, layout mocks, trace).
#[derive(Debug)]
pub struct ConsentPage {
    source: String,
    config: FormConfig,
    dom: Dom,
    listeners: ListenerStore,
    ready_state: ReadyState,
    checkbox_sync: CheckboxSync,
    focus_router: FocusRouter,
    scroll_gate: ScrollGate,
    language_switcher: LanguageSwitcher,
    cookies: CookieJar,
    scroll_extents: Vec<(String, f64, f64)>,
    reload_count: usize,
    reload_requested: bool,
    trace: TraceState,
}

impl ConsentPage {
    /// Parses `html` and binds the behaviors the form script binds while the
    /// document is still loading. Call [`ConsentPage::finish_loading`] to fire
    /// the ready events.
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_config(html, FormConfig::default())
    }

    pub fn parse_with_config(html: &str, config: FormConfig) -> Result<Self> {
        config.validate()?;
        let dom = html::parse_html(html)?;
        let mut page = Self {
            source: html.to_string(),
            checkbox_sync: CheckboxSync::new(&config),
            focus_router: FocusRouter::new(&config),
            scroll_gate: ScrollGate::new(&config),
            language_switcher: LanguageSwitcher::new(&config),
            config,
            dom,
            listeners: ListenerStore::default(),
            ready_state: ReadyState::Loading,
            cookies: CookieJar::default(),
            scroll_extents: Vec::new(),
            reload_count: 0,
            reload_requested: false,
            trace: TraceState::default(),
        };
        page.bind_loading_behaviors();
        Ok(page)
    }

    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, FormConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: FormConfig) -> Result<Self> {
        let mut page = Self::parse_with_config(html, config)?;
        page.finish_loading()?;
        Ok(page)
    }

    /// Moves the document to `interactive`, fires `DOMContentLoaded`, then
    /// moves to `complete`.
    pub fn finish_loading(&mut self) -> Result<()> {
        if self.ready_state != ReadyState::Loading {
            return Err(Error::Lifecycle(format!(
                "finish_loading called in readyState {}",
                self.ready_state.as_str()
            )));
        }

        self.set_ready_state(ReadyState::Interactive);
        let options = self.language_switcher.init(&self.dom)?;
        for option in &options {
            self.listeners.add(*option, "click", Handler::LanguageSelected);
        }
        self.trace.behavior_line(format!(
            "[language] bound {} language option(s)",
            options.len()
        ));

        self.trace
            .event_line("[event] DOMContentLoaded target=document".into());
        self.init_scroll_gate()?;

        self.set_ready_state(ReadyState::Complete);
        Ok(())
    }

    fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
        self.trace
            .line(format!("[lifecycle] readyState={}", state.as_str()));
    }

    fn bind_loading_behaviors(&mut self) {
        if let Some(toggle) = self.checkbox_sync.toggle_all(&self.dom) {
            self.listeners.add(toggle, "change", Handler::ToggleAllChanged);
        }
        let members = self.checkbox_sync.members(&self.dom);
        for member in &members {
            self.listeners
                .add(*member, "change", Handler::GroupMemberChanged);
        }
        self.trace.behavior_line(format!(
            "[checkbox] bound {} group member(s)",
            members.len()
        ));

        let root = self.dom.root;
        self.listeners.add(root, "keydown", Handler::RouteKeydown);
    }

    fn init_scroll_gate(&mut self) -> Result<()> {
        match self.scroll_gate.on_ready(&mut self.dom)? {
            GateSetup::RegionMissing => {
                self.trace
                    .behavior_line("[gate] no scroll region, gate stays locked".into());
            }
            GateSetup::UnlockedImmediately => {
                self.trace
                    .behavior_line("[gate] region fits without scrolling, unlocked".into());
            }
            GateSetup::Observing(region) => {
                self.listeners
                    .add(region, "scroll", Handler::ScrollGateScrolled);
                let metrics = self.dom.scroll_metrics(region)?;
                let region = self.describe(region);
                self.trace.behavior_line(format!(
                    "[gate] observing {region} scrollHeight={} clientHeight={}",
                    metrics.scroll_height,
                    metrics.client_height
                ));
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, mut event: EventState) -> Result<EventState> {
        let mut path = vec![event.target];
        if event.bubbles {
            let mut cursor = event.target;
            while let Some(parent) = self.dom.parent(cursor) {
                path.push(parent);
                cursor = parent;
            }
        }

        let target = self.describe(event.target);
        self.trace
            .event_line(format!("[event] {} target={target}", event.event_type));

        for node in path {
            event.current_target = node;
            for handler in self.listeners.get(node, &event.event_type) {
                self.run_handler(handler, &mut event)?;
            }
        }
        Ok(event)
    }

    fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        self.dispatch(EventState::new(event_type, target))
    }

    fn run_handler(&mut self, handler: Handler, event: &mut EventState) -> Result<()> {
        match handler {
            Handler::ToggleAllChanged => {
                let count = self.checkbox_sync.on_toggle_all_changed(&mut self.dom)?;
                self.trace.behavior_line(format!(
                    "[checkbox] {} mirrored, checked={count}",
                    handler.label()
                ));
            }
            Handler::GroupMemberChanged => {
                let count = self.checkbox_sync.on_member_changed(&mut self.dom)?;
                self.trace
                    .behavior_line(format!("[checkbox] recount checked={count}"));
            }
            Handler::RouteKeydown => {
                let Some(key) = event.key.clone() else {
                    return Ok(());
                };
                let outcome = self.focus_router.on_keydown(&mut self.dom, &key)?;
                if outcome.prevents_default() {
                    event.prevent_default();
                }
                if outcome != RouteOutcome::Ignored {
                    let active = self.active_description();
                    self.trace.behavior_line(format!(
                        "[focus] {} {outcome:?} active={active}",
                        describe_key(&key)
                    ));
                }
            }
            Handler::ScrollGateScrolled => {
                if self.scroll_gate.on_scroll(&mut self.dom)? == GateTransition::Unlocked {
                    let metrics = self.dom.scroll_metrics(event.current_target)?;
                    self.trace.behavior_line(format!(
                        "[gate] unlocked at scrollTop={}",
                        metrics.scroll_top
                    ));
                }
            }
            Handler::LanguageSelected => {
                match self
                    .language_switcher
                    .on_select(&self.dom, event.current_target)?
                {
                    Some(cookie) => {
                        self.trace
                            .behavior_line(format!("[language] document.cookie = {cookie}"));
                        self.cookies.set(cookie);
                        self.reload_requested = true;
                    }
                    None => {
                        let option = self.describe(event.current_target);
                        self.trace.behavior_line(format!(
                            "[language] ignored {option} without a usable lang"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_pending_reload(&mut self) -> Result<()> {
        if !std::mem::take(&mut self.reload_requested) {
            return Ok(());
        }
        self.reload()
    }

    /// `location.reload()`: parses the source again and reruns the whole
    /// lifecycle. Cookies, layout mocks, configuration and trace survive.
    pub fn reload(&mut self) -> Result<()> {
        self.reload_count += 1;
        self.trace
            .line(format!("[lifecycle] reload #{}", self.reload_count));

        self.dom = html::parse_html(&self.source)?;
        self.listeners = ListenerStore::default();
        self.ready_state = ReadyState::Loading;
        self.checkbox_sync = CheckboxSync::new(&self.config);
        self.focus_router = FocusRouter::new(&self.config);
        self.scroll_gate = ScrollGate::new(&self.config);
        self.language_switcher = LanguageSwitcher::new(&self.config);
        self.reload_requested = false;

        for (selector, scroll_height, client_height) in self.scroll_extents.clone() {
            if let Some(target) = self.dom.query_selector(&selector)? {
                self.dom
                    .set_scroll_extent(target, scroll_height, client_height)?;
            }
        }

        self.bind_loading_behaviors();
        self.finish_loading()
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.is_effectively_disabled(target) {
            return Ok(());
        }
        if !self.dom.is_checkbox_input(target) {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox]".into(),
                actual: self.describe_control(target),
            });
        }

        if self.dom.checked(target)? != checked {
            self.dom.set_checked(target, checked)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.is_effectively_disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(target, "click")?;
        if !outcome.default_prevented && self.dom.is_checkbox_input(target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }
        self.apply_pending_reload()
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.focus(target) {
            let target = self.describe(target);
            self.trace
                .event_line(format!("[event] focus target={target}"));
        }
        Ok(())
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.blur(target) {
            let target = self.describe(target);
            self.trace.event_line(format!("[event] blur target={target}"));
        }
        Ok(())
    }

    /// Fires `keydown` at the focused element (or the body) and, for an
    /// unprevented Tab, runs sequential focus navigation.
    pub fn press_key(&mut self, key: &KeyInput) -> Result<()> {
        let target = self
            .dom
            .active_element()
            .or_else(|| self.dom.body())
            .unwrap_or(self.dom.root);

        let outcome = self.dispatch(EventState::keydown(target, key.clone()))?;
        if outcome.default_prevented || !key.is_tab() {
            return Ok(());
        }

        match self.dom.next_in_tab_order(key.shift) {
            Some(next) => {
                self.dom.focus(next);
            }
            None => self.dom.active_element = None,
        }
        let active = self.active_description();
        self.trace.event_line(format!(
            "[event] sequential navigation {} -> {active}",
            describe_key(key)
        ));
        Ok(())
    }

    /// Mocks layout for a scroll container. The extent is reapplied after
    /// every reload.
    pub fn set_scroll_metrics(
        &mut self,
        selector: &str,
        scroll_height: f64,
        client_height: f64,
    ) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom
            .set_scroll_extent(target, scroll_height, client_height)?;
        self.scroll_extents
            .retain(|(existing, _, _)| existing != selector);
        self.scroll_extents
            .push((selector.to_string(), scroll_height, client_height));
        Ok(())
    }

    /// Sets `scrollTop` (clamped to the scrollable range) and fires `scroll`
    /// when the position changed.
    pub fn scroll_to(&mut self, selector: &str, top: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        let before = self.dom.scroll_metrics(target)?.scroll_top;
        let after = self.dom.set_scroll_top(target, top)?;
        if after != before {
            self.dispatch_event(target, "scroll")?;
        }
        Ok(())
    }

    pub fn scroll_by(&mut self, selector: &str, delta: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        let current = self.dom.scroll_metrics(target)?.scroll_top;
        self.scroll_to(selector, current + delta)
    }

    pub fn scroll_metrics(&self, selector: &str) -> Result<ScrollMetrics> {
        let target = self.select_one(selector)?;
        self.dom.scroll_metrics(target)
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.checked(target)?;
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &expected.to_string(),
                actual.to_string(),
            ));
        }
        Ok(())
    }

    pub fn assert_disabled(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.is_effectively_disabled(target);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &expected.to_string(),
                actual.to_string(),
            ));
        }
        Ok(())
    }

    pub fn assert_displayed(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.is_displayed(target);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &expected.to_string(),
                actual.to_string(),
            ));
        }
        Ok(())
    }

    pub fn assert_focused(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.active_element() != Some(target) {
            return Err(self.assertion_failed(
                selector,
                target,
                "focused",
                self.active_description(),
            ));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    /// `id` of the focused element. `None` when nothing is focused or the
    /// focused element has no id.
    pub fn active_element_id(&self) -> Option<String> {
        self.dom
            .active_element()
            .and_then(|node| self.dom.attr(node, "id"))
    }

    pub fn focus_state(&self) -> Result<FocusState> {
        self.focus_router.state(&self.dom)
    }

    pub fn gate_state(&self) -> GateState {
        self.scroll_gate.state()
    }

    pub fn checked_count(&self) -> Result<usize> {
        self.checkbox_sync.checked_count(&self.dom)
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The loaded document, for driving behaviors directly.
    pub fn document(&self) -> &impl DocumentAccess {
        &self.dom
    }

    pub fn document_cookie(&self) -> String {
        self.cookies.document_cookie()
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn location_reload_count(&self) -> usize {
        self.reload_count
    }

    /// Number of listeners currently registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.count(event_type)
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.outer_html(target))
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_behaviors(&mut self, enabled: bool) {
        self.trace.behaviors = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn assertion_failed(
        &self,
        selector: &str,
        target: NodeId,
        expected: &str,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: truncate_chars(&self.dom.outer_html(target), 200),
        }
    }

    fn describe(&self, node: NodeId) -> String {
        if node == self.dom.root {
            return "document".into();
        }
        match self.dom.attr(node, "id") {
            Some(id) if !id.is_empty() => format!("#{id}"),
            _ => self.dom.tag_name(node).unwrap_or("node").to_string(),
        }
    }

    fn describe_control(&self, node: NodeId) -> String {
        let tag = self.dom.tag_name(node).unwrap_or_default().to_string();
        match self.dom.attr(node, "type") {
            Some(kind) => format!("{tag}[type={}]", kind.to_ascii_lowercase()),
            None => tag,
        }
    }

    fn active_description(&self) -> String {
        match self.dom.active_element() {
            Some(node) => self.describe(node),
            None => "none".into(),
        }
    }
}

fn describe_key(key: &KeyInput) -> String {
    let mut out = String::new();
    for (held, name) in [
        (key.ctrl, "Ctrl+"),
        (key.alt, "Alt+"),
        (key.meta, "Meta+"),
        (key.shift, "Shift+"),
    ] {
        if held {
            out.push_str(name);
        }
    }
    out.push_str(&key.key);
    out
}
