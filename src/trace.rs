use super::*;

pub(crate) const DEFAULT_TRACE_LOG_LIMIT: usize = 10_000;

/// Bounded in-memory trace of what the page did, by category.
///
/// Lines are always emitted through `tracing` at debug level; the buffer only
/// keeps them while tracing is enabled for their category.
#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) behaviors: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            behaviors: true,
            logs: VecDeque::new(),
            log_limit: DEFAULT_TRACE_LOG_LIMIT,
        }
    }
}

impl TraceState {
    pub(crate) fn event_line(&mut self, line: String) {
        let keep = self.events;
        self.record(line, keep);
    }

    pub(crate) fn behavior_line(&mut self, line: String) {
        let keep = self.behaviors;
        self.record(line, keep);
    }

    pub(crate) fn line(&mut self, line: String) {
        self.record(line, true);
    }

    fn record(&mut self, line: String, category_enabled: bool) {
        tracing::debug!(target: "consent_form", "{line}");
        if !(self.enabled && category_enabled) {
            return;
        }
        if self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidConfig(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}
