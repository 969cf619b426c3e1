//! Client-side behavior of a consent management form, run against a
//! deterministic in-memory document.
//!
//! A [`ConsentPage`] is loaded from markup, binds the form behaviors (checkbox
//! sync, focus router, scroll gate, language switcher) and is then driven with
//! user actions:
//!
//! ```no_run
//! use consent_form::{ConsentPage, KeyInput};
//!
//! # fn main() -> consent_form::Result<()> {
//! let mut page = ConsentPage::from_html(r#"<input type="checkbox" id="toggle-all">"#)?;
//! page.focus("#toggle-all")?;
//! page.press_key(&KeyInput::new("Escape"))?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::LazyLock;

mod behaviors;
mod config;
mod cookies;
mod document;
mod dom;
mod events;
mod html;
mod page;
mod patterns;
mod selector;
mod trace;


pub use behaviors::{
    CheckboxSync, FocusRouter, FocusState, GateSetup, GateState, GateTransition, LanguageSwitcher,
    RouteOutcome, ScrollGate,
};
pub use config::FormConfig;
pub use cookies::{Cookie, CookieJar, SameSite};
pub use document::DocumentAccess;
pub use dom::{NodeId, ScrollMetrics};
pub use events::KeyInput;
pub use page::{ConsentPage, ReadyState};

pub(crate) use dom::{Dom, Element};
pub(crate) use events::{EventState, Handler, ListenerStore};
pub(crate) use selector::Selector;
pub(crate) use trace::TraceState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("lifecycle error: {0}")]
    Lifecycle(String),
    #[error("dom operation error: {0}")]
    DomOperation(String),
    #[error("pattern error: {0}")]
    Pattern(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
