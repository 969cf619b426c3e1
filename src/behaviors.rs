//! The form behaviors. Each one is constructed from a [`FormConfig`], reads
//! and writes the page only through [`DocumentAccess`], and keeps no state
//! beyond what its contract names.

use super::*;

mod checkbox_sync;
mod focus_router;
mod language_switcher;
mod scroll_gate;

pub use checkbox_sync::CheckboxSync;
pub use focus_router::{FocusRouter, FocusState, RouteOutcome};
pub use language_switcher::LanguageSwitcher;
pub use scroll_gate::{GateSetup, GateState, GateTransition, ScrollGate};
