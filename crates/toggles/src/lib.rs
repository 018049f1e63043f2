//! Path-based feature-toggle lookup.
//!
//! Toggle paths are ASCII identifier segments joined by `.`, e.g.
//! `booking-page.calendar-widget`. The tree is opt-out: any path that
//! cannot be found resolves to enabled.

pub mod error;
mod resolve;

pub use error::ToggleError;
pub use resolve::{flatten, is_enabled, set_enabled, validate_path};
