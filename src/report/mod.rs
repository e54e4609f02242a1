//! Renderers for a finished [`ScanReport`](crate::models::ScanReport).
//!
//! - [`terminal`] — colored summary table, score and numbered recommendations.
//! - [`json`] — pretty-printed report file, field names as in the data model.
//! - [`html`] — minimal standalone document.

pub mod html;
pub mod json;
pub mod terminal;
