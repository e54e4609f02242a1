//! The individual heuristics a scan is made of.
//!
//! - [`https`] — scheme inspection, no network access.
//! - [`content`] — single page fetch plus case-insensitive keyword search,
//!   shared by the privacy-policy and cookie-banner checks.
//! - [`ssl`] — TLS handshake and certificate expiry arithmetic.
//!
//! Every function here returns `Result<_, CheckError>`; turning an error into a
//! failing report entry is the scanner's job.

pub mod content;
pub mod https;
pub mod ssl;
