//! Request handler module
//!
//! Exact-path dispatch to the fixture's canned endpoints.

pub mod endpoints;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, RouteTable};
