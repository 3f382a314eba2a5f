//! HTTP protocol layer module
//!
//! Response builders shared by the fixture endpoints.

pub mod response;

// Re-export commonly used types
pub use response::{build_500_response, build_body_response, build_plain_text_response, FixtureBody};
