//! HTTP protocol layer module
//!
//! Response builders shared by the router and handlers, kept free of
//! routing decisions.

pub mod response;

// Re-export commonly used items
pub use response::{
    build_404_response, build_health_response, build_json_response, APPLICATION_JSON,
};
