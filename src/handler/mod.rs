//! Request handler module
//!
//! Request routing and the list file endpoint.

pub mod list_file;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
