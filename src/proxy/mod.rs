//! The request relay pipeline.
//!
//! # Responsibilities
//! - Derive and validate the target URL from the inbound path
//! - Rewrite the header collection for the outbound hop
//! - Dispatch upstream and stream the response back

pub mod handler;
pub mod headers;
pub mod target;
