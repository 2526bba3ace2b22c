//! Scene module - sphere field and its configuration
//!
//! The sphere list is generated once at startup; only the rotation angle
//! changes from frame to frame.

mod config;
mod store;

pub use config::*;
pub use store::*;
