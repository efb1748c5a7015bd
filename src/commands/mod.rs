//! Commands Layer
//!
//! Operation handlers that bridge a transport (HTTP router, RPC shell) to
//! the repositories and the image pipeline.

mod icon_cmd;
mod image_cmd;
mod user_cmd;

pub use icon_cmd::*;
pub use image_cmd::*;
pub use user_cmd::*;
