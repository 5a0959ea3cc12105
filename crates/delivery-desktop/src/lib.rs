//! Vitrina Desktop Delivery
//!
//! Desktop implementations of the delivery capabilities:
//! - **Share sheet:** hands files to a configured handler command, with a
//!   per-target command table for single-target routing
//! - **Gallery:** albums are manifest-led directories under a pictures
//!   root, with a write-permission probe on every save batch
//! - **Capabilities:** a report of what delivery routes this system has

pub mod capabilities;
pub mod gallery_dir;
pub mod share_command;

pub use capabilities::*;
pub use gallery_dir::DirectoryGallery;
pub use share_command::CommandShareSheet;
