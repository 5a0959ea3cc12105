//! Vitrina Delivery Core
//!
//! The pipeline never talks to an OS sharing or gallery API directly; it
//! depends on the two capability traits defined here. Platform crates
//! provide the adapters (see `vitrina-delivery-desktop`), and tests can
//! substitute in-memory fakes.

pub mod gallery;
pub mod share;

pub use gallery::*;
pub use share::*;
