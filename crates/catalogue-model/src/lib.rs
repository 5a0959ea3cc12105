//! Vitrina Catalogue Model
//!
//! Defines the core data contracts for Vitrina:
//! - **Catalogue:** Items with names, descriptions, prices, and image URLs,
//!   persisted as an on-disk bundle
//! - **Selection:** The transient ordered set of items marked for a bulk
//!   share or export action
//!
//! Item prices are plain non-negative numbers; the owning catalogue carries
//! the currency symbol so rendered cards stay consistent across items.

pub mod catalogue;
pub mod selection;

pub use catalogue::*;
pub use selection::*;
