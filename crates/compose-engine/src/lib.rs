//! Vitrina Compose Engine
//!
//! Turns downloaded item photos into flattened price-card bitmaps:
//! - **Layout:** Pure placement math for the photo and caption, computed
//!   from probed dimensions so nothing is decoded twice
//! - **Render:** Decode, scale, and draw each card onto its canvas
//! - **Capture:** Encode finished canvases to JPEG at configurable quality
//! - **Batch:** A countdown barrier that releases the capture phase only
//!   once every card in the batch has rendered

pub mod batch;
pub mod layout;
pub mod price;
pub mod render;
pub mod style;
pub mod typeface;

pub use batch::RenderBatch;
pub use layout::{compute_layout, CardLayout};
pub use price::format_price;
pub use render::{capture_card, prepare_card, CapturedComposite, PreparedCard};
pub use style::CardStyle;
pub use typeface::Typeface;
