//! Vitrina Share Pipeline
//!
//! Orchestrates one share flow end to end: snapshot the selection,
//! download the photos, compose and capture price cards, then hand the
//! result to a delivery capability.
//!
//! # Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  ShareSession                    │
//! │                                                  │
//! │  Idle → AwaitingDownload → AwaitingRender        │
//! │              │               │   (RenderBatch)   │
//! │              │ plain         ▼                   │
//! │              │          AwaitingCapture          │
//! │              ▼               │                   │
//! │         ReadyToExport ◄──────┘                   │
//! │              │                                   │
//! │       share / save                               │
//! │              ▼                                   │
//! │      Exported  |  Failed                         │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod session;

pub use session::*;
