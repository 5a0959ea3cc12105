//! Vitrina Fetch Engine
//!
//! Materializes remote item photos into the local cache directory:
//! - **Batch download:** One GET per URL, issued concurrently, joined with
//!   all-succeed-or-fail semantics and input order preserved
//! - **Dimension probe:** Optionally resolves pixel dimensions so the
//!   compose stage can lay cards out without decoding twice
//!
//! Cache filenames are namespaced by a hash of the source URL, so two
//! distinct URLs that end in the same path segment never collide.

pub mod fetcher;
pub mod filename;

pub use fetcher::*;
pub use filename::cache_filename;
