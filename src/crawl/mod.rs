// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling and JavaScript downloading.
//
// Features:
// - Depth-first crawling starting from a URL (explicit work list, no recursion)
// - Respects same-domain restriction (doesn't crawl external sites)
// - Downloads every same-domain <script src> file that isn't on the denylist
// - Polite crawling with a configurable delay between downloads
//
// Why crawl?
// - To find every page of the target site
// - To collect the JavaScript those pages load
// - To give the scanner a complete local corpus to work on
//
// Rust concepts:
// - Collections: HashSet for the visited/downloaded sets, Vec as a stack
// - Async programming: Sequential awaited network requests
// =============================================================================

mod assets;
mod queue;

// Re-export the main crawling entry point
pub use queue::{crawl_site, CrawlStats};
