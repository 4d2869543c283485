// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// js-recon has no subcommands - it is a single pipeline:
//   crawl -> download JS -> keyword scan -> architecture detection
// so the whole interface is one struct of positional arguments plus a few
// optional flags.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "js-recon",
    version = "0.1.0",
    about = "Crawl a website, download its same-domain JavaScript, and scan it",
    long_about = "js-recon crawls every same-domain page reachable from a start URL, \
                  downloads the JavaScript files those pages reference, then scans the \
                  downloaded files for your keywords and for GraphQL/REST API patterns."
)]
pub struct Cli {
    /// Start URL to crawl (e.g., https://example.com)
    ///
    /// Only pages and scripts on this URL's host are ever fetched
    pub url: String,

    /// Directory the downloaded .js files are written to (created if missing)
    pub output_dir: PathBuf,

    /// Wordlist file with one keyword per line (blank lines are ignored)
    pub keyword_file: PathBuf,

    /// Milliseconds to pause after each successful script download
    ///
    /// This is the politeness throttle between requests to the target server
    /// #[arg(long, default_value_t = 1000)] creates the flag with a default
    #[arg(long, default_value_t = 1000)]
    pub download_delay_ms: u64,

    /// Milliseconds to pause after each scanned file's report
    #[arg(long, default_value_t = 500)]
    pub scan_delay_ms: u64,

    /// Also print the full run report as JSON at the end
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Positional vs flag arguments:
//    - Fields without #[arg(...)] become positional arguments, in order
//    - #[arg(long)] turns a field into a --flag-name option instead
//    - clap derives the flag name from the field name (snake -> kebab case)
//
// 2. Why PathBuf instead of String?
//    - PathBuf is the owned filesystem-path type
//    - clap parses it for us, and std::fs functions take paths directly
//
// 3. What does default_value_t do?
//    - Supplies a typed default when the user omits the flag
//    - The _t suffix means "use this Rust value", not a string to parse
// -----------------------------------------------------------------------------
