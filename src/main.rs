// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run the three pipeline stages in order:
//      crawl + download -> keyword scan -> architecture detection
// 3. Print the reports (and optionally a JSON version)
// 4. Exit with proper code (0 = completed, 1 = usage error, 2 = unexpected)
//
// Every stage treats its per-unit failures (one page, one script, one file)
// as log-and-skip, so a completed run exits 0 even when individual URLs or
// files misbehaved along the way.
//
// Rust concepts used:
// - async/await: The HTTP stages are async, awaited strictly in sequence
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to keep stage failures non-fatal
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - crawling + JS downloading
mod scanner;       // src/scanner/ - keyword scan + architecture detection

// Import items we need from our modules
use cli::Cli;
use clap::error::ErrorKind;
use clap::Parser;  // Parser trait enables the try_parse() method
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

use crawl::CrawlStats;
use scanner::{Architecture, ArchitectureReport, ScanOutcome};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed (individual failures were logged and skipped)
//   Ok(1) = bad command line
//   Err = unexpected error (mapped to exit code 2 in main)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // try_parse() gives us the error back instead of exiting for us, so a
    // malformed command line can exit 1 before anything touches the network
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version surface as clap "errors" but are successes
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            e.print()?;
            return Ok(code);
        }
    };

    println!("{}", "*** js-recon ***".green().bold());

    let download_delay = Duration::from_millis(cli.download_delay_ms);
    let scan_delay = Duration::from_millis(cli.scan_delay_ms);

    // Load the operator's wordlist; a missing file was already logged and
    // gives an empty list, which just means the scan stage finds nothing
    let keywords = scanner::load_keywords(&cli.keyword_file);
    println!(
        "{} Loaded {} keyword(s) from {}",
        "[INFO]".cyan(),
        keywords.len(),
        cli.keyword_file.display()
    );

    // Stage 1: crawl the site and download its JavaScript
    let stats = match crawl::crawl_site(&cli.url, &cli.output_dir, download_delay).await {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "[ERROR]".red(), e);
            CrawlStats::default()
        }
    };
    print_crawl_summary(&stats);

    // Stage 2: search the downloaded corpus for the keywords
    let scan = match scanner::scan_directory(&cli.output_dir, &keywords, scan_delay).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} Keyword scan failed: {}", "[ERROR]".red(), e);
            ScanOutcome {
                files_scanned: 0,
                reports: Vec::new(),
            }
        }
    };

    // Stage 3: classify the corpus as GraphQL / REST / both / neither
    let architecture = match scanner::detect_architecture(&cli.output_dir) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} Architecture detection failed: {}", "[ERROR]".red(), e);
            ArchitectureReport::default()
        }
    };
    print_architecture(&architecture);

    if cli.json {
        print_json_report(&stats, &scan, &architecture)?;
    }

    Ok(0)
}

// Prints the post-crawl summary block
fn print_crawl_summary(stats: &CrawlStats) {
    println!();
    println!("📊 Crawl summary:");
    println!("   📄 Pages fetched: {}", stats.pages_fetched);
    println!("   📦 Scripts downloaded: {}", stats.scripts_downloaded);
    println!();
}

// Prints the architecture verdict in human-readable form
fn print_architecture(report: &ArchitectureReport) {
    println!("{} Architecture Detection Results:", "[RESULT]".green());
    match report.classification() {
        Architecture::Both => println!(
            "  - Detected both {} and {} patterns.",
            "GraphQL".yellow(),
            "REST API".yellow()
        ),
        Architecture::GraphQl => {
            println!("  - Detected {} architecture.", "GraphQL".yellow())
        }
        Architecture::Rest => {
            println!("  - Detected {} architecture.", "REST API".yellow())
        }
        Architecture::None => println!("  - No specific architecture detected."),
    }
    println!();
    println!("{} Architecture detection completed.", "[DONE]".magenta());
}

// The whole run as one JSON document, for piping into other tooling
#[derive(Serialize)]
struct RunReport<'a> {
    pages_fetched: usize,
    scripts_downloaded: usize,
    scan: &'a ScanOutcome,
    architecture: &'a ArchitectureReport,
    classification: Architecture,
}

// Serializes the run report and prints it to stdout
fn print_json_report(
    stats: &CrawlStats,
    scan: &ScanOutcome,
    architecture: &ArchitectureReport,
) -> Result<()> {
    let report = RunReport {
        pages_fetched: stats.pages_fetched,
        scripts_downloaded: stats.scripts_downloaded,
        scan,
        architecture,
        classification: architecture.classification(),
    };

    let json_output = serde_json::to_string_pretty(&report)?;
    println!("{}", json_output);
    Ok(())
}
