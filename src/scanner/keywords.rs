// src/scanner/keywords.rs
// =============================================================================
// This module searches the downloaded JavaScript files for keywords.
//
// How it works:
// 1. Load the operator's wordlist (one keyword per line)
// 2. Walk the output directory and read every .js file line by line
// 3. Record a hit whenever a line contains a keyword, case-insensitively
// 4. Print a per-file report with hit counts and 1-based line numbers
//
// The scan is purely observational - it never modifies the corpus, and a
// file it cannot read is logged and skipped.
//
// Rust concepts:
// - Iterators: enumerate() for line numbers, filter logic for .js files
// - Vec of structs: Keeps keyword hits in first-seen order (a HashMap
//   would lose the order the keywords were first matched in)
// =============================================================================

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

// All line numbers (1-based) on which one keyword matched in one file
#[derive(Debug, Clone, Serialize)]
pub struct KeywordHits {
    pub keyword: String,
    pub lines: Vec<usize>,
}

// Everything the scanner found in a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileScanReport {
    pub file: String,
    pub hits: Vec<KeywordHits>,
}

// The scan result for the whole corpus
//
// files_scanned counts every .js file we looked at; reports only holds the
// files that had at least one hit
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub files_scanned: usize,
    pub reports: Vec<FileScanReport>,
}

// Loads keywords from a wordlist file, one per line
//
// Blank lines are dropped; there is no comment syntax and no escaping.
// An unreadable wordlist is logged and treated as an empty list so the
// rest of the run (download + architecture detection) still happens.
pub fn load_keywords(path: &Path) -> Vec<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!(
                "{} Error reading keyword file {}: {}",
                "[ERROR]".red(),
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

// Scans every .js file in the output directory for the keywords
//
// Parameters:
//   dir: the directory holding the downloaded corpus
//   keywords: the loaded wordlist (order is preserved in the matching)
//   scan_delay: pause after each file's report (pacing for readability)
//
// Returns: ScanOutcome with the per-file reports
//
// Files are visited in directory-listing order. Unreadable files (I/O or
// non-UTF-8 content) are logged and skipped without aborting the scan.
pub async fn scan_directory(
    dir: &Path,
    keywords: &[String],
    scan_delay: Duration,
) -> Result<ScanOutcome> {
    println!(
        "{} Searching for keywords in JavaScript files...\n",
        "[SEARCH]".magenta()
    );

    let mut outcome = ScanOutcome {
        files_scanned: 0,
        reports: Vec::new(),
    };

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Cannot list output directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("js") {
            continue;
        }
        outcome.files_scanned += 1;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "{} Could not read {}: {}",
                    "[ERROR]".red(),
                    path.display(),
                    e
                );
                continue;
            }
        };

        let hits = scan_content(&content, keywords);

        // Display results for this file
        if !hits.is_empty() {
            println!(
                "{} {}. {}",
                "[FILE]".green(),
                outcome.files_scanned,
                path.display()
            );
            for hit in &hits {
                let line_info = hit
                    .lines
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "  {} '{}' ({} times) in lines: {}",
                    "[FOUND]".yellow(),
                    hit.keyword,
                    hit.lines.len(),
                    line_info
                );
            }

            outcome.reports.push(FileScanReport {
                file: path.display().to_string(),
                hits,
            });
        }

        // Spacing between file results, paced so the output stays readable
        println!("\n{}\n", "-".repeat(40));
        tokio::time::sleep(scan_delay).await;
    }

    println!(
        "\n{} Completed searching {} files.",
        "[DONE]".magenta(),
        outcome.files_scanned
    );

    Ok(outcome)
}

// Matches the keywords against one file's content
//
// Case-insensitive substring test, line by line; line numbers are 1-based.
// The returned hits are in the order the keywords were first matched.
fn scan_content(content: &str, keywords: &[String]) -> Vec<KeywordHits> {
    // Lowercase each keyword once instead of once per line
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut hits: Vec<KeywordHits> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line_lower = line.to_lowercase();

        for (keyword, keyword_lower) in keywords.iter().zip(&lowered) {
            if !line_lower.contains(keyword_lower.as_str()) {
                continue;
            }

            match hits.iter_mut().find(|h| &h.keyword == keyword) {
                Some(hit) => hit.lines.push(line_number),
                None => hits.push(KeywordHits {
                    keyword: keyword.clone(),
                    lines: vec![line_number],
                }),
            }
        }
    }

    hits
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why read_to_string and not a buffered line reader?
//    - The corpus files are JavaScript sources, small enough to slurp
//    - read_to_string also gives us the UTF-8 validity check for free:
//      a binary file errors out and takes the logged-skip path
//
// 2. What does zip() do?
//    - Pairs two iterators element by element
//    - Here it walks the original keywords and their lowercased twins
//      together, so the report keeps the operator's original casing
//
// 3. Why a Vec<KeywordHits> instead of a HashMap?
//    - The report lists keywords in the order they were first matched
//    - HashMap iteration order is random; the Vec preserves insertion order
//    - Wordlists are short, so the linear find() costs nothing in practice
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_case_insensitive_hits_with_line_numbers() {
        let content = "var x = 1;\nvar y = 2;\nLogin.init();\nnope\nnope\nnope\nLOGIN_URL = '/x';\n";
        let keywords = vec!["login".to_string()];

        let hits = scan_content(content, &keywords);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keyword, "login");
        assert_eq!(hits[0].lines, vec![3, 7]);
    }

    #[test]
    fn test_keywords_reported_in_first_seen_order() {
        let content = "token = fetch();\napiKey = token;\n";
        let keywords = vec!["apikey".to_string(), "token".to_string()];

        let hits = scan_content(content, &keywords);
        // "token" matches on line 1, before "apikey" matches on line 2
        assert_eq!(hits[0].keyword, "token");
        assert_eq!(hits[0].lines, vec![1, 2]);
        assert_eq!(hits[1].keyword, "apikey");
        assert_eq!(hits[1].lines, vec![2]);
    }

    #[test]
    fn test_no_keywords_no_hits() {
        let hits = scan_content("var login = true;\n", &[]);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_load_keywords_drops_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "login\n\n  \npassword\ntoken").unwrap();

        let keywords = load_keywords(file.path());
        assert_eq!(keywords, vec!["login", "password", "token"]);
    }

    #[test]
    fn test_load_keywords_missing_file_is_empty() {
        let keywords = load_keywords(Path::new("/definitely/not/here.txt"));
        assert!(keywords.is_empty());
    }

    #[tokio::test]
    async fn test_scan_directory_counts_js_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "doLogin();\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "login\n").unwrap();

        let keywords = vec!["login".to_string()];
        let outcome = scan_directory(dir.path(), &keywords, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(outcome.files_scanned, 1);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].hits[0].lines, vec![1]);
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        let keywords = vec!["login".to_string()];
        let outcome = scan_directory(dir.path(), &keywords, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(outcome.files_scanned, 0);
        assert!(outcome.reports.is_empty());
    }
}
