// src/scanner/architecture.rs
// =============================================================================
// This module guesses the backend architecture behind the site.
//
// The idea: application JavaScript leaks how it talks to its server.
// GraphQL clients mention "mutation", "subscription", or a /graphql
// endpoint; REST clients mention versioned paths like api/v1 and the
// classic endpoint names (/auth, /login, ...).
//
// The check is a whole-file, case-insensitive substring test per marker,
// aggregated over the corpus into one flag per family. Note that the bare
// verb markers ("get", "post", ...) match inside ordinary identifiers such
// as "target" or "budget", so REST detection errs on the side of firing.
//
// Rust concepts:
// - Enums: One type for the four possible classifications
// - const slices: The marker tables live in the binary, no allocation
// =============================================================================

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

// Strings that suggest the site speaks GraphQL
const GRAPHQL_MARKERS: &[&str] = &[
    "graphql",
    "mutation",
    "query",
    "subscription",
    "/graphql",
    "graphql-schema",
];

// Strings that suggest a REST-style API
const REST_MARKERS: &[&str] = &[
    "api/v1",
    "api/v2",
    "/auth",
    "/users",
    "/login",
    "/logout",
    "get",
    "post",
    "put",
    "delete",
];

// The corpus-level verdict
//
// #[derive(Serialize)] lets the --json report carry the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Both GraphQL and REST patterns were found
    Both,
    /// Only GraphQL patterns were found
    GraphQl,
    /// Only REST patterns were found
    Rest,
    /// No pattern of either family was found
    None,
}

// Which marker families fired anywhere in the corpus
#[derive(Debug, Default, Serialize)]
pub struct ArchitectureReport {
    pub graphql_detected: bool,
    pub rest_detected: bool,
}

impl ArchitectureReport {
    /// Collapses the two flags into the final classification
    pub fn classification(&self) -> Architecture {
        match (self.graphql_detected, self.rest_detected) {
            (true, true) => Architecture::Both,
            (true, false) => Architecture::GraphQl,
            (false, true) => Architecture::Rest,
            (false, false) => Architecture::None,
        }
    }
}

// Scans the corpus for architecture markers
//
// Parameters:
//   dir: the directory holding the downloaded .js files
//
// Returns: ArchitectureReport with one flag per marker family
//
// Detection is file-level: one occurrence anywhere in any file sets the
// family's flag for the whole corpus. Unreadable files are logged and
// skipped, like everywhere else in the pipeline.
pub fn detect_architecture(dir: &Path) -> Result<ArchitectureReport> {
    println!("{} Detecting site architecture...\n", "[INFO]".cyan());

    let mut report = ArchitectureReport::default();

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Cannot list output directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("js") {
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content.to_lowercase(),
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

        if contains_any(&content, GRAPHQL_MARKERS) {
            report.graphql_detected = true;
        }
        if contains_any(&content, REST_MARKERS) {
            report.rest_detected = true;
        }
    }

    Ok(report)
}

// Whole-content substring test against one marker table
//
// The content is already lowercased by the caller, and every marker is
// written in lowercase, so this is the case-insensitive match.
fn contains_any(content_lower: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| content_lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_in(files: &[(&str, &str)]) -> ArchitectureReport {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        detect_architecture(dir.path()).unwrap()
    }

    #[test]
    fn test_both_detected_across_files() {
        let report = detect_in(&[
            ("a.js", "const schema = require('graphql-schema');"),
            ("b.js", "fetch('/api/v1/users');"),
        ]);
        assert_eq!(report.classification(), Architecture::Both);
    }

    #[test]
    fn test_graphql_only() {
        let report = detect_in(&[("a.js", "client.request(MUTATION);")]);
        assert!(report.graphql_detected);
        assert_eq!(report.classification(), Architecture::GraphQl);
    }

    #[test]
    fn test_rest_only() {
        let report = detect_in(&[("a.js", "axios.defaults.baseURL = '/auth';")]);
        assert_eq!(report.classification(), Architecture::Rest);
    }

    #[test]
    fn test_nothing_detected() {
        let report = detect_in(&[("a.js", "wind0w.l0cati0n.rel0ad();")]);
        assert_eq!(report.classification(), Architecture::None);
    }

    #[test]
    fn test_empty_corpus_detects_nothing() {
        let report = detect_in(&[]);
        assert_eq!(report.classification(), Architecture::None);
    }

    #[test]
    fn test_non_js_files_are_ignored() {
        let report = detect_in(&[("readme.txt", "graphql everywhere")]);
        assert_eq!(report.classification(), Architecture::None);
    }

    #[test]
    fn test_bare_verb_marker_fires_on_substrings() {
        // "get" inside "target" counts; the marker tables trade precision
        // for recall on purpose
        assert!(contains_any("var target = 1;", REST_MARKERS));
    }
}
