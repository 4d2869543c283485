// src/crawl/assets.rs
// =============================================================================
// This module finds and downloads the JavaScript assets of a page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative script URLs against the page URL
// - Compare hosts so we never download third-party scripts
// - Derive a local filename from the script URL's path
//
// Rust concepts:
// - Slices of &str: Constant lookup tables without allocation
// - Option<T>: For "this URL has no usable filename" cases
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use url::Url;

// Path fragments that mark a script as third-party or boilerplate.
// Any script whose resolved path contains one of these (case-insensitively)
// is skipped - we only want the site's own application code.
const DENYLIST: &[&str] = &[
    "webpack",
    "vendor",
    "bootstrap",
    "jquery",
    "analytics",
    "bundle",
    "theme",
    "framework",
];

// Extracts the downloadable script URLs of a page
//
// Parameters:
//   html: the page HTML to parse (borrowed as &str)
//   page_url: the URL of the page (for resolving relative src values)
//   base_host: the host we're restricting downloads to
//
// Returns: Vec<String> of absolute same-host script URLs, already filtered
// through the denylist
//
// Example:
//   html = "<script src='/static/app.js'></script>"
//   page_url = "https://example.com/docs"
//   result = ["https://example.com/static/app.js"]
pub fn extract_script_urls(html: &str, page_url: &str, base_host: &str) -> Vec<String> {
    let mut scripts = Vec::new();

    let document = Html::parse_document(html);

    // "script[src]" means "all <script> tags that have a src attribute"
    // The selector is constant and known to be valid, so unwrap() is fine here
    let selector = Selector::parse("script[src]").unwrap();

    // Parse the page URL once; we need it to resolve relative src values
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return scripts,
    };

    for element in document.select(&selector) {
        if let Some(src) = element.value().attr("src") {
            let resolved = match base.join(src) {
                Ok(url) => url,
                Err(_) => continue,
            };

            // Only HTTP(S) scripts on the target host are of interest
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }
            if resolved.host_str() != Some(base_host) {
                continue;
            }

            // Skip framework/vendor boilerplate
            if is_denylisted(resolved.path()) {
                continue;
            }

            scripts.push(resolved.to_string());
        }
    }

    scripts
}

// Checks a script path against the denylist, case-insensitively
//
// "webpack" matches "/js/Webpack.runtime.js" as well as "/webpack/entry.js" -
// it's a plain substring test, exactly as aggressive as it looks.
pub fn is_denylisted(path: &str) -> bool {
    let lowered = path.to_lowercase();
    DENYLIST.iter().any(|fragment| lowered.contains(fragment))
}

// Derives the local filename for a script URL
//
// The basename of the URL path becomes the filename; a URL whose path has no
// basename (e.g. the bare domain root) falls back to "index.js".
//
// Examples:
//   https://example.com/static/app.js  -> "app.js"
//   https://example.com/               -> "index.js"
//   https://example.com/js/            -> "index.js"
pub fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|basename| !basename.is_empty())
        .map(String::from)
        .unwrap_or_else(|| "index.js".to_string())
}

// Downloads one script and writes it into the output directory
//
// Parameters:
//   client: the shared HTTP client (10s timeout configured by the caller)
//   script_url: absolute URL of the script to fetch
//   output_dir: directory the file is written into
//
// Returns: the path the file was written to
//
// A file of the same name from an earlier download is silently overwritten -
// the corpus is flat, collisions keep the latest body.
pub async fn download_script(
    client: &Client,
    script_url: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let url = Url::parse(script_url)?;

    let response = client.get(script_url).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }
    let body = response.bytes().await?;

    let file_path = output_dir.join(file_name_for(&url));
    tokio::fs::write(&file_path, &body).await?;

    Ok(file_path)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why filter in here instead of in the crawl loop?
//    - The crawl loop only cares about "which URLs do I download"
//    - Host, scheme, and denylist rules are properties of the URL itself,
//      so they live next to the extraction
//    - The one filter that stays in the loop is the downloaded-set check,
//      because the set belongs to the crawl invocation
//
// 2. What does base.join(src) do?
//    - Resolves a possibly-relative URL like a browser would
//    - "/static/app.js" + page https://example.com/docs
//      -> https://example.com/static/app.js
//    - An already-absolute src passes through unchanged
//
// 3. Why tokio::fs::write?
//    - The async variant of std::fs::write
//    - Keeps the download path non-blocking like the rest of the crawl
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_relative_script() {
        let html = r#"<script src="/static/app.js"></script>"#;
        let scripts = extract_script_urls(html, "https://example.com/docs", "example.com");
        assert_eq!(scripts, vec!["https://example.com/static/app.js"]);
    }

    #[test]
    fn test_skip_external_host() {
        let html = r#"<script src="https://cdn.other.com/lib.js"></script>"#;
        let scripts = extract_script_urls(html, "https://example.com", "example.com");
        assert_eq!(scripts.len(), 0);
    }

    #[test]
    fn test_skip_denylisted_script() {
        let html = r#"
            <script src="/js/jquery.min.js"></script>
            <script src="/js/Webpack.runtime.js"></script>
            <script src="/js/app.js"></script>
        "#;
        let scripts = extract_script_urls(html, "https://example.com", "example.com");
        assert_eq!(scripts, vec!["https://example.com/js/app.js"]);
    }

    #[test]
    fn test_skip_inline_data_script() {
        let html = r#"<script src="data:text/javascript,alert(1)"></script>"#;
        let scripts = extract_script_urls(html, "https://example.com", "example.com");
        assert_eq!(scripts.len(), 0);
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert!(is_denylisted("/js/jQuery.slim.js"));
        assert!(is_denylisted("/BUNDLE/main.js"));
        assert!(!is_denylisted("/js/app.js"));
    }

    #[test]
    fn test_file_name_from_path() {
        let url = Url::parse("https://example.com/static/app.js?v=3").unwrap();
        assert_eq!(file_name_for(&url), "app.js");
    }

    #[test]
    fn test_file_name_falls_back_to_index() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(file_name_for(&url), "index.js");

        let url = Url::parse("https://example.com/js/").unwrap();
        assert_eq!(file_name_for(&url), "index.js");
    }
}
