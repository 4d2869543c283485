// src/crawl/queue.rs
// =============================================================================
// This module implements the site crawl with a depth-first approach.
//
// How it works:
// 1. Start with the initial URL on a stack
// 2. Fetch the page HTML
// 3. Download every same-domain script the page references
// 4. Push the page's same-domain links onto the stack (if not visited)
// 5. Repeat until the stack is empty
//
// Politeness:
// - Pauses after every successful download to avoid overwhelming servers
// - Only crawls the start URL's own host to respect boundaries
//
// Rust concepts:
// - HashSet: To track visited/downloaded URLs (O(1) lookup)
// - Vec as a stack: push/pop from the back gives depth-first order
// - Url: For parsing and comparing hosts
// =============================================================================

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::assets;

// Counters the crawl hands back for the end-of-run summary
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub scripts_downloaded: usize,
}

// Crawls a website starting from a URL, downloading its JavaScript
//
// Parameters:
//   start_url: the URL to start crawling from; its host bounds the crawl
//   output_dir: directory the downloaded .js files are written to
//   download_delay: pause after each successful script download
//
// Returns: CrawlStats with page/script counters
//
// The traversal is depth-first and unbounded in depth - it ends when every
// same-host page reachable through anchor links has been visited once.
// Errors on a single page or script are logged and that unit is skipped;
// only an unusable start URL or an unwritable output directory are fatal.
pub async fn crawl_site(
    start_url: &str,
    output_dir: &Path,
    download_delay: Duration,
) -> Result<CrawlStats> {
    // Parse and validate the starting URL
    let start = Url::parse(start_url)
        .map_err(|e| anyhow!("Invalid URL '{}': {}", start_url, e))?;

    // Extract the host from the starting URL
    // We'll only crawl pages and download scripts on this host
    let base_host = start
        .host_str()
        .ok_or_else(|| anyhow!("URL has no host: {}", start_url))?
        .to_string();

    // Create the output folder if it doesn't exist
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

    // Create HTTP client, shared across every request of the crawl
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    // Work list of pages to crawl
    // Pushing and popping from the back of a Vec gives depth-first order
    let mut stack = vec![start.to_string()];

    // Track visited page URLs so cyclic link graphs terminate
    let mut visited = HashSet::new();

    // Track claimed script URLs so nothing is downloaded twice
    // A URL is claimed before the fetch attempt - a failed download
    // is not retried when another page references the same script
    let mut downloaded = HashSet::new();

    let mut stats = CrawlStats::default();

    // Process the work list until empty
    while let Some(page_url) = stack.pop() {
        // insert() returns false if the URL was already in the set
        if !visited.insert(page_url.clone()) {
            continue;
        }

        println!("{} Fetching URL: {}", "[INFO]".cyan(), page_url);

        // Fetch the page; a dead page just ends this branch of the crawl
        let html = match fetch_page(&client, &page_url).await {
            Ok(html) => html,
            Err(e) => {
                eprintln!(
                    "{} An error occurred while processing {}: {}",
                    "[ERROR]".red(),
                    page_url,
                    e
                );
                continue;
            }
        };
        stats.pages_fetched += 1;

        // Step 1: download the page's same-host scripts
        for script_url in assets::extract_script_urls(&html, &page_url, &base_host) {
            if !downloaded.insert(script_url.clone()) {
                continue;
            }

            println!(
                "{} Downloading JavaScript: {}",
                "[DOWNLOAD]".green(),
                script_url
            );

            match assets::download_script(&client, &script_url, output_dir).await {
                Ok(_) => {
                    stats.scripts_downloaded += 1;
                    // Polite crawling: pause between downloads
                    tokio::time::sleep(download_delay).await;
                }
                Err(e) => {
                    eprintln!(
                        "{} Error downloading {}: {}",
                        "[ERROR]".red(),
                        script_url,
                        e
                    );
                }
            }
        }

        // Step 2: queue the page's same-host links for crawling
        for link in extract_page_links(&html, &page_url, &base_host) {
            if !visited.contains(&link) {
                stack.push(link);
            }
        }
    }

    Ok(stats)
}

// Fetches a web page and returns its HTML content
async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let html = response.text().await?;
    Ok(html)
}

// Extracts links from HTML that are on the same host
//
// This prevents the crawler from leaving the target website
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the current page (for resolving relative links)
//   base_host: the host we're restricting crawling to
//
// Returns: Vec of absolute URLs on the same host
fn extract_page_links(html: &str, page_url: &str, base_host: &str) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_document(html);

    // Select all <a> tags with href
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the page URL for resolving relative links
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Try to resolve to an absolute URL
            let absolute_url = match resolve_link(&base, href) {
                Some(url) => url,
                None => continue,
            };

            // Check that it's HTTP(S) and on the same host
            if let Ok(parsed) = Url::parse(&absolute_url) {
                if (parsed.scheme() == "http" || parsed.scheme() == "https")
                    && parsed.host_str() == Some(base_host)
                {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Try to resolve the URL
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec instead of recursion?
//    - The natural way to write this crawl is a recursive function
//    - But site link graphs can be deep, and every recursion level costs
//      call-stack space - a big site could overflow the stack
//    - An explicit work list gives the same traversal without that limit
//    - pop() from the back = depth-first, like the recursion would be
//
// 2. What is HashSet::insert telling us?
//    - insert() returns true if the value was newly added
//    - false means "already seen", which is exactly the visited check
//    - One call does the test and the bookkeeping together
//
// 3. Why are page errors not fatal?
//    - One broken page shouldn't kill a crawl of hundreds of pages
//    - We log the error and move on to the next stack entry
//    - Only setup failures (bad start URL, unwritable output dir) propagate
//
// 4. What is tokio::time::sleep?
//    - Async sleep (doesn't block the thread)
//    - Used for polite crawling (delay between downloads)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "https://other.com");
        assert_eq!(result, Some("https://other.com/".to_string()));
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "/docs");
        assert_eq!(result, Some("https://example.com/docs".to_string()));
    }

    #[test]
    fn test_skip_anchor() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "#section");
        assert_eq!(result, None);
    }

    #[test]
    fn test_skip_mailto() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "mailto:test@example.com");
        assert_eq!(result, None);
    }

    #[test]
    fn test_links_keep_same_host_only() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://example.com/contact">Contact</a>
            <a href="https://other.com/">Elsewhere</a>
        "#;
        let links = extract_page_links(html, "https://example.com/", "example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/contact".to_string(),
            ]
        );
    }

    #[test]
    fn test_subdomain_is_a_different_host() {
        let html = r#"<a href="https://blog.example.com/post">Blog</a>"#;
        let links = extract_page_links(html, "https://example.com/", "example.com");
        assert_eq!(links.len(), 0);
    }
}
