//! Link classification and route discovery.
//!
//! Navigation and sidebar links must resolve to a route within the
//! site or to an external absolute URL. This module classifies link
//! strings and builds the set of valid routes by scanning the
//! documentation source tree, using the same page-to-route mapping the
//! site generator applies: a `README.md` or `index.md` produces its
//! directory route, any other markdown page produces `<stem>.html`,
//! and every remaining file is served as a static asset.

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::ConfigError;

lazy_static::lazy_static! {
    static ref EXTERNAL_URL: Regex = Regex::new(r"^https?://").unwrap();
    static ref URL_SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap();
}

/// Classification of a configured link string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute URL to another site (`https://...`, `mailto:...`).
    External(String),
    /// Site-internal page route (`/usage/`, `/usage/advanced.html`).
    Route(String),
    /// Site-internal static file (`/ApateDesignImplementation.pdf`).
    Asset(String),
    /// Anything else; relative links are not valid in the nav bar.
    Relative(String),
}

impl LinkTarget {
    /// Classify a link string. Query strings and fragments are dropped
    /// from internal paths before classification.
    pub fn classify(link: &str) -> Self {
        if EXTERNAL_URL.is_match(link) || URL_SCHEME.is_match(link) {
            return LinkTarget::External(link.to_string());
        }

        if let Some(stripped) = link.strip_prefix('/') {
            let path = format!("/{}", trim_query_and_fragment(stripped));
            if path.ends_with('/') {
                return LinkTarget::Route(path);
            }
            match segment_extension(&path) {
                Some(ext) if !ext.eq_ignore_ascii_case("html") => LinkTarget::Asset(path),
                _ => LinkTarget::Route(path),
            }
        } else {
            LinkTarget::Relative(link.to_string())
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, LinkTarget::Route(_) | LinkTarget::Asset(_))
    }
}

fn trim_query_and_fragment(path: &str) -> &str {
    let end = path
        .find(|c| c == '#' || c == '?')
        .unwrap_or(path.len());
    &path[..end]
}

/// Extension of the last path segment, if any.
fn segment_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let dot = segment.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some(&segment[dot + 1..])
}

/// The set of valid internal routes of a documentation source tree.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    pages: BTreeSet<String>,
    assets: BTreeSet<String>,
    base: String,
}

impl RouteSet {
    /// Scan a docs directory for markdown pages and static assets.
    /// Dot-directories (e.g. the generator's own config directory) and
    /// `node_modules` are skipped.
    pub fn scan(docs_dir: &Path) -> Result<Self, ConfigError> {
        if !docs_dir.is_dir() {
            return Err(ConfigError::DocsDirNotFound {
                path: docs_dir.to_path_buf(),
            });
        }

        let mut routes = RouteSet {
            pages: BTreeSet::new(),
            assets: BTreeSet::new(),
            base: "/".to_string(),
        };

        let walker = WalkDir::new(docs_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !(name.starts_with('.') || name == "node_modules")
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry under {}: {}", docs_dir.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(docs_dir) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let relative = relative.to_string_lossy().replace('\\', "/");

            routes.record_file(&relative);
        }

        log::debug!(
            "Discovered {} page routes and {} assets under {}",
            routes.pages.len(),
            routes.assets.len(),
            docs_dir.display()
        );

        Ok(routes)
    }

    /// Set the base path the site is served under. Links carrying the
    /// base prefix resolve the same as links without it.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        if !self.base.ends_with('/') {
            self.base.push('/');
        }
        self
    }

    fn record_file(&mut self, relative: &str) {
        let is_markdown = relative.ends_with(".md") || relative.ends_with(".markdown");
        if !is_markdown {
            self.assets.insert(format!("/{}", relative));
            return;
        }

        let (dir, file) = match relative.rfind('/') {
            Some(pos) => (&relative[..pos + 1], &relative[pos + 1..]),
            None => ("", relative),
        };
        let stem = file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file);

        if stem.eq_ignore_ascii_case("readme") || stem == "index" {
            self.pages.insert(format!("/{}", dir));
        } else {
            self.pages.insert(format!("/{}{}.html", dir, stem));
        }
    }

    /// Whether a configured link resolves against this route set.
    /// External links resolve by definition; relative links never do.
    pub fn resolves(&self, link: &str) -> bool {
        match LinkTarget::classify(link) {
            LinkTarget::External(_) => true,
            LinkTarget::Relative(_) => false,
            LinkTarget::Route(path) => {
                let path = self.strip_base(&path);
                if self.pages.contains(path) {
                    return true;
                }
                if path.ends_with('/') {
                    return false;
                }
                // "/usage" and "/usage.html" both name the page behind
                // "/usage/" or "/usage.html".
                self.pages.contains(&format!("{}/", path))
                    || path
                        .strip_suffix(".html")
                        .map(|bare| self.pages.contains(&format!("{}/", bare)))
                        .unwrap_or(false)
                    || self.pages.contains(&format!("{}.html", path))
            }
            LinkTarget::Asset(path) => {
                let path = self.strip_base(&path);
                self.assets.contains(path)
            }
        }
    }

    fn strip_base<'a>(&self, path: &'a str) -> &'a str {
        if self.base != "/" {
            if let Some(rest) = path.strip_prefix(self.base.trim_end_matches('/')) {
                if rest.is_empty() {
                    return "/";
                }
                if rest.starts_with('/') {
                    return rest;
                }
            }
        }
        path
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|s| s.as_str())
    }

    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_docs() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("usage")).unwrap();
        fs::create_dir_all(root.join(".vuepress")).unwrap();
        fs::write(root.join("README.md"), "# Apate").unwrap();
        fs::write(root.join("usage/README.md"), "# Usage").unwrap();
        fs::write(root.join("usage/advanced.md"), "# Advanced").unwrap();
        fs::write(root.join("ApateDesignImplementation.pdf"), b"%PDF-").unwrap();
        fs::write(root.join(".vuepress/config.js"), "module.exports = {}").unwrap();
        temp
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            LinkTarget::classify("https://github.com/atlarge-research/apate"),
            LinkTarget::External("https://github.com/atlarge-research/apate".to_string())
        );
        assert_eq!(
            LinkTarget::classify("/usage/"),
            LinkTarget::Route("/usage/".to_string())
        );
        assert_eq!(
            LinkTarget::classify("/usage/advanced.html#setup"),
            LinkTarget::Route("/usage/advanced.html".to_string())
        );
        assert_eq!(
            LinkTarget::classify("/ApateDesignImplementation.pdf"),
            LinkTarget::Asset("/ApateDesignImplementation.pdf".to_string())
        );
        assert_eq!(
            LinkTarget::classify("usage/advanced.md"),
            LinkTarget::Relative("usage/advanced.md".to_string())
        );
    }

    #[test]
    fn test_scan_maps_pages_and_assets() {
        let docs = sample_docs();
        let routes = RouteSet::scan(docs.path()).unwrap();

        let pages: Vec<&str> = routes.pages().collect();
        assert_eq!(pages, vec!["/", "/usage/", "/usage/advanced.html"]);

        let assets: Vec<&str> = routes.assets().collect();
        assert_eq!(assets, vec!["/ApateDesignImplementation.pdf"]);
    }

    #[test]
    fn test_config_directory_is_skipped() {
        let docs = sample_docs();
        let routes = RouteSet::scan(docs.path()).unwrap();
        assert!(routes.assets().all(|a| !a.contains(".vuepress")));
    }

    #[test]
    fn test_resolution() {
        let docs = sample_docs();
        let routes = RouteSet::scan(docs.path()).unwrap();

        assert!(routes.resolves("/"));
        assert!(routes.resolves("/usage/"));
        assert!(routes.resolves("/usage"));
        assert!(routes.resolves("/usage/advanced.html"));
        assert!(routes.resolves("/usage/advanced"));
        assert!(routes.resolves("/ApateDesignImplementation.pdf"));
        assert!(routes.resolves("https://example.org/anything"));

        assert!(!routes.resolves("/metrics/"));
        assert!(!routes.resolves("/missing.pdf"));
        assert!(!routes.resolves("usage/advanced.md"));
    }

    #[test]
    fn test_base_prefix_is_honored() {
        let docs = sample_docs();
        let routes = RouteSet::scan(docs.path()).unwrap().with_base("/apate/");

        assert!(routes.resolves("/apate/usage/"));
        assert!(routes.resolves("/usage/"));
        assert!(routes.resolves("/apate/"));
    }

    #[test]
    fn test_missing_docs_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(RouteSet::scan(&missing).is_err());
    }
}
