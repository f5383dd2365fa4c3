//! Repository metadata and per-page edit links.
//!
//! A configured `repo` is either a full URL or the `owner/name`
//! shorthand, which expands to a GitHub URL. When edit links are
//! enabled, every documentation page gets a link back to its source
//! file inside `docsDir` on the configured branch.

use regex::Regex;

use crate::config::ThemeConfig;

const DEFAULT_BRANCH: &str = "master";

lazy_static::lazy_static! {
    static ref REPO_SHORTHAND: Regex =
        Regex::new(r"^[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+$").unwrap();
}

/// Borrowed view over the repository fields of a theme configuration.
#[derive(Debug, Clone, Copy)]
pub struct RepoMetadata<'a> {
    repo: &'a str,
    docs_dir: Option<&'a str>,
    docs_branch: Option<&'a str>,
    edit_links: bool,
}

impl<'a> RepoMetadata<'a> {
    /// Present only when the theme configures a repository.
    pub fn from_theme(theme: &'a ThemeConfig) -> Option<Self> {
        theme.repo.as_deref().map(|repo| RepoMetadata {
            repo,
            docs_dir: theme.docs_dir.as_deref(),
            docs_branch: theme.docs_branch.as_deref(),
            edit_links: theme.edit_links,
        })
    }

    /// Full repository URL, expanding the `owner/name` shorthand.
    pub fn repo_url(&self) -> String {
        if REPO_SHORTHAND.is_match(self.repo) {
            format!("https://github.com/{}", self.repo)
        } else {
            self.repo.trim_end_matches('/').to_string()
        }
    }

    pub fn edit_links_enabled(&self) -> bool {
        self.edit_links
    }

    pub fn docs_dir(&self) -> Option<&str> {
        self.docs_dir
    }

    /// Edit URL for a page source path relative to the docs directory,
    /// or `None` when edit links are disabled.
    pub fn edit_url(&self, page: &str) -> Option<String> {
        if !self.edit_links {
            return None;
        }

        let mut url = format!(
            "{}/edit/{}",
            self.repo_url(),
            self.docs_branch.unwrap_or(DEFAULT_BRANCH)
        );
        if let Some(docs_dir) = self.docs_dir {
            let docs_dir = docs_dir.trim_matches('/');
            if !docs_dir.is_empty() {
                url.push('/');
                url.push_str(docs_dir);
            }
        }
        url.push('/');
        url.push_str(page.trim_start_matches('/'));
        Some(url)
    }
}
