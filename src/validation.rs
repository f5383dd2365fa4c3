//! Configuration invariant checking.
//!
//! Structural checks run on the configuration alone; the route-aware
//! pass additionally resolves every internal link against the routes
//! discovered in the documentation source tree. Failures are collected
//! into a report with per-issue severity rather than aborting on the
//! first problem.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{SidebarItem, SidebarMode, SiteConfig};
use crate::link::{LinkTarget, RouteSet};
use crate::nav::NavEntry;

/// Severity of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding, anchored to the config field it is
/// about (e.g. `themeConfig.nav[5].items[2].link`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

/// Collected findings of a validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ConfigIssue>,
}

impl ValidationReport {
    /// True when no error-level issue was found. Warnings do not fail
    /// a report.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ConfigIssue {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ConfigIssue {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        });
    }
}

/// Structural validation of a configuration on its own.
pub fn validate(config: &SiteConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_structure(config, &mut report);
    report
}

/// Structural validation plus link resolution against a route set.
pub fn validate_against_routes(config: &SiteConfig, routes: &RouteSet) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_structure(config, &mut report);
    check_links(config, routes, &mut report);
    report
}

fn check_structure(config: &SiteConfig, report: &mut ValidationReport) {
    if config.title.trim().is_empty() {
        report.error("title", "title must not be empty");
    }

    let theme = &config.theme_config;

    for (index, entry) in theme.nav.iter().enumerate() {
        check_nav_entry(entry, &format!("themeConfig.nav[{}]", index), report);
    }

    let mut seen = std::collections::HashSet::new();
    for entry in &theme.nav {
        if !seen.insert(entry.text.as_str()) {
            report.warn(
                "themeConfig.nav",
                format!("duplicate navigation label '{}'", entry.text),
            );
        }
    }

    if theme.edit_links && theme.repo.is_none() {
        report.error(
            "themeConfig.editLinks",
            "editLinks is enabled but no repo is configured",
        );
    }
    if theme.docs_dir.is_some() && theme.repo.is_none() {
        report.warn("themeConfig.docsDir", "docsDir has no effect without a repo");
    }

    if let SidebarMode::Manual(items) = &theme.sidebar {
        for (index, item) in items.iter().enumerate() {
            if let SidebarItem::Group(group) = item {
                if group.children.is_empty() {
                    report.warn(
                        format!("themeConfig.sidebar[{}]", index),
                        format!("sidebar group '{}' has no children", group.title),
                    );
                }
            }
        }
    }

    if !theme.search {
        for key in theme.extra.keys() {
            if key.starts_with("search") {
                report.warn(
                    format!("themeConfig.{}", key),
                    "search is disabled; this setting has no effect",
                );
            }
        }
    }
}

fn check_nav_entry(entry: &NavEntry, field: &str, report: &mut ValidationReport) {
    if entry.text.trim().is_empty() {
        report.error(
            format!("{}.text", field),
            "navigation label must not be empty",
        );
    }

    if entry.link.is_none() && entry.items.is_empty() {
        report.error(
            field.to_string(),
            "navigation entry needs a link or a non-empty items list",
        );
    }

    if let Some(ref link) = entry.link {
        if let LinkTarget::Relative(_) = LinkTarget::classify(link) {
            report.error(
                format!("{}.link", field),
                format!(
                    "'{}' is neither a site-absolute path nor an absolute URL",
                    link
                ),
            );
        }
    }

    if let Some(ref target) = entry.target {
        if target != "_blank" && target != "_self" {
            report.warn(
                format!("{}.target", field),
                format!("unusual anchor target '{}'", target),
            );
        }
    }

    for (index, item) in entry.items.iter().enumerate() {
        check_nav_entry(item, &format!("{}.items[{}]", field, index), report);
    }
}

fn check_links(config: &SiteConfig, routes: &RouteSet, report: &mut ValidationReport) {
    let theme = &config.theme_config;

    for (index, entry) in theme.nav.iter().enumerate() {
        check_nav_links(entry, &format!("themeConfig.nav[{}]", index), routes, report);
    }

    if let SidebarMode::Manual(items) = &theme.sidebar {
        for (index, item) in items.iter().enumerate() {
            let pages: Vec<&String> = match item {
                SidebarItem::Page(page) => vec![page],
                SidebarItem::Group(group) => group.children.iter().collect(),
            };
            for page in pages {
                if !routes.resolves(page) {
                    report.error(
                        format!("themeConfig.sidebar[{}]", index),
                        format!("'{}' does not resolve to a page", page),
                    );
                }
            }
        }
    }
}

fn check_nav_links(
    entry: &NavEntry,
    field: &str,
    routes: &RouteSet,
    report: &mut ValidationReport,
) {
    if let Some(ref link) = entry.link {
        let target = LinkTarget::classify(link);
        if target.is_internal() && !routes.resolves(link) {
            report.error(
                format!("{}.link", field),
                format!("'{}' does not resolve to a page or asset", link),
            );
        }
    }
    for (index, item) in entry.items.iter().enumerate() {
        check_nav_links(item, &format!("{}.items[{}]", field, index), routes, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_example_config_is_structurally_valid() {
        let report = validate(&SiteConfig::example());
        assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_empty_title_is_an_error() {
        let mut config = SiteConfig::example();
        config.title = "  ".to_string();
        let report = validate(&config);
        assert!(!report.is_ok());
        assert!(report.issues.iter().any(|i| i.field == "title"));
    }

    #[test]
    fn test_entry_without_link_or_items() {
        let config = SiteConfig::from_json_str(
            r#"{"title": "Apate", "themeConfig": {"nav": [{"text": "Broken"}]}}"#,
        )
        .unwrap();
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues[0].field, "themeConfig.nav[0]");
    }

    #[test]
    fn test_relative_link_is_an_error() {
        let config = SiteConfig::from_json_str(
            r#"{"title": "Apate", "themeConfig": {"nav": [{"text": "Usage", "link": "usage/"}]}}"#,
        )
        .unwrap();
        let report = validate(&config);
        assert!(!report.is_ok());
        assert!(report
            .issues
            .iter()
            .any(|i| i.field == "themeConfig.nav[0].link"));
    }

    #[test]
    fn test_edit_links_require_repo() {
        let config =
            SiteConfig::from_json_str(r#"{"title": "Apate", "themeConfig": {"editLinks": true}}"#)
                .unwrap();
        let report = validate(&config);
        assert!(!report.is_ok());
        assert!(report
            .issues
            .iter()
            .any(|i| i.field == "themeConfig.editLinks"));
    }

    #[test]
    fn test_duplicate_labels_and_odd_target_warn() {
        let config = SiteConfig::from_json_str(
            r#"
            {
                "title": "Apate",
                "themeConfig": {
                    "nav": [
                        { "text": "Home", "link": "/" },
                        { "text": "Home", "link": "/home/", "target": "_top" }
                    ]
                }
            }
            "#,
        )
        .unwrap();
        let report = validate(&config);
        assert!(report.is_ok());
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_disabled_search_flags_leftover_settings() {
        let config = SiteConfig::from_json_str(
            r#"
            {
                "title": "Apate",
                "themeConfig": { "search": false, "searchMaxSuggestions": 10 }
            }
            "#,
        )
        .unwrap();
        let report = validate(&config);
        assert!(report.is_ok());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.issues[0].field, "themeConfig.searchMaxSuggestions");
    }

    #[test]
    fn test_issue_display() {
        let mut report = ValidationReport::default();
        report.error("title", "title must not be empty");
        assert_eq!(
            report.issues[0].to_string(),
            "error: title: title must not be empty"
        );
    }
}
