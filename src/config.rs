//! Site configuration schema and loading.
//!
//! This module models the configuration record consumed by the site
//! generator: the site title, the sidebar mode, the search toggle, the
//! top navigation bar and the repository metadata used for edit links.
//! Configs can be loaded from JSON, YAML or TOML files.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::nav::NavEntry;
use crate::repo::RepoMetadata;

fn default_base() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

/// Top-level configuration for a documentation site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name of the site.
    pub title: String,
    /// Short description used in page metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base path the site is served under.
    #[serde(default = "default_base")]
    pub base: String,
    /// Theme-level settings (sidebar, search, nav, edit links).
    #[serde(default)]
    pub theme_config: ThemeConfig,
}

impl SiteConfig {
    /// Load a configuration file, dispatching on its extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "json" => Self::from_json_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            "yaml" | "yml" => Self::from_yaml_str(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
            "toml" => Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            _ => {
                return Err(ConfigError::UnsupportedExtension {
                    path: path.to_path_buf(),
                    extension,
                })
            }
        };

        log::debug!(
            "Loaded site config '{}' from {} ({} nav entries)",
            config.title,
            path.display(),
            config.theme_config.nav.len()
        );

        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize back to pretty-printed JSON with the wire field names.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The canonical full configuration, used by `init` and as a fixture.
    pub fn example() -> Self {
        SiteConfig {
            title: "Apate".to_string(),
            description: None,
            base: "/".to_string(),
            theme_config: ThemeConfig {
                sidebar: SidebarMode::Auto,
                search: true,
                last_updated: true,
                nav: vec![
                    NavEntry::link("Home", "/"),
                    NavEntry::link("Usage", "/usage/"),
                    NavEntry::link("CRD Configuration", "/configuration/"),
                    NavEntry::link("Metrics", "/metrics/"),
                    NavEntry::link("Examples", "/examples/"),
                    NavEntry::dropdown(
                        "Development",
                        vec![
                            NavEntry::link("Build", "/build/"),
                            NavEntry::link("Environment variables", "/env/"),
                            NavEntry::link(
                                "Design & Implementation Details",
                                "/ApateDesignImplementation.pdf",
                            )
                            .with_target("_blank"),
                        ],
                    ),
                ],
                repo: Some("atlarge-research/apate".to_string()),
                docs_dir: Some("docs".to_string()),
                docs_branch: None,
                edit_links: true,
                extra: IndexMap::new(),
            },
        }
    }
}

/// Theme-level settings of a site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Sidebar generation mode.
    #[serde(default)]
    pub sidebar: SidebarMode,
    /// Whether the search widget is shown.
    #[serde(default = "default_true")]
    pub search: bool,
    /// Whether pages render a last-updated timestamp.
    #[serde(default)]
    pub last_updated: bool,
    /// Top navigation bar entries, rendered left-to-right in this order.
    #[serde(default)]
    pub nav: Vec<NavEntry>,
    /// Repository the docs live in, either a full URL or `owner/name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Directory inside the repository holding the documentation sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<String>,
    /// Branch edit links point at. Defaults to `master` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_branch: Option<String>,
    /// Whether per-page edit links are rendered.
    #[serde(default)]
    pub edit_links: bool,
    /// Theme keys this crate does not model, kept in declaration order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            sidebar: SidebarMode::Auto,
            search: true,
            last_updated: false,
            nav: Vec::new(),
            repo: None,
            docs_dir: None,
            docs_branch: None,
            edit_links: false,
            extra: IndexMap::new(),
        }
    }
}

impl ThemeConfig {
    /// All leaf navigation links as (text, link) pairs, in declared order.
    /// Dropdown children appear in place of their parent.
    pub fn nav_links(&self) -> Vec<(&str, &str)> {
        let mut links = Vec::new();
        for entry in &self.nav {
            links.extend(entry.flatten());
        }
        links
    }

    /// Whether a consumer has to generate a search index for this site.
    /// Index generation is skipped entirely when search is disabled.
    pub fn search_index_required(&self) -> bool {
        self.search
    }

    /// Repository metadata view, present only when `repo` is configured.
    pub fn repo_metadata(&self) -> Option<RepoMetadata<'_>> {
        RepoMetadata::from_theme(self)
    }
}

/// Sidebar generation mode: automatic from page headings, disabled, or
/// a manually declared list of pages and groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SidebarModeWire", into = "SidebarModeWire")]
pub enum SidebarMode {
    Auto,
    Disabled,
    Manual(Vec<SidebarItem>),
}

impl Default for SidebarMode {
    fn default() -> Self {
        SidebarMode::Auto
    }
}

/// Wire representation: the string `"auto"`, the boolean `false`, or an
/// array of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SidebarModeWire {
    Flag(bool),
    Keyword(String),
    Manual(Vec<SidebarItem>),
}

impl TryFrom<SidebarModeWire> for SidebarMode {
    type Error = String;

    fn try_from(wire: SidebarModeWire) -> Result<Self, Self::Error> {
        match wire {
            SidebarModeWire::Flag(false) => Ok(SidebarMode::Disabled),
            SidebarModeWire::Flag(true) => {
                Err("sidebar: true is not a mode; use \"auto\", false or an array".to_string())
            }
            SidebarModeWire::Keyword(word) if word == "auto" => Ok(SidebarMode::Auto),
            SidebarModeWire::Keyword(word) => Err(format!("unknown sidebar mode '{}'", word)),
            SidebarModeWire::Manual(items) => Ok(SidebarMode::Manual(items)),
        }
    }
}

impl From<SidebarMode> for SidebarModeWire {
    fn from(mode: SidebarMode) -> Self {
        match mode {
            SidebarMode::Auto => SidebarModeWire::Keyword("auto".to_string()),
            SidebarMode::Disabled => SidebarModeWire::Flag(false),
            SidebarMode::Manual(items) => SidebarModeWire::Manual(items),
        }
    }
}

/// One entry of a manual sidebar: a bare page path, or a titled group
/// of page paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    Page(String),
    Group(SidebarGroup),
}

/// A titled group of pages in a manual sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub title: String,
    #[serde(default)]
    pub children: Vec<String>,
}
