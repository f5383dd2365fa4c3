//! Docsite Config
//!
//! Configuration model, loader and validator for documentation websites.

pub mod config;
pub mod error;
pub mod link;
pub mod nav;
pub mod repo;
pub mod validation;

pub use config::{SidebarGroup, SidebarItem, SidebarMode, SiteConfig, ThemeConfig};
pub use error::ConfigError;
pub use link::{LinkTarget, RouteSet};
pub use nav::NavEntry;
pub use repo::RepoMetadata;
pub use validation::{validate, validate_against_routes, ConfigIssue, Severity, ValidationReport};
