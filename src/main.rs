//! Command-line interface for inspecting and validating site configs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use docsite_config::{validate, validate_against_routes, RouteSet, SidebarMode, SiteConfig};

#[derive(Parser)]
#[command(name = "docsite-config", version, about = "Inspect and validate documentation site configuration")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a configuration file
    Check {
        /// Path to the config file (.json, .yaml or .toml)
        config: PathBuf,
        /// Resolve internal links against this docs source directory
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },
    /// Print the effective configuration with defaults applied
    Show {
        config: PathBuf,
        #[arg(long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },
    /// Print the routes a docs source directory produces
    Routes {
        docs_dir: PathBuf,
        /// Base path the site is served under
        #[arg(long, default_value = "/")]
        base: String,
    },
    /// Write the canonical example configuration
    Init { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Command::Check { config, docs_dir } => check(&config, docs_dir.as_deref()),
        Command::Show { config, format } => show(&config, format),
        Command::Routes { docs_dir, base } => routes(&docs_dir, &base),
        Command::Init { path } => init(&path),
    }
}

fn check(config_path: &std::path::Path, docs_dir: Option<&std::path::Path>) -> Result<()> {
    let config = SiteConfig::from_path(config_path)?;

    let report = match docs_dir {
        Some(docs_dir) => {
            let routes = RouteSet::scan(docs_dir)?.with_base(config.base.clone());
            info!("Resolving links against {}", docs_dir.display());
            validate_against_routes(&config, &routes)
        }
        None => validate(&config),
    };

    for issue in &report.issues {
        println!("{}", issue);
    }

    if report.is_ok() {
        println!(
            "OK: '{}' ({} nav entries, {} warnings)",
            config.title,
            config.theme_config.nav.len(),
            report.warning_count()
        );
        Ok(())
    } else {
        println!(
            "FAILED: {} errors, {} warnings",
            report.error_count(),
            report.warning_count()
        );
        std::process::exit(1);
    }
}

fn show(config_path: &std::path::Path, format: OutputFormat) -> Result<()> {
    let config = SiteConfig::from_path(config_path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", config.to_json_string()?);
        }
        OutputFormat::Summary => {
            println!("title:        {}", config.title);
            if let Some(ref description) = config.description {
                println!("description:  {}", description);
            }
            println!("base:         {}", config.base);

            let theme = &config.theme_config;
            let sidebar = match &theme.sidebar {
                SidebarMode::Auto => "auto".to_string(),
                SidebarMode::Disabled => "disabled".to_string(),
                SidebarMode::Manual(items) => format!("manual ({} items)", items.len()),
            };
            println!("sidebar:      {}", sidebar);
            println!("search:       {}", if theme.search { "enabled" } else { "disabled" });
            println!("lastUpdated:  {}", theme.last_updated);

            println!("nav:");
            for (text, link) in theme.nav_links() {
                println!("  {} -> {}", text, link);
            }

            match theme.repo_metadata() {
                Some(repo) => {
                    println!("repo:         {}", repo.repo_url());
                    println!(
                        "edit links:   {}",
                        if repo.edit_links_enabled() {
                            "enabled"
                        } else {
                            "disabled"
                        }
                    );
                }
                None => println!("repo:         (none)"),
            }
        }
    }

    Ok(())
}

fn routes(docs_dir: &std::path::Path, base: &str) -> Result<()> {
    let routes = RouteSet::scan(docs_dir)?.with_base(base.to_string());

    for page in routes.pages() {
        println!("page   {}", page);
    }
    for asset in routes.assets() {
        println!("asset  {}", asset);
    }

    Ok(())
}

fn init(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let config = SiteConfig::example();
    let content = config.to_json_string()?;
    std::fs::write(path, content + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote example configuration to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}
