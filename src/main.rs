//! stagehand CLI entrypoint
//! Parses command-line arguments and dispatches to the generators.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;
use std::sync::Arc;

use stagehand::core::config::{DEFAULT_TEMPLATE, GeneratorOptions, Settings};
use stagehand::core::templates::TemplateRegistry;
use stagehand::generation::{Blueprint, scaffold};
use stagehand::infrastructure::shell::ShellCommandExecutor;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    Init {
        /// Directory to create the project in
        location: PathBuf,
        /// Registered template to generate from
        #[arg(short = 'T', long, default_value = DEFAULT_TEMPLATE)]
        template: String,
        /// Include a Rack config.ru
        #[arg(long)]
        rack: bool,
        /// Skip running bundle install
        #[arg(long = "skip-bundle", short = 'B')]
        skip_bundle: bool,
        /// Skip creating a .gitignore
        #[arg(long = "skip-git")]
        skip_git: bool,
        /// Stylesheet directory inside source/
        #[arg(long, default_value = "stylesheets")]
        css_dir: String,
        /// Javascript directory inside source/
        #[arg(long, default_value = "javascripts")]
        js_dir: String,
        /// Image directory inside source/
        #[arg(long, default_value = "images")]
        images_dir: String,
        /// Overwrite files that already exist with different content
        #[arg(short, long)]
        force: bool,
        /// Show what would be generated without writing anything
        #[arg(short, long)]
        pretend: bool,
        /// Root directory scanned for local templates
        #[arg(long)]
        templates_dir: Option<PathBuf>,
    },
    /// Inspect registered templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateCommands {
    /// List every registered template
    List {
        /// Root directory scanned for local templates
        #[arg(long)]
        templates_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the generation report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::WARN.into())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init {
            location,
            template,
            rack,
            skip_bundle,
            skip_git,
            css_dir,
            js_dir,
            images_dir,
            force,
            pretend,
            templates_dir,
        } => {
            let options = GeneratorOptions {
                template,
                rack,
                skip_bundle,
                skip_git,
                css_dir,
                js_dir,
                images_dir,
                force,
                pretend,
            };
            run_init(location, options, templates_dir)?
        }
        Commands::Templates { action } => match action {
            TemplateCommands::List { templates_dir } => run_templates_list(templates_dir)?,
        },
    }

    Ok(())
}

/// Build the registry from the environment and an optional override root
fn load_registry(templates_dir: Option<PathBuf>) -> anyhow::Result<(Settings, TemplateRegistry)> {
    let settings = Settings::from_env().with_templates_dir(templates_dir);
    let registry = TemplateRegistry::discover(settings.templates_dir.as_deref())
        .context("Failed to discover local templates")?;
    debug!(templates = ?registry.names(), "Template registry ready");
    Ok((settings, registry))
}

fn run_init(
    location: PathBuf,
    options: GeneratorOptions,
    templates_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (settings, registry) = load_registry(templates_dir)?;
    let template = options.template.clone();

    info!(template = %template, location = %location.display(), "Initializing project");
    let report = scaffold(
        &registry,
        &location,
        options,
        &settings,
        Arc::new(ShellCommandExecutor::streaming()),
    )
    .with_context(|| {
        format!(
            "Failed to generate '{}' from template '{}'",
            location.display(),
            template
        )
    })?;

    for entry in &report.entries {
        println!("{:>12}  {}", entry.status.as_str(), entry.target);
    }
    Ok(())
}

fn run_templates_list(templates_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let (_, registry) = load_registry(templates_dir)?;

    for (name, generator) in registry.registered() {
        let description = generator.description();
        if description.is_empty() {
            println!("{name}");
        } else {
            println!("{name:<12} {description}");
        }
    }
    Ok(())
}
