//! The project generator: composes shared and blueprint-specific steps and
//! executes them against a destination directory.
//!
//! # Step order
//!
//! Every generator runs the shared steps first, then the blueprint's own:
//!
//! 1. `rack` – renders `shared/config.ru` into `config.ru` (gated by `rack`)
//! 2. `gemfile` – renders the blueprint's Gemfile template (always)
//! 3. `bundle` – runs `bundle install` inside the location (gated by
//!    `!skip_bundle`, suppressed in test mode)
//! 4. `gitignore` – copies `shared/gitignore` into `.gitignore` (gated by
//!    `!skip_git`)
//! 5. blueprint steps, in the order the blueprint returns them
//!
//! Gates are evaluated uniformly before each step runs. A failing step stops
//! generation immediately; files written by earlier steps stay on disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tera::{Context, Tera};
use tracing::{debug, error, info};

use crate::core::config::{GeneratorOptions, Settings};
use crate::core::error::{Error, Result};
use crate::core::templates::{SourcePaths, TemplateAsset};
use crate::generation::{
    Action, Blueprint, FileStatus, GenerationReport, GeneratorDescriptor, Step,
};
use crate::infrastructure::shell::CommandExecutor;

/// Command run by the `bundle` step
pub const INSTALL_COMMAND: &str = "bundle install";

/// Middleman release line pinned by the generated Gemfile
pub const MIDDLEMAN_VERSION: &str = "4.5";

/// The shared steps every generator starts with
pub fn base_steps(blueprint: &dyn Blueprint) -> Vec<Step> {
    vec![
        Step::gated(
            "rack",
            |o| o.rack,
            Action::render("shared/config.ru", "config.ru"),
        ),
        Step::always(
            "gemfile",
            Action::render(blueprint.gemfile_template(), "Gemfile"),
        ),
        Step::gated(
            "bundle",
            |o| !o.skip_bundle,
            Action::Install {
                command: INSTALL_COMMAND.to_string(),
            },
        ),
        Step::gated(
            "gitignore",
            |o| !o.skip_git,
            Action::copy("shared/gitignore", ".gitignore"),
        ),
    ]
}

/// Generates one project at one location
pub struct ProjectGenerator {
    blueprint: GeneratorDescriptor,
    location: PathBuf,
    options: GeneratorOptions,
    test_mode: bool,
    source_paths: SourcePaths,
    executor: Arc<dyn CommandExecutor>,
}

impl ProjectGenerator {
    /// Create a generator for `location`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `location` is empty.
    pub fn new(
        blueprint: GeneratorDescriptor,
        location: impl Into<PathBuf>,
        options: GeneratorOptions,
        settings: &Settings,
        executor: Arc<dyn CommandExecutor>,
    ) -> Result<Self> {
        let location = location.into();
        if location.as_os_str().is_empty() {
            return Err(Error::config("A project location is required"));
        }

        let source_paths = SourcePaths::new(blueprint.source_paths());
        Ok(Self {
            blueprint,
            location,
            options,
            test_mode: settings.test_mode,
            source_paths,
            executor,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn source_paths(&self) -> &SourcePaths {
        &self.source_paths
    }

    /// Every step of this generator, enabled or not, in execution order
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = base_steps(self.blueprint.as_ref());
        steps.extend(self.blueprint.steps(&self.options));
        steps
    }

    /// The steps whose gate holds for the configured options
    pub fn enabled_steps(&self) -> Vec<Step> {
        self.steps()
            .into_iter()
            .filter(|step| step.is_enabled(&self.options))
            .collect()
    }

    /// Run every enabled step in order
    pub fn generate(&self) -> Result<GenerationReport> {
        info!(
            template = %self.blueprint.name(),
            location = %self.location.display(),
            "Generating project"
        );

        let context = self.render_context()?;
        let mut report = GenerationReport::default();

        for step in self.steps() {
            if !step.is_enabled(&self.options) {
                debug!(step = step.name, "Step disabled by options");
                continue;
            }
            debug!(step = step.name, action = ?step.action, "Running step");
            self.run_action(step.name, &step.action, &context, &mut report)?;
        }

        Ok(report)
    }

    /// Template variables: every option plus location details
    fn render_context(&self) -> Result<Context> {
        let mut context = Context::from_serialize(&self.options).map_err(|source| Error::Render {
            template: "<context>".to_string(),
            source,
        })?;
        context.insert("location", &self.location.to_string_lossy());
        context.insert("project_name", &project_name(&self.location));
        context.insert("middleman_version", MIDDLEMAN_VERSION);
        Ok(context)
    }

    fn run_action(
        &self,
        step: &'static str,
        action: &Action,
        context: &Context,
        report: &mut GenerationReport,
    ) -> Result<()> {
        match action {
            Action::Render {
                template,
                destination,
            } => {
                let asset = self.source_paths.find_file(template)?;
                let rendered = render(&asset, context)?;
                let target = self.destination(destination)?;
                self.write_file(step, &target, rendered.as_bytes(), report)
            }
            Action::Copy {
                source,
                destination,
            } => {
                let asset = self.source_paths.find_file(source)?;
                let target = self.destination(destination)?;
                self.write_file(step, &target, &asset.contents, report)
            }
            Action::Directory {
                source,
                destination,
            } => {
                let assets = self.source_paths.find_dir(source)?;
                let root = self.destination(destination)?;
                for asset in assets {
                    let target = root.join(relative_path(&asset.path)?);
                    self.write_file(step, &target, &asset.contents, report)?;
                }
                Ok(())
            }
            Action::EmptyDirectory { destination } => {
                let target = self.destination(destination)?;
                self.create_directory(step, &target, report)
            }
            Action::Install { command } => self.install(step, command, report),
        }
    }

    /// Resolve a destination relative to the location, refusing escapes
    fn destination(&self, relative: &Path) -> Result<PathBuf> {
        if relative.as_os_str().is_empty() {
            return Ok(self.location.clone());
        }
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::filesystem(
                relative,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "destination must stay inside the project location",
                ),
            ));
        }
        Ok(self.location.join(relative))
    }

    fn write_file(
        &self,
        step: &'static str,
        target: &Path,
        contents: &[u8],
        report: &mut GenerationReport,
    ) -> Result<()> {
        let status = if target.exists() {
            if target.is_dir() {
                return Err(Error::Conflict {
                    path: target.to_path_buf(),
                });
            }
            let existing = fs::read(target).map_err(|e| Error::filesystem(target, e))?;
            if existing == contents {
                FileStatus::Identical
            } else if self.options.force || report.wrote(&target.display().to_string()) {
                // Later steps may replace what an earlier step of this run wrote
                FileStatus::Force
            } else {
                return Err(Error::Conflict {
                    path: target.to_path_buf(),
                });
            }
        } else {
            FileStatus::Create
        };

        if status != FileStatus::Identical && !self.options.pretend {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
            }
            fs::write(target, contents).map_err(|e| Error::filesystem(target, e))?;
        }

        info!(status = %status, path = %target.display(), "File action");
        report.record(step, status, target.display().to_string());
        Ok(())
    }

    fn create_directory(
        &self,
        step: &'static str,
        target: &Path,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let status = if target.is_dir() {
            FileStatus::Exist
        } else if target.exists() {
            return Err(Error::Conflict {
                path: target.to_path_buf(),
            });
        } else {
            if !self.options.pretend {
                fs::create_dir_all(target).map_err(|e| Error::filesystem(target, e))?;
            }
            FileStatus::Create
        };

        info!(status = %status, path = %target.display(), "Directory action");
        report.record(step, status, target.display().to_string());
        Ok(())
    }

    fn install(
        &self,
        step: &'static str,
        command: &str,
        report: &mut GenerationReport,
    ) -> Result<()> {
        if self.test_mode {
            debug!(command = %command, "Test mode, skipping install command");
            return Ok(());
        }

        if !self.options.pretend {
            info!(
                command = %command,
                location = %self.location.display(),
                "Running install command"
            );
            let result = self.executor.execute(command, &self.location)?;
            if !result.is_success() {
                error!(
                    command = %command,
                    exit_code = result.exit_code,
                    stderr = %result.stderr.trim(),
                    "Install command failed"
                );
                return Err(Error::Subprocess {
                    command: command.to_string(),
                    exit_code: result.exit_code,
                    stderr: result.stderr.trim().to_string(),
                });
            }
            if !result.stdout.trim().is_empty() {
                debug!(command = %command, output = %result.stdout.trim(), "Install output");
            }
        }

        info!(status = %FileStatus::Run, command = %command, "Command action");
        report.record(step, FileStatus::Run, command.to_string());
        Ok(())
    }
}

/// Render a text template with the given context
fn render(asset: &TemplateAsset, context: &Context) -> Result<String> {
    let render_error = |source: tera::Error| Error::Render {
        template: asset.path.clone(),
        source,
    };

    let text = std::str::from_utf8(&asset.contents)
        .map_err(|e| render_error(tera::Error::msg(format!("not valid UTF-8: {e}"))))?;

    let mut tera = Tera::default();
    // Output is never HTML-escaped; locations contain slashes
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(&asset.path, text)
        .map_err(render_error)?;
    tera.render(&asset.path, context).map_err(render_error)
}

/// Final path component of the location, used as the project name
fn project_name(location: &Path) -> String {
    location
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "project".to_string())
}

/// Convert a `/`-separated template path into a relative filesystem path
fn relative_path(path: &str) -> Result<PathBuf> {
    let relative: PathBuf = path.split('/').filter(|part| !part.is_empty()).collect();
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(Error::filesystem(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "template path leaves its directory"),
        ));
    }
    Ok(relative)
}
