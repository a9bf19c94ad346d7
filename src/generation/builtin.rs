//! Generators shipped with the binary

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::GeneratorOptions;
use crate::generation::{Action, Blueprint, GeneratorDescriptor, Step};

/// Every built-in generator, in registration order
pub fn builtin_generators() -> Vec<GeneratorDescriptor> {
    vec![
        Arc::new(DefaultBlueprint) as GeneratorDescriptor,
        Arc::new(Html5Blueprint),
        Arc::new(EmptyBlueprint),
    ]
}

fn source_dir(sub: &str) -> PathBuf {
    PathBuf::from("source").join(sub)
}

/// Starter site with a layout, stylesheets and a script
pub struct DefaultBlueprint;

impl Blueprint for DefaultBlueprint {
    fn name(&self) -> &str {
        "default"
    }

    fn description(&self) -> &str {
        "Starter site with a layout, stylesheets and javascript"
    }

    fn steps(&self, options: &GeneratorOptions) -> Vec<Step> {
        let css = source_dir(&options.css_dir);
        let js = source_dir(&options.js_dir);

        vec![
            Step::always("scaffold", Action::render("shared/config.tt", "config.rb")),
            Step::always(
                "scaffold",
                Action::copy(
                    "default/source/index.html.erb",
                    "source/index.html.erb",
                ),
            ),
            Step::always(
                "scaffold",
                Action::copy(
                    "default/source/layouts/layout.erb",
                    "source/layouts/layout.erb",
                ),
            ),
            Step::always(
                "scaffold",
                Action::copy("default/source/stylesheets/all.css", css.join("all.css")),
            ),
            Step::always(
                "scaffold",
                Action::copy(
                    "default/source/stylesheets/normalize.css",
                    css.join("normalize.css"),
                ),
            ),
            Step::always(
                "scaffold",
                Action::copy("default/source/javascripts/all.js", js.join("all.js")),
            ),
            Step::always(
                "scaffold",
                Action::empty_directory(source_dir(&options.images_dir)),
            ),
        ]
    }
}

/// HTML5 boilerplate site
pub struct Html5Blueprint;

impl Blueprint for Html5Blueprint {
    fn name(&self) -> &str {
        "html5"
    }

    fn description(&self) -> &str {
        "HTML5 boilerplate with humans.txt and robots.txt"
    }

    fn steps(&self, _options: &GeneratorOptions) -> Vec<Step> {
        vec![
            Step::always("scaffold", Action::render("shared/config.tt", "config.rb")),
            Step::always("scaffold", Action::directory("html5/source", "source")),
        ]
    }
}

/// Bare project: a Gemfile and an empty source directory
pub struct EmptyBlueprint;

impl Blueprint for EmptyBlueprint {
    fn name(&self) -> &str {
        "empty"
    }

    fn description(&self) -> &str {
        "Gemfile and an empty source directory"
    }

    fn gemfile_template(&self) -> &str {
        "empty/Gemfile.tt"
    }

    fn steps(&self, _options: &GeneratorOptions) -> Vec<Step> {
        vec![Step::always("scaffold", Action::empty_directory("source"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Settings;
    use crate::core::error::{Error, ErrorKind};
    use crate::generation::ProjectGenerator;
    use crate::infrastructure::shell::MockCommandExecutor;
    use std::fs;
    use tempfile::TempDir;

    fn generate(blueprint: GeneratorDescriptor, options: GeneratorOptions) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            templates_dir: None,
            test_mode: true,
        };
        ProjectGenerator::new(
            blueprint,
            temp_dir.path(),
            options,
            &settings,
            Arc::new(MockCommandExecutor::new()),
        )
        .unwrap()
        .generate()
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_builtin_names() {
        let names: Vec<String> = builtin_generators()
            .iter()
            .map(|g| g.name().to_string())
            .collect();
        assert_eq!(names, vec!["default", "html5", "empty"]);
    }

    #[test]
    fn test_default_layout() {
        let project = generate(Arc::new(DefaultBlueprint), GeneratorOptions::default());
        let root = project.path();

        for file in [
            "Gemfile",
            ".gitignore",
            "config.rb",
            "source/index.html.erb",
            "source/layouts/layout.erb",
            "source/stylesheets/all.css",
            "source/stylesheets/normalize.css",
            "source/javascripts/all.js",
        ] {
            assert!(root.join(file).is_file(), "missing {file}");
        }
        assert!(root.join("source/images").is_dir());
    }

    #[test]
    fn test_default_honours_asset_directories() {
        let options = GeneratorOptions {
            css_dir: "css".to_string(),
            js_dir: "js".to_string(),
            images_dir: "img".to_string(),
            ..Default::default()
        };
        let project = generate(Arc::new(DefaultBlueprint), options);
        let root = project.path();

        assert!(root.join("source/css/all.css").is_file());
        assert!(root.join("source/js/all.js").is_file());
        assert!(root.join("source/img").is_dir());

        let config = fs::read_to_string(root.join("config.rb")).unwrap();
        assert!(config.contains("set :css_dir, 'css'"));
        assert!(config.contains("set :js_dir, 'js'"));
        assert!(config.contains("set :images_dir, 'img'"));
    }

    #[test]
    fn test_asset_directory_cannot_leave_source() {
        let temp_dir = TempDir::new().unwrap();
        let location = temp_dir.path().join("site");
        let settings = Settings {
            templates_dir: None,
            test_mode: true,
        };
        let options = GeneratorOptions {
            css_dir: "../x".to_string(),
            ..Default::default()
        };

        let error = ProjectGenerator::new(
            Arc::new(DefaultBlueprint),
            &location,
            options,
            &settings,
            Arc::new(MockCommandExecutor::new()),
        )
        .unwrap()
        .generate()
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Filesystem);
        match error {
            Error::Filesystem { path, .. } => {
                assert_eq!(path, PathBuf::from("source/../x/all.css"))
            }
            other => panic!("Expected Filesystem error, got {other:?}"),
        }
        assert!(!temp_dir.path().join("x").exists());
    }

    #[test]
    fn test_html5_copies_source_tree() {
        let project = generate(Arc::new(Html5Blueprint), GeneratorOptions::default());
        let root = project.path();

        assert!(root.join("config.rb").is_file());
        assert!(root.join("source/index.html.erb").is_file());
        assert!(root.join("source/layouts/layout.erb").is_file());
        assert!(root.join("source/humans.txt").is_file());
        assert!(root.join("source/robots.txt").is_file());
    }

    #[test]
    fn test_empty_uses_its_own_gemfile() {
        let project = generate(Arc::new(EmptyBlueprint), GeneratorOptions::default());
        let root = project.path();

        let gemfile = fs::read_to_string(root.join("Gemfile")).unwrap();
        assert!(gemfile.contains("gem \"middleman\""));
        assert!(!gemfile.contains("middleman-livereload"));
        assert!(root.join("source").is_dir());
        assert!(!root.join("config.rb").exists());
    }
}
