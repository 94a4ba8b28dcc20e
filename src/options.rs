//! CLI surface and option resolution

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use console::style;

/// Fallback application name when the destination basename sanitizes to nothing
const DEFAULT_APP_NAME: &str = "hello-world";

/// Generate an Express-style web application project
#[derive(Parser, Debug)]
#[command(name = "express-gen")]
#[command(version)]
#[command(about = "Generate Express-style web application projects", long_about = None)]
pub struct Cli {
    /// Destination directory
    #[arg(value_name = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Application skeleton to generate
    #[arg(long, value_enum, default_value_t = Flavor::Simple)]
    pub flavor: Flavor,

    /// Add view <engine> support (defaults to jade; fullstack defaults to pug)
    #[arg(short = 'v', long, value_enum, value_name = "engine")]
    pub view: Option<ViewEngine>,

    /// Add stylesheet <engine> support (defaults to plain css)
    #[arg(short = 'c', long, value_enum, value_name = "engine")]
    pub css: Option<CssEngine>,

    /// Add .gitignore
    #[arg(long)]
    pub git: bool,

    /// Force on non-empty directory
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Add ejs engine support (deprecated, use --view=ejs)
    #[arg(short = 'e', long)]
    pub ejs: bool,

    /// Add handlebars engine support (deprecated, use --view=hbs)
    #[arg(long)]
    pub hbs: bool,

    /// Add hogan.js engine support (deprecated, use --view=hjs)
    #[arg(short = 'H', long)]
    pub hogan: bool,

    /// Add pug engine support (deprecated, use --view=pug)
    #[arg(long)]
    pub pug: bool,
}

/// Application skeleton generated for the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Flavor {
    /// Classic single-file Express application
    #[default]
    Simple,
    /// TypeScript application with session auth, OAuth and a contact form
    Fullstack,
}

/// View engine of the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewEngine {
    Dust,
    Ejs,
    Hbs,
    Hjs,
    Jade,
    Pug,
    Twig,
    Vash,
}

impl ViewEngine {
    /// Engine name as it appears on the command line and in file extensions
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dust => "dust",
            Self::Ejs => "ejs",
            Self::Hbs => "hbs",
            Self::Hjs => "hjs",
            Self::Jade => "jade",
            Self::Pug => "pug",
            Self::Twig => "twig",
            Self::Vash => "vash",
        }
    }
}

/// CSS pre-processor of the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CssEngine {
    Less,
    Stylus,
    Compass,
    Sass,
}

impl CssEngine {
    /// Engine name as it appears on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::Stylus => "stylus",
            Self::Compass => "compass",
            Self::Sass => "sass",
        }
    }
}

/// Resolved, immutable configuration of one generation run
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination directory of the generated project
    pub dest: PathBuf,
    /// Application name derived from the destination basename
    pub app_name: String,
    /// Application skeleton
    pub flavor: Flavor,
    /// Selected view engine
    pub view: ViewEngine,
    /// Selected CSS pre-processor, `None` for plain CSS
    pub css: Option<CssEngine>,
    /// Include a `.gitignore` in the output
    pub git: bool,
    /// Skip the non-empty-directory confirmation
    pub force: bool,
}

impl Cli {
    /// Resolve parsed flags into a [`Config`].
    ///
    /// Translates deprecated engine aliases (warning on stderr), applies the
    /// flavor's default view engine when none was selected, and rejects view
    /// engines the chosen flavor does not ship templates for.
    ///
    /// # Errors
    ///
    /// Returns an error when the view engine is not available for the
    /// selected flavor.
    pub fn resolve(self) -> Result<Config> {
        let view = self
            .view
            .or_else(|| self.legacy_view())
            .unwrap_or_else(|| self.default_view());

        if self.flavor == Flavor::Fullstack
            && !matches!(view, ViewEngine::Ejs | ViewEngine::Pug)
        {
            bail!(
                "view engine `{}' is not available for the fullstack flavor (use ejs or pug)",
                view.name()
            );
        }

        let app_name = app_name_from_path(&self.dir);

        Ok(Config {
            dest: self.dir,
            app_name,
            flavor: self.flavor,
            view,
            css: self.css,
            git: self.git,
            force: self.force,
        })
    }

    /// Map deprecated boolean engine flags to a view engine.
    ///
    /// First match wins, in the flags' declaration order.
    fn legacy_view(&self) -> Option<ViewEngine> {
        let aliases = [
            (self.ejs, "--ejs", ViewEngine::Ejs),
            (self.hbs, "--hbs", ViewEngine::Hbs),
            (self.hogan, "--hogan", ViewEngine::Hjs),
            (self.pug, "--pug", ViewEngine::Pug),
        ];

        for (set, old_name, engine) in aliases {
            if set {
                warning(&format!(
                    "option `{old_name}' has been renamed to `--view={}'",
                    engine.name()
                ));
                return Some(engine);
            }
        }

        None
    }

    /// Default view engine for the flavor, with a deprecation-style warning
    /// since the choice was made silently.
    fn default_view(&self) -> ViewEngine {
        match self.flavor {
            Flavor::Simple => {
                warning(
                    "the default view engine will not be jade in future releases\n\
                     use `--view=jade' or `--help' for additional options",
                );
                ViewEngine::Jade
            }
            Flavor::Fullstack => {
                warning("using default view engine pug.\nuse `--help' for additional options");
                ViewEngine::Pug
            }
        }
    }
}

/// Print a non-fatal warning to stderr
pub fn warning(message: &str) {
    eprintln!();
    for line in message.lines() {
        eprintln!("  {} {line}", style("warning:").yellow());
    }
    eprintln!();
}

/// Derive the application name from the destination path's basename
fn app_name_from_path(dir: &Path) -> String {
    let resolved = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let base = resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = sanitize_app_name(&base);
    if name.is_empty() {
        DEFAULT_APP_NAME.to_string()
    } else {
        name
    }
}

/// Collapse runs of disallowed characters to a single hyphen, strip leading
/// separators and trailing hyphens, and lower-case the result.
fn sanitize_app_name(base: &str) -> String {
    let mut collapsed = String::with_capacity(base.len());
    let mut in_gap = false;

    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '(' | ')' | '~' | '*' | '\'' | '-') {
            if in_gap {
                collapsed.push('-');
                in_gap = false;
            }
            collapsed.push(ch.to_ascii_lowercase());
        } else {
            in_gap = true;
        }
    }
    if in_gap {
        collapsed.push('-');
    }

    collapsed
        .trim_start_matches(['-', '_', '.'])
        .trim_end_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("express-gen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn sanitizes_punctuation_to_hyphens() {
        assert_eq!(sanitize_app_name("My Cool App!"), "my-cool-app");
        assert_eq!(sanitize_app_name("foo_bar"), "foo-bar");
        assert_eq!(sanitize_app_name("hello  world"), "hello-world");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(sanitize_app_name("my.project"), "my.project");
        assert_eq!(sanitize_app_name("it's-fine"), "it's-fine");
    }

    #[test]
    fn trims_leading_separators_and_trailing_hyphens() {
        assert_eq!(sanitize_app_name(".hidden"), "hidden");
        assert_eq!(sanitize_app_name("--app--"), "app");
        assert_eq!(sanitize_app_name("_private"), "private");
    }

    #[test]
    fn empty_sanitization_falls_back_to_default() {
        assert_eq!(sanitize_app_name("!!!"), "");
        assert_eq!(app_name_from_path(Path::new("!!!")), DEFAULT_APP_NAME);
    }

    #[test]
    fn explicit_view_wins_over_aliases() {
        let config = cli(&["--view", "twig", "--pug", "app"]).resolve().unwrap();
        assert_eq!(config.view, ViewEngine::Twig);
    }

    #[test]
    fn first_matching_alias_wins() {
        let config = cli(&["-e", "--pug", "app"]).resolve().unwrap();
        assert_eq!(config.view, ViewEngine::Ejs);

        let config = cli(&["--hbs", "--pug", "app"]).resolve().unwrap();
        assert_eq!(config.view, ViewEngine::Hbs);

        let config = cli(&["-H", "app"]).resolve().unwrap();
        assert_eq!(config.view, ViewEngine::Hjs);
    }

    #[test]
    fn flavor_defaults() {
        let config = cli(&["app"]).resolve().unwrap();
        assert_eq!(config.flavor, Flavor::Simple);
        assert_eq!(config.view, ViewEngine::Jade);
        assert!(config.css.is_none());

        let config = cli(&["--flavor", "fullstack", "app"]).resolve().unwrap();
        assert_eq!(config.view, ViewEngine::Pug);
    }

    #[test]
    fn fullstack_rejects_unsupported_views() {
        for engine in ["dust", "hbs", "hjs", "jade", "twig", "vash"] {
            let result = cli(&["--flavor", "fullstack", "--view", engine, "app"]).resolve();
            assert!(result.is_err(), "engine should be rejected: {engine}");
        }
        for engine in ["ejs", "pug"] {
            let result = cli(&["--flavor", "fullstack", "--view", engine, "app"]).resolve();
            assert!(result.is_ok(), "engine should be accepted: {engine}");
        }
    }

    #[test]
    fn unknown_engines_fail_to_parse() {
        let result = Cli::try_parse_from(["express-gen", "--view", "haml", "app"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["express-gen", "--css", "postcss", "app"]);
        assert!(result.is_err());
    }
}
