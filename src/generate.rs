//! Manifest materialization
//!
//! Gates the destination (empty-directory check plus interactive
//! confirmation), executes manifest branches concurrently on scoped threads,
//! and prints the post-generation instructions once every branch has joined.
//! The join is the scope's own set of spawned handles, so the finalization
//! cannot under- or over-fire however many branches the manifest carries.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use console::style;
use handlebars::Handlebars;
use indicatif::{ProgressBar, ProgressStyle};

use crate::manifest::{self, Branch, Entry, FileMode, FileSource, Manifest};
use crate::options::Config;
use crate::templates;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o666;
#[cfg(unix)]
const EXEC_MODE: u32 = 0o755;

/// How a generation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Generation finished (or help was all that was asked for)
    Completed,
    /// The user declined to write into a non-empty destination
    Aborted,
}

/// Executes one generation run against the real filesystem
pub struct Generator {
    config: Config,
    handlebars: Handlebars<'static>,
}

impl Generator {
    /// Create a generator for a resolved configuration
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { config, handlebars }
    }

    /// Run generation end to end.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem or template-rendering failure.
    /// A declined confirmation is not an error; it yields
    /// [`Outcome::Aborted`].
    pub fn execute(&self) -> Result<Outcome> {
        if !self.clear_to_write()? {
            eprintln!("{}", style("aborting").red());
            return Ok(Outcome::Aborted);
        }

        let manifest = manifest::build(&self.config)?;
        self.materialize(&manifest)?;
        self.print_instructions();

        Ok(Outcome::Completed)
    }

    /// Whether materialization may start: empty destination, `--force`, or
    /// an affirmative answer to the overwrite prompt. No filesystem mutation
    /// happens before this returns.
    fn clear_to_write(&self) -> Result<bool> {
        if self.config.force || is_empty_directory(&self.config.dest)? {
            return Ok(true);
        }
        confirm("destination is not empty, continue? [y/N] ")
    }

    /// Execute all branches and block until every one has finished
    fn materialize(&self, manifest: &Manifest) -> Result<()> {
        println!();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Generating project files...");

        // the destination root must exist before any branch starts
        self.ensure_dir(&self.config.dest, &spinner)?;

        let results: Vec<Result<()>> = thread::scope(|scope| {
            let handles: Vec<_> = manifest
                .branches
                .iter()
                .map(|branch| {
                    let spinner = spinner.clone();
                    scope.spawn(move || self.run_branch(branch, &spinner))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(_) => Err(anyhow!("materialization branch panicked")),
                })
                .collect()
        });

        spinner.finish_and_clear();

        for result in results {
            result?;
        }
        Ok(())
    }

    /// Execute one branch's entries in order
    fn run_branch(&self, branch: &Branch, spinner: &ProgressBar) -> Result<()> {
        for entry in &branch.entries {
            match entry {
                Entry::Dir(rel) => self.ensure_dir(&self.config.dest.join(rel), spinner)?,
                Entry::File { path, source, mode } => {
                    let target = self.config.dest.join(path);
                    let content = self.resolve_content(source, path)?;
                    write_file(&target, &content, *mode, spinner)?;
                }
                Entry::Tree { prefix, path } => {
                    self.copy_tree(prefix, &self.config.dest.join(path), spinner)?;
                }
            }
        }
        Ok(())
    }

    /// Produce the final content of a file entry
    fn resolve_content(&self, source: &FileSource, path: &str) -> Result<String> {
        match source {
            FileSource::Template(key) => Ok(templates::get(key)?.to_string()),
            FileSource::Rendered { template, params } => self
                .handlebars
                .render_template(templates::get(template)?, params)
                .with_context(|| format!("Failed to render template: {path}")),
            FileSource::Inline(content) => Ok(content.clone()),
        }
    }

    /// Create a directory and all missing ancestors; existing is fine
    fn ensure_dir(&self, path: &Path, spinner: &ProgressBar) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        set_mode(path, ModeClass::Dir)?;
        report_create(spinner, path);
        Ok(())
    }

    /// Write every store resource under `prefix` below `dest`
    fn copy_tree(&self, prefix: &str, dest: &Path, spinner: &ProgressBar) -> Result<()> {
        for (key, content) in templates::under(prefix) {
            let rel: PathBuf = key[prefix.len()..].split('/').collect();
            let target = dest.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            write_file(&target, content, FileMode::Regular, spinner)?;
        }
        Ok(())
    }

    /// Print install/run instructions, shell syntax per platform
    fn print_instructions(&self) {
        let prompt = if launched_from_cmd() { ">" } else { "$" };
        let dest = self.config.dest.display();
        let name = &self.config.app_name;

        println!();
        println!("   install dependencies:");
        println!("     {prompt} cd {dest} && npm install");
        println!();
        println!("   run the app:");
        if launched_from_cmd() {
            println!("     {prompt} SET DEBUG={name}:* & npm start");
        } else {
            println!("     {prompt} DEBUG={name}:* npm start");
        }
        println!();
    }
}

/// Marker for [`set_mode`]: directory/executable class vs ordinary file
#[derive(Clone, Copy)]
enum ModeClass {
    Dir,
    File,
    Exec,
}

fn write_file(path: &Path, content: &str, mode: FileMode, spinner: &ProgressBar) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    set_mode(
        path,
        match mode {
            FileMode::Regular => ModeClass::File,
            FileMode::Executable => ModeClass::Exec,
        },
    )?;
    report_create(spinner, path);
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, class: ModeClass) -> Result<()> {
    let bits = match class {
        ModeClass::Dir => DIR_MODE,
        ModeClass::File => FILE_MODE,
        ModeClass::Exec => EXEC_MODE,
    };
    fs::set_permissions(path, fs::Permissions::from_mode(bits))
        .with_context(|| format!("Failed to set permissions: {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_mode(_path: &Path, _class: ModeClass) -> Result<()> {
    Ok(())
}

/// One creation-observed event per written path
fn report_create(spinner: &ProgressBar, path: &Path) {
    spinner.println(format!(
        "   {} : {}",
        style("create").cyan(),
        path.display()
    ));
}

/// `true` when the path is missing or an empty directory
fn is_empty_directory(path: &Path) -> Result<bool> {
    match fs::read_dir(path) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read directory: {}", path.display()))
        }
    }
}

/// Prompt on stdout and read one line from stdin; unreadable input declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;

    let mut input = String::new();
    match std::io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => Ok(false),
        Ok(_) => Ok(is_affirmative(input.trim())),
    }
}

/// Affirmative confirmation tokens, case-insensitive
fn is_affirmative(input: &str) -> bool {
    matches!(
        input.to_ascii_lowercase().as_str(),
        "y" | "yes" | "ok" | "true"
    )
}

/// Determine if launched from cmd.exe
fn launched_from_cmd() -> bool {
    cfg!(windows) && std::env::var_os("_").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Branch, Entry, FileMode, FileSource, Manifest};
    use crate::options::{Config, Flavor, ViewEngine};
    use tempfile::TempDir;

    fn generator(dest: &Path) -> Generator {
        Generator::new(Config {
            dest: dest.to_path_buf(),
            app_name: "demo".into(),
            flavor: Flavor::Simple,
            view: ViewEngine::Jade,
            css: None,
            git: false,
            force: false,
        })
    }

    #[test]
    fn affirmative_tokens() {
        for token in ["y", "Y", "yes", "YES", "ok", "OK", "true", "True"] {
            assert!(is_affirmative(token), "should affirm: {token}");
        }
        for token in ["", "n", "no", "nyes", "yess", "truee", "y e s"] {
            assert!(!is_affirmative(token), "should decline: {token}");
        }
    }

    #[test]
    fn missing_path_counts_as_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(is_empty_directory(&tmp.path().join("not-there")).unwrap());
        assert!(is_empty_directory(tmp.path()).unwrap());

        fs::write(tmp.path().join("file"), "x").unwrap();
        assert!(!is_empty_directory(tmp.path()).unwrap());
    }

    #[test]
    fn all_branches_complete_before_materialize_returns() {
        let tmp = TempDir::new().unwrap();
        let generator = generator(tmp.path());

        // more branches than threads the pool would coalesce, to exercise
        // the join across interleavings
        let branches = (0..16)
            .map(|index| Branch {
                name: "branch",
                entries: vec![
                    Entry::Dir(format!("dir-{index}")),
                    Entry::File {
                        path: format!("dir-{index}/file.txt"),
                        source: FileSource::Inline(format!("content {index}")),
                        mode: FileMode::Regular,
                    },
                ],
            })
            .collect();

        for _ in 0..8 {
            generator.materialize(&Manifest { branches: branches.clone() }).unwrap();
            for index in 0..16 {
                let path = tmp.path().join(format!("dir-{index}/file.txt"));
                assert_eq!(
                    fs::read_to_string(&path).unwrap(),
                    format!("content {index}")
                );
            }
        }
    }

    #[test]
    fn branch_errors_propagate() {
        let tmp = TempDir::new().unwrap();
        let generator = generator(tmp.path());

        let manifest = Manifest {
            branches: vec![Branch {
                name: "bad",
                entries: vec![Entry::File {
                    path: "x".into(),
                    source: FileSource::Template("no/such/key".into()),
                    mode: FileMode::Regular,
                }],
            }],
        };

        let err = generator.materialize(&manifest).unwrap_err();
        assert!(err.to_string().contains("no/such/key"));
    }

    #[cfg(unix)]
    #[test]
    fn executable_mode_is_set() {
        let tmp = TempDir::new().unwrap();
        let generator = generator(tmp.path());

        let manifest = Manifest {
            branches: vec![Branch {
                name: "bin",
                entries: vec![
                    Entry::Dir("bin".into()),
                    Entry::File {
                        path: "bin/www".into(),
                        source: FileSource::Inline("#!/usr/bin/env node\n".into()),
                        mode: FileMode::Executable,
                    },
                ],
            }],
        };

        generator.materialize(&manifest).unwrap();
        let mode = fs::metadata(tmp.path().join("bin/www"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
