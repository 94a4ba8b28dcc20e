//! Manifest construction
//!
//! A manifest is the declarative list of filesystem actions one generation
//! run will perform, grouped into independently completing branches. Building
//! it is pure: nothing here touches the filesystem. Branch and entry order
//! only affects log output; entries are logically independent across
//! branches.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};

use crate::options::{Config, CssEngine, Flavor, ViewEngine};

/// Mode class for a written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Ordinary file
    Regular,
    /// Executable entry point (`bin/www`)
    Executable,
}

/// Where a file entry's content comes from
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Copy a store template verbatim
    Template(String),
    /// Render a store template with handlebars parameters
    Rendered { template: String, params: Value },
    /// Computed content carried inline
    Inline(String),
}

/// One filesystem action
#[derive(Debug, Clone)]
pub enum Entry {
    /// Create a directory and all missing ancestors
    Dir(String),
    /// Write one file
    File {
        path: String,
        source: FileSource,
        mode: FileMode,
    },
    /// Copy every store resource under a key prefix, preserving structure
    Tree { prefix: String, path: String },
}

impl Entry {
    fn file(path: impl Into<String>, source: FileSource) -> Self {
        Self::File {
            path: path.into(),
            source,
            mode: FileMode::Regular,
        }
    }

    fn copy(path: impl Into<String>, template: impl Into<String>) -> Self {
        Self::file(path, FileSource::Template(template.into()))
    }
}

/// An independently completing slice of materialization work
#[derive(Debug, Clone)]
pub struct Branch {
    /// Display name of the subtree
    pub name: &'static str,
    /// Actions executed sequentially within the branch
    pub entries: Vec<Entry>,
}

/// All branches of one generation run
#[derive(Debug, Clone)]
pub struct Manifest {
    pub branches: Vec<Branch>,
}

/// Build the manifest for a resolved configuration.
///
/// # Errors
///
/// Returns an error if the generated package metadata cannot be serialized.
pub fn build(config: &Config) -> Result<Manifest> {
    let branches = match config.flavor {
        Flavor::Simple => simple_branches(config)?,
        Flavor::Fullstack => fullstack_branches(config)?,
    };

    Ok(Manifest { branches })
}

/// Stylesheet filename and template key for the CSS engine choice
const fn stylesheet(css: Option<CssEngine>) -> (&'static str, &'static str) {
    match css {
        None => ("style.css", "css/style.css"),
        Some(CssEngine::Less) => ("style.less", "css/style.less"),
        Some(CssEngine::Stylus) => ("style.styl", "css/style.styl"),
        Some(CssEngine::Compass) => ("style.scss", "css/style.scss"),
        Some(CssEngine::Sass) => ("style.sass", "css/style.sass"),
    }
}

/// npm dependency pulled in by the CSS engine choice
const fn css_dependency(css: CssEngine) -> (&'static str, &'static str) {
    match css {
        CssEngine::Less => ("less-middleware", "~2.2.0"),
        CssEngine::Stylus => ("stylus", "0.54.5"),
        CssEngine::Compass => ("node-compass", "0.2.3"),
        CssEngine::Sass => ("node-sass-middleware", "0.9.8"),
    }
}

/// Middleware wired into the rendered `app.js` for the CSS engine choice:
/// required module variable, npm package, and the `app.use(...)` expression.
const fn css_middleware(css: CssEngine) -> (&'static str, &'static str, &'static str) {
    match css {
        CssEngine::Less => (
            "lessMiddleware",
            "less-middleware",
            "lessMiddleware(path.join(__dirname, 'public'))",
        ),
        CssEngine::Stylus => (
            "stylus",
            "stylus",
            "stylus.middleware(path.join(__dirname, 'public'))",
        ),
        CssEngine::Compass => ("compass", "node-compass", "compass({ mode: 'expanded' })"),
        CssEngine::Sass => (
            "sassMiddleware",
            "node-sass-middleware",
            "sassMiddleware({\n  src: path.join(__dirname, 'public'),\n  dest: path.join(__dirname, 'public'),\n  indentedSyntax: true, // true = .sass and false = .scss\n  sourceMap: true\n})",
        ),
    }
}

/// View files of the simple flavor
const fn simple_views(view: ViewEngine) -> &'static [&'static str] {
    match view {
        ViewEngine::Dust | ViewEngine::Ejs | ViewEngine::Hjs => &["index", "error"],
        ViewEngine::Jade
        | ViewEngine::Hbs
        | ViewEngine::Pug
        | ViewEngine::Twig
        | ViewEngine::Vash => &["index", "layout", "error"],
    }
}

/// npm dependency pulled in by the view engine choice (simple flavor)
const fn simple_view_dependency(view: ViewEngine) -> (&'static str, &'static str) {
    match view {
        ViewEngine::Dust => ("adaro", "~1.0.4"),
        ViewEngine::Ejs => ("ejs", "~2.5.6"),
        ViewEngine::Hbs => ("hbs", "~4.0.1"),
        ViewEngine::Hjs => ("hjs", "~0.0.6"),
        ViewEngine::Jade => ("jade", "~1.11.0"),
        ViewEngine::Pug => ("pug", "~2.0.0-beta11"),
        ViewEngine::Twig => ("twig", "~0.10.3"),
        ViewEngine::Vash => ("vash", "~0.12.2"),
    }
}

/// npm dependency pulled in by the view engine choice (fullstack flavor)
const fn fullstack_view_dependency(view: ViewEngine) -> (&'static str, &'static str) {
    match view {
        ViewEngine::Ejs => ("ejs", "~2.5.6"),
        // resolve() restricts the fullstack flavor to ejs|pug
        _ => ("pug", "^2.0.0-beta11"),
    }
}

/// View files of the fullstack flavor, as (subdirectory, names) groups
const FULLSTACK_VIEWS: &[(&str, &[&str])] = &[
    ("", &["contact", "home", "layout"]),
    ("account", &["forgot", "login", "profile", "reset", "signup"]),
    ("api", &["facebook", "index"]),
    ("partials", &["flash", "footer", "header"]),
];

fn simple_branches(config: &Config) -> Result<Vec<Branch>> {
    let ext = config.view.name();
    let (style_name, style_key) = stylesheet(config.css);

    let bin = Branch {
        name: "bin",
        entries: vec![
            Entry::Dir("bin".into()),
            Entry::File {
                path: "bin/www".into(),
                source: FileSource::Rendered {
                    template: "js/www".into(),
                    params: json!({ "name": config.app_name }),
                },
                mode: FileMode::Executable,
            },
        ],
    };

    let public = Branch {
        name: "public",
        entries: vec![
            Entry::Dir("public".into()),
            Entry::Dir("public/javascripts".into()),
            Entry::Dir("public/images".into()),
            Entry::Dir("public/stylesheets".into()),
            Entry::copy(format!("public/stylesheets/{style_name}"), style_key),
        ],
    };

    let routes = Branch {
        name: "routes",
        entries: vec![
            Entry::Dir("routes".into()),
            Entry::copy("routes/index.js", "js/routes/index.js"),
            Entry::copy("routes/users.js", "js/routes/users.js"),
        ],
    };

    let mut view_entries = vec![Entry::Dir("views".into())];
    for name in simple_views(config.view) {
        view_entries.push(Entry::copy(
            format!("views/{name}.{ext}"),
            format!("{ext}/{name}.{ext}"),
        ));
    }
    let views = Branch {
        name: "views",
        entries: view_entries,
    };

    let mut app_entries = vec![
        Entry::file(
            "package.json",
            FileSource::Inline(simple_package_json(config)?),
        ),
        Entry::file(
            "app.js",
            FileSource::Rendered {
                template: "js/app.js".into(),
                params: app_params(config),
            },
        ),
    ];
    if config.git {
        app_entries.push(Entry::copy(".gitignore", "js/gitignore"));
    }
    let app = Branch {
        name: "app",
        entries: app_entries,
    };

    Ok(vec![bin, public, routes, views, app])
}

/// Handlebars parameters for the rendered `app.js`
fn app_params(config: &Config) -> Value {
    let mut modules = Vec::new();
    let mut uses = Vec::new();

    if let Some(css) = config.css {
        let (variable, package, use_expr) = css_middleware(css);
        modules.push(json!({ "name": variable, "package": package }));
        uses.push(use_expr);
    }

    let view = if config.view == ViewEngine::Dust {
        modules.push(json!({ "name": "adaro", "package": "adaro" }));
        json!({ "engine": "dust", "render": "adaro.dust()" })
    } else {
        json!({ "engine": config.view.name() })
    };

    json!({ "modules": modules, "uses": uses, "view": view })
}

/// Generated npm package metadata, serialized with sorted dependency keys
#[derive(Serialize)]
struct PackageJson {
    name: String,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    private: bool,
    scripts: BTreeMap<&'static str, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jest: Option<Value>,
    dependencies: BTreeMap<&'static str, &'static str>,
    #[serde(rename = "devDependencies", skip_serializing_if = "Option::is_none")]
    dev_dependencies: Option<BTreeMap<&'static str, &'static str>>,
}

impl PackageJson {
    fn render(&self) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(self).context("Failed to serialize package.json")?;
        out.push('\n');
        Ok(out)
    }
}

fn simple_package_json(config: &Config) -> Result<String> {
    let mut dependencies = BTreeMap::from([
        ("body-parser", "~1.17.1"),
        ("cookie-parser", "~1.4.3"),
        ("debug", "~2.6.3"),
        ("express", "~4.15.2"),
        ("morgan", "~1.8.1"),
        ("serve-favicon", "~2.4.2"),
    ]);

    let (name, version) = simple_view_dependency(config.view);
    dependencies.insert(name, version);

    if let Some(css) = config.css {
        let (name, version) = css_dependency(css);
        dependencies.insert(name, version);
    }

    PackageJson {
        name: config.app_name.clone(),
        version: "0.0.0",
        description: None,
        private: true,
        scripts: BTreeMap::from([("start", "node ./bin/www")]),
        jest: None,
        dependencies,
        dev_dependencies: None,
    }
    .render()
}

fn fullstack_branches(config: &Config) -> Result<Vec<Branch>> {
    let ext = config.view.name();
    let (style_name, style_key) = stylesheet(config.css);

    let src = Branch {
        name: "src",
        entries: vec![
            Entry::Dir("src".into()),
            Entry::copy("src/server.ts", "ts/src/server.ts"),
            Entry::Tree {
                prefix: "ts/src/config/".into(),
                path: "src/config".into(),
            },
            Entry::Tree {
                prefix: "ts/src/types/".into(),
                path: "src/types".into(),
            },
        ],
    };

    let public_js = Branch {
        name: "public-js",
        entries: vec![
            Entry::Dir("src/public".into()),
            Entry::Dir("src/public/js".into()),
            Entry::Dir("src/public/images".into()),
            Entry::Dir("src/public/fonts".into()),
            Entry::Tree {
                prefix: "ts/src/public/js/".into(),
                path: "src/public/js".into(),
            },
        ],
    };

    let public_css = Branch {
        name: "public-css",
        entries: vec![
            Entry::Dir("src/public/css".into()),
            Entry::Tree {
                prefix: "ts/src/public/css/".into(),
                path: "src/public/css".into(),
            },
            Entry::copy(format!("src/public/css/{style_name}"), style_key),
        ],
    };

    let mut route_entries = vec![Entry::Dir("src/routes".into())];
    for name in ["account", "api", "contact", "oauth", "root"] {
        route_entries.push(Entry::copy(
            format!("src/routes/{name}.ts"),
            format!("ts/src/routes/{name}.ts"),
        ));
    }
    let routes = Branch {
        name: "routes",
        entries: route_entries,
    };

    let models = Branch {
        name: "models",
        entries: vec![
            Entry::Dir("src/models".into()),
            Entry::copy("src/models/User.ts", "ts/src/models/User.ts"),
        ],
    };

    let mut view_entries = vec![
        Entry::Dir("views".into()),
        Entry::Dir("views/account".into()),
        Entry::Dir("views/api".into()),
        Entry::Dir("views/partials".into()),
    ];
    for (subdir, names) in FULLSTACK_VIEWS {
        for name in *names {
            let (dest, key) = if subdir.is_empty() {
                (
                    format!("views/{name}.{ext}"),
                    format!("ts/views/{ext}/{name}.{ext}"),
                )
            } else {
                (
                    format!("views/{subdir}/{name}.{ext}"),
                    format!("ts/views/{ext}/{subdir}/{name}.{ext}"),
                )
            };
            view_entries.push(Entry::copy(dest, key));
        }
    }
    let views = Branch {
        name: "views",
        entries: view_entries,
    };

    let mut controller_entries = vec![Entry::Dir("src/controllers".into())];
    for name in ["api", "contact", "home", "user"] {
        controller_entries.push(Entry::copy(
            format!("src/controllers/{name}.ts"),
            format!("ts/src/controllers/{name}.ts"),
        ));
    }
    let controllers = Branch {
        name: "controllers",
        entries: controller_entries,
    };

    let mut vscode_entries = vec![Entry::Dir(".vscode".into())];
    for name in ["launch", "settings", "tasks"] {
        vscode_entries.push(Entry::copy(
            format!(".vscode/{name}.json"),
            format!("ts/.vscode/{name}.json"),
        ));
    }
    let vscode = Branch {
        name: "vscode",
        entries: vscode_entries,
    };

    let mut test_entries = vec![Entry::Dir("test".into())];
    for name in ["api", "app", "contact", "home", "user"] {
        test_entries.push(Entry::copy(
            format!("test/{name}.test.ts"),
            format!("ts/test/{name}.test.ts"),
        ));
    }
    let test = Branch {
        name: "test",
        entries: test_entries,
    };

    let mut app_entries = vec![
        Entry::Dir("dist".into()),
        Entry::file(
            "package.json",
            FileSource::Inline(fullstack_package_json(config)?),
        ),
        Entry::copy("README.md", "ts/README.md"),
        Entry::copy("tsconfig.json", "ts/tsconfig.json"),
        Entry::copy("tslint.json", "ts/tslint.json"),
        Entry::copy(".editorconfig", "ts/editorconfig"),
        Entry::copy(".env.example", "ts/env.example"),
        Entry::copy("copyStaticAssets.js", "ts/copyStaticAssets.js"),
    ];
    if config.git {
        app_entries.push(Entry::copy(".gitignore", "ts/gitignore"));
    }
    let app = Branch {
        name: "app",
        entries: app_entries,
    };

    Ok(vec![
        src,
        public_js,
        public_css,
        routes,
        models,
        views,
        controllers,
        vscode,
        test,
        app,
    ])
}

fn fullstack_package_json(config: &Config) -> Result<String> {
    let mut dependencies = BTreeMap::from([
        ("async", "^2.1.2"),
        ("bcrypt-nodejs", "^0.0.3"),
        ("body-parser", "^1.15.2"),
        ("compression", "^1.6.2"),
        ("connect-mongo", "^1.3.2"),
        ("dotenv", "^2.0.0"),
        ("errorhandler", "^1.4.3"),
        ("express", "^4.14.0"),
        ("express-flash", "^0.0.2"),
        ("express-session", "^1.14.2"),
        ("express-validator", "^3.1.3"),
        ("fbgraph", "^1.3.0"),
        ("lodash", "^4.17.4"),
        ("lusca", "^1.4.1"),
        ("mongoose", "^4.6.6"),
        ("morgan", "^1.7.0"),
        ("nodemailer", "^2.6.4"),
        ("passport", "0.3.2"),
        ("passport-facebook", "^2.1.1"),
        ("passport-local", "^1.0.0"),
        ("pug", "^2.0.0-beta11"),
        ("request", "^2.78.0"),
    ]);

    let (name, version) = fullstack_view_dependency(config.view);
    dependencies.insert(name, version);

    if let Some(css) = config.css {
        let (name, version) = css_dependency(css);
        dependencies.insert(name, version);
    }

    let dev_dependencies = BTreeMap::from([
        ("@types/async", "^2.0.40"),
        ("@types/body-parser", "^1.16.2"),
        ("@types/connect-mongo", "0.0.32"),
        ("@types/dotenv", "^2.0.20"),
        ("@types/errorhandler", "0.0.30"),
        ("@types/express", "^4.0.35"),
        ("@types/express-session", "0.0.32"),
        ("@types/jest", "^19.2.2"),
        ("@types/jquery", "^2.0.41"),
        ("@types/lodash", "^4.14.63"),
        ("@types/mongodb", "^2.1.43"),
        ("@types/mongoose", "^4.7.9"),
        ("@types/morgan", "^1.7.32"),
        ("@types/node", "^7.0.12"),
        ("@types/nodemailer", "^1.3.32"),
        ("@types/passport", "^0.3.3"),
        ("@types/passport-facebook", "^2.1.3"),
        ("@types/request", "0.0.42"),
        ("@types/supertest", "^2.0.0"),
        ("concurrently", "^3.4.0"),
        ("jest", "^19.0.2"),
        ("node-sass", "^4.5.2"),
        ("nodemon", "^1.11.0"),
        ("shelljs", "^0.7.7"),
        ("supertest", "^2.0.1"),
        ("ts-jest", "^19.0.8"),
        ("tslint", "^5.0.0"),
        ("typescript", "^2.2.2"),
    ]);

    let jest = json!({
        "globals": { "__TS_CONFIG__": "tsconfig.json" },
        "moduleFileExtensions": ["ts", "js"],
        "transform": { "^.+\\.(ts|tsx)$": "./node_modules/ts-jest/preprocessor.js" },
        "testMatch": ["**/test/**/*.test.(ts|js)"],
        "testEnvironment": "node"
    });

    PackageJson {
        name: config.app_name.clone(),
        version: "0.0.0",
        description: Some("Node server written in TS."),
        private: true,
        scripts: BTreeMap::from([
            ("start", "npm run build && npm run watch"),
            (
                "build",
                "npm run build-sass && npm run build-ts && npm run tslint && npm run copy-static-assets",
            ),
            ("serve", "node dist/server.js"),
            (
                "watch",
                "concurrently -k -p \"[{name}]\" -n \"Sass,TypeScript,Node\" -c \"yellow.bold,cyan.bold,green.bold\" \"npm run watch-sass\" \"npm run watch-ts\" \"nodemon dist/server.js\"",
            ),
            ("test", "jest --forceExit --coverage"),
            ("build-ts", "tsc"),
            ("watch-ts", "tsc -w"),
            (
                "build-sass",
                "node-sass src/public/css/main.scss dist/public/css/main.css",
            ),
            (
                "watch-sass",
                "node-sass -w src/public/css/main.scss dist/public/css/main.css",
            ),
            ("tslint", "tslint -c tslint.json -p tsconfig.json"),
            ("copy-static-assets", "node copyStaticAssets.js"),
        ]),
        jest: Some(jest),
        dependencies,
        dev_dependencies: Some(dev_dependencies),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use std::path::PathBuf;

    fn config(flavor: Flavor, view: ViewEngine, css: Option<CssEngine>) -> Config {
        Config {
            dest: PathBuf::from("demo"),
            app_name: "demo".into(),
            flavor,
            view,
            css,
            git: false,
            force: false,
        }
    }

    fn file_paths(manifest: &Manifest) -> Vec<String> {
        manifest
            .branches
            .iter()
            .flat_map(|branch| &branch.entries)
            .filter_map(|entry| match entry {
                Entry::File { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn simple_view_sets_are_exact() {
        let cases: &[(ViewEngine, &[&str])] = &[
            (ViewEngine::Dust, &["views/index.dust", "views/error.dust"]),
            (ViewEngine::Ejs, &["views/index.ejs", "views/error.ejs"]),
            (ViewEngine::Hjs, &["views/index.hjs", "views/error.hjs"]),
            (
                ViewEngine::Jade,
                &["views/index.jade", "views/layout.jade", "views/error.jade"],
            ),
            (
                ViewEngine::Pug,
                &["views/index.pug", "views/layout.pug", "views/error.pug"],
            ),
            (
                ViewEngine::Vash,
                &["views/index.vash", "views/layout.vash", "views/error.vash"],
            ),
        ];

        for (view, expected) in cases {
            let manifest = build(&config(Flavor::Simple, *view, None)).unwrap();
            let views: Vec<_> = file_paths(&manifest)
                .into_iter()
                .filter(|path| path.starts_with("views/"))
                .collect();
            assert_eq!(&views, expected, "view files for {view:?}");
        }
    }

    #[test]
    fn exactly_one_stylesheet_per_manifest() {
        let cases = [
            (None, "public/stylesheets/style.css"),
            (Some(CssEngine::Less), "public/stylesheets/style.less"),
            (Some(CssEngine::Stylus), "public/stylesheets/style.styl"),
            (Some(CssEngine::Compass), "public/stylesheets/style.scss"),
            (Some(CssEngine::Sass), "public/stylesheets/style.sass"),
        ];

        for (css, expected) in cases {
            let manifest = build(&config(Flavor::Simple, ViewEngine::Jade, css)).unwrap();
            let stylesheets: Vec<_> = file_paths(&manifest)
                .into_iter()
                .filter(|path| path.starts_with("public/stylesheets/"))
                .collect();
            assert_eq!(stylesheets, vec![expected.to_string()]);
        }
    }

    #[test]
    fn package_dependencies_are_sorted() {
        for flavor in [Flavor::Simple, Flavor::Fullstack] {
            let view = match flavor {
                Flavor::Simple => ViewEngine::Vash,
                Flavor::Fullstack => ViewEngine::Ejs,
            };
            let rendered = match flavor {
                Flavor::Simple => {
                    simple_package_json(&config(flavor, view, Some(CssEngine::Sass))).unwrap()
                }
                Flavor::Fullstack => {
                    fullstack_package_json(&config(flavor, view, Some(CssEngine::Sass))).unwrap()
                }
            };

            let parsed: Value = serde_json::from_str(&rendered).unwrap();
            let deps = parsed["dependencies"].as_object().unwrap();
            let keys: Vec<_> = deps.keys().cloned().collect();
            let mut sorted = keys.clone();
            sorted.sort();
            assert_eq!(keys, sorted, "{flavor:?} dependencies must be sorted");

            // the serialized text itself is ordered, not just the parsed map
            let vash = rendered.find("node-sass-middleware").unwrap();
            let first = rendered.find("\"dependencies\"").unwrap();
            assert!(first < vash);
        }
    }

    #[test]
    fn css_dependency_included_exactly_when_selected() {
        let plain = simple_package_json(&config(Flavor::Simple, ViewEngine::Jade, None)).unwrap();
        assert!(!plain.contains("less-middleware"));

        let less =
            simple_package_json(&config(Flavor::Simple, ViewEngine::Jade, Some(CssEngine::Less)))
                .unwrap();
        assert!(less.contains("\"less-middleware\": \"~2.2.0\""));
    }

    #[test]
    fn gitignore_only_with_git_flag() {
        let mut cfg = config(Flavor::Simple, ViewEngine::Jade, None);
        let manifest = build(&cfg).unwrap();
        assert!(!file_paths(&manifest).contains(&".gitignore".to_string()));

        cfg.git = true;
        let manifest = build(&cfg).unwrap();
        assert!(file_paths(&manifest).contains(&".gitignore".to_string()));
    }

    #[test]
    fn dust_wires_the_adaro_renderer() {
        let params = app_params(&config(Flavor::Simple, ViewEngine::Dust, None));
        assert_eq!(params["view"]["engine"], "dust");
        assert_eq!(params["view"]["render"], "adaro.dust()");
        assert_eq!(params["modules"][0]["name"], "adaro");

        let params = app_params(&config(Flavor::Simple, ViewEngine::Pug, None));
        assert_eq!(params["view"]["engine"], "pug");
        assert!(params["view"].get("render").is_none());
    }

    #[test]
    fn css_middleware_flows_into_app_params() {
        let params =
            app_params(&config(Flavor::Simple, ViewEngine::Jade, Some(CssEngine::Stylus)));
        assert_eq!(params["modules"][0]["package"], "stylus");
        assert_eq!(
            params["uses"][0],
            "stylus.middleware(path.join(__dirname, 'public'))"
        );
    }

    #[test]
    fn branch_counts_per_flavor() {
        let manifest = build(&config(Flavor::Simple, ViewEngine::Jade, None)).unwrap();
        assert_eq!(manifest.branches.len(), 5);

        let manifest = build(&config(Flavor::Fullstack, ViewEngine::Pug, None)).unwrap();
        assert_eq!(manifest.branches.len(), 10);
    }

    #[test]
    fn every_referenced_template_resolves() {
        let simple_views = [
            ViewEngine::Dust,
            ViewEngine::Ejs,
            ViewEngine::Hbs,
            ViewEngine::Hjs,
            ViewEngine::Jade,
            ViewEngine::Pug,
            ViewEngine::Twig,
            ViewEngine::Vash,
        ];
        let css_choices = [
            None,
            Some(CssEngine::Less),
            Some(CssEngine::Stylus),
            Some(CssEngine::Compass),
            Some(CssEngine::Sass),
        ];

        let mut configs = Vec::new();
        for view in simple_views {
            for css in css_choices {
                configs.push(config(Flavor::Simple, view, css));
            }
        }
        for view in [ViewEngine::Ejs, ViewEngine::Pug] {
            for css in css_choices {
                configs.push(config(Flavor::Fullstack, view, css));
            }
        }

        for mut cfg in configs {
            cfg.git = true;
            let manifest = build(&cfg).unwrap();
            for entry in manifest.branches.iter().flat_map(|branch| &branch.entries) {
                match entry {
                    Entry::File {
                        source: FileSource::Template(key) | FileSource::Rendered { template: key, .. },
                        path,
                        ..
                    } => {
                        assert!(
                            templates::get(key).is_ok(),
                            "missing template {key} for {path}"
                        );
                    }
                    Entry::Tree { prefix, .. } => {
                        assert!(
                            templates::under(prefix).next().is_some(),
                            "empty template tree {prefix}"
                        );
                    }
                    _ => {}
                }
            }
        }
    }
}
