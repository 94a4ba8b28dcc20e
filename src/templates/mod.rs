//! Embedded template resources
//!
//! Every file the generator can emit lives here as a named constant,
//! addressed through a logical key (`"css/style.less"`, `"jade/index.jade"`,
//! `"ts/src/server.ts"`). The store is read-only; a handful of resources are
//! handlebars templates rendered with per-run parameters, the rest are
//! copied verbatim.

use anyhow::{anyhow, Result};

pub mod app;
pub mod css;
pub mod site;
pub mod site_views;
pub mod views;

/// Logical key to resource content
static TEMPLATES: &[(&str, &str)] = &[
    // stylesheets
    ("css/style.css", css::STYLE_CSS),
    ("css/style.less", css::STYLE_LESS),
    ("css/style.styl", css::STYLE_STYL),
    ("css/style.scss", css::STYLE_SCSS),
    ("css/style.sass", css::STYLE_SASS),
    // simple flavor application
    ("js/app.js", app::APP_JS),
    ("js/www", app::WWW),
    ("js/routes/index.js", app::ROUTES_INDEX),
    ("js/routes/users.js", app::ROUTES_USERS),
    ("js/gitignore", app::GITIGNORE),
    // simple flavor views
    ("dust/index.dust", views::DUST_INDEX),
    ("dust/error.dust", views::DUST_ERROR),
    ("ejs/index.ejs", views::EJS_INDEX),
    ("ejs/error.ejs", views::EJS_ERROR),
    ("hbs/index.hbs", views::HBS_INDEX),
    ("hbs/layout.hbs", views::HBS_LAYOUT),
    ("hbs/error.hbs", views::HBS_ERROR),
    ("hjs/index.hjs", views::HJS_INDEX),
    ("hjs/error.hjs", views::HJS_ERROR),
    ("jade/index.jade", views::JADE_INDEX),
    ("jade/layout.jade", views::JADE_LAYOUT),
    ("jade/error.jade", views::JADE_ERROR),
    ("pug/index.pug", views::PUG_INDEX),
    ("pug/layout.pug", views::PUG_LAYOUT),
    ("pug/error.pug", views::PUG_ERROR),
    ("twig/index.twig", views::TWIG_INDEX),
    ("twig/layout.twig", views::TWIG_LAYOUT),
    ("twig/error.twig", views::TWIG_ERROR),
    ("vash/index.vash", views::VASH_INDEX),
    ("vash/layout.vash", views::VASH_LAYOUT),
    ("vash/error.vash", views::VASH_ERROR),
    // fullstack flavor application
    ("ts/src/server.ts", site::SERVER_TS),
    ("ts/src/routes/account.ts", site::ROUTE_ACCOUNT),
    ("ts/src/routes/api.ts", site::ROUTE_API),
    ("ts/src/routes/contact.ts", site::ROUTE_CONTACT),
    ("ts/src/routes/oauth.ts", site::ROUTE_OAUTH),
    ("ts/src/routes/root.ts", site::ROUTE_ROOT),
    ("ts/src/controllers/api.ts", site::CONTROLLER_API),
    ("ts/src/controllers/contact.ts", site::CONTROLLER_CONTACT),
    ("ts/src/controllers/home.ts", site::CONTROLLER_HOME),
    ("ts/src/controllers/user.ts", site::CONTROLLER_USER),
    ("ts/src/models/User.ts", site::MODEL_USER),
    ("ts/src/config/passport.ts", site::CONFIG_PASSPORT),
    ("ts/src/types/express-flash.d.ts", site::TYPES_EXPRESS_FLASH),
    ("ts/src/types/fbgraph.d.ts", site::TYPES_FBGRAPH),
    ("ts/src/public/js/main.js", site::PUBLIC_MAIN_JS),
    ("ts/src/public/css/main.scss", site::PUBLIC_MAIN_SCSS),
    ("ts/.vscode/launch.json", site::VSCODE_LAUNCH),
    ("ts/.vscode/settings.json", site::VSCODE_SETTINGS),
    ("ts/.vscode/tasks.json", site::VSCODE_TASKS),
    ("ts/test/api.test.ts", site::TEST_API),
    ("ts/test/app.test.ts", site::TEST_APP),
    ("ts/test/contact.test.ts", site::TEST_CONTACT),
    ("ts/test/home.test.ts", site::TEST_HOME),
    ("ts/test/user.test.ts", site::TEST_USER),
    ("ts/README.md", site::README_MD),
    ("ts/tsconfig.json", site::TSCONFIG_JSON),
    ("ts/tslint.json", site::TSLINT_JSON),
    ("ts/editorconfig", site::EDITORCONFIG),
    ("ts/env.example", site::ENV_EXAMPLE),
    ("ts/copyStaticAssets.js", site::COPY_STATIC_ASSETS),
    ("ts/gitignore", site::GITIGNORE),
    // fullstack flavor views, pug
    ("ts/views/pug/contact.pug", site_views::PUG_CONTACT),
    ("ts/views/pug/home.pug", site_views::PUG_HOME),
    ("ts/views/pug/layout.pug", site_views::PUG_LAYOUT),
    ("ts/views/pug/account/forgot.pug", site_views::PUG_FORGOT),
    ("ts/views/pug/account/login.pug", site_views::PUG_LOGIN),
    ("ts/views/pug/account/profile.pug", site_views::PUG_PROFILE),
    ("ts/views/pug/account/reset.pug", site_views::PUG_RESET),
    ("ts/views/pug/account/signup.pug", site_views::PUG_SIGNUP),
    ("ts/views/pug/api/facebook.pug", site_views::PUG_API_FACEBOOK),
    ("ts/views/pug/api/index.pug", site_views::PUG_API_INDEX),
    ("ts/views/pug/partials/flash.pug", site_views::PUG_FLASH),
    ("ts/views/pug/partials/footer.pug", site_views::PUG_FOOTER),
    ("ts/views/pug/partials/header.pug", site_views::PUG_HEADER),
    // fullstack flavor views, ejs
    ("ts/views/ejs/contact.ejs", site_views::EJS_CONTACT),
    ("ts/views/ejs/home.ejs", site_views::EJS_HOME),
    ("ts/views/ejs/layout.ejs", site_views::EJS_LAYOUT),
    ("ts/views/ejs/account/forgot.ejs", site_views::EJS_FORGOT),
    ("ts/views/ejs/account/login.ejs", site_views::EJS_LOGIN),
    ("ts/views/ejs/account/profile.ejs", site_views::EJS_PROFILE),
    ("ts/views/ejs/account/reset.ejs", site_views::EJS_RESET),
    ("ts/views/ejs/account/signup.ejs", site_views::EJS_SIGNUP),
    ("ts/views/ejs/api/facebook.ejs", site_views::EJS_API_FACEBOOK),
    ("ts/views/ejs/api/index.ejs", site_views::EJS_API_INDEX),
    ("ts/views/ejs/partials/flash.ejs", site_views::EJS_FLASH),
    ("ts/views/ejs/partials/footer.ejs", site_views::EJS_FOOTER),
    ("ts/views/ejs/partials/header.ejs", site_views::EJS_HEADER),
];

/// Look a resource up by its logical key.
///
/// # Errors
///
/// Returns an error for a key the store does not carry.
pub fn get(key: &str) -> Result<&'static str> {
    TEMPLATES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, content)| *content)
        .ok_or_else(|| anyhow!("unknown template: {key}"))
}

/// All resources whose key starts with `prefix`, for tree copies
pub fn under(prefix: &str) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
    TEMPLATES
        .iter()
        .filter(move |(name, _)| name.starts_with(prefix))
        .map(|&(name, content)| (name, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = TEMPLATES.iter().map(|(name, _)| *name).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TEMPLATES.len());
    }

    #[test]
    fn lookup_hits_and_misses() {
        assert!(get("css/style.css").is_ok());
        assert!(get("jade/index.jade").is_ok());
        assert!(get("no/such/key").is_err());
    }

    #[test]
    fn prefix_enumeration_preserves_namespacing() {
        let css: Vec<_> = under("ts/src/public/css/").collect();
        assert_eq!(css.len(), 1);
        assert_eq!(css[0].0, "ts/src/public/css/main.scss");

        assert_eq!(under("ts/src/config/").count(), 1);
        assert!(under("ts/src/types/").count() >= 1);
        assert_eq!(under("nothing/here/").count(), 0);
    }

    #[test]
    fn no_resource_is_empty() {
        for (key, content) in TEMPLATES {
            assert!(!content.is_empty(), "empty template: {key}");
        }
    }
}
