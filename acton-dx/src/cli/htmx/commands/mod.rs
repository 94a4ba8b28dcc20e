//! CLI command implementations

pub mod db;
pub mod deploy;
pub mod dev;
pub mod generate;
pub mod jobs;
pub mod new;
pub mod oauth2;
pub mod scaffold;
pub mod templates;

pub use db::DbCommand;
pub use deploy::DeployCommand;
pub use dev::DevCommand;
pub use generate::GenerateCommand;
pub use jobs::JobsCommand;
pub use new::NewCommand;
pub use oauth2::OAuth2Command;
pub use scaffold::ScaffoldCommand;
pub use templates::TemplatesCommand;
