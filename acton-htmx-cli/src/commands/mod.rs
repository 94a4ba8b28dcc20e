//! CLI command implementations

pub mod db;
pub mod dev;
pub mod new;
pub mod scaffold;

pub use db::DbCommand;
pub use dev::DevCommand;
pub use new::NewCommand;
pub use scaffold::ScaffoldCommand;
