pub mod block;
pub mod cli;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod migrate;
pub mod path_expander;
pub mod patterns;
pub mod permissions;
pub mod scanner;
pub mod token;

pub use config::Config;
pub use dispatch::rewrite_file;
pub use document::{rewrite_all_blocks, rewrite_provider_declarations};
pub use error::MigrationError;
