//! CLI commands

mod bump;
#[cfg(test)]
mod fixtures;
mod input;
mod list;
mod verify;
mod versions;

pub use bump::BumpCommand;
pub use list::ListCommand;
pub use verify::{UnbumpedModules, VerifyCommand};
pub use versions::VersionsCommand;
