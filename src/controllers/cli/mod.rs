//! Controllers behind the command line front-end.

mod basin;
mod iterate;

pub use basin::{BasinCliController, BasinCliError};
pub use iterate::{IterateCliController, IterateCliError};
