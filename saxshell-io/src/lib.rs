//! I/O helpers shared by the saxshell crates.
//!
//! The module can transparently read gzip-compressed input and write either to a file
//! or to one of the standard streams, as decided by the file name given by a user.

mod utils;
mod tokenize;

pub use utils::{open_file, out_writer, can_create_file, read_columns};
pub use tokenize::split_into_tokens;
