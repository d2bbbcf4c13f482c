//! Filesystem helpers for the command-line front end.
//!
//! - [`file_status`]: regular-file / directory checks, metadata propagation
//! - [`file_list`]: recursive input expansion

pub mod file_list;
pub mod file_status;

pub use file_list::create_file_list;
pub use file_status::{is_directory, is_reg_file, set_file_stat};
