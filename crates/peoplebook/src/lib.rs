//! `peoplebook` - A small personal-record manager
//!
//! This library keeps a list of people (name, gender, height) in a local JSON
//! file and provides the validation, query and aggregate operations behind the
//! interactive `peoplebook` menu.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod roster;
pub mod shell;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Gender, Record};
pub use roster::{AverageHeight, Roster};
pub use shell::Shell;
pub use storage::{Loaded, Recovery, Store};
pub use validate::{NamePolicy, Validator};
