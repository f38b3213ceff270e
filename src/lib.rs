//! Process-wide, level-tagged loggers configured once at startup
//!
//! A program calls [`init`] before doing anything else. The argument is a single flag that says
//! whether debug output should appear. After that, five named loggers are available anywhere in
//! the process:
//! * `Debug`, prefixed `DEBUG: `, writes to standard output, or nowhere when debugging is off
//! * `Info`, prefixed `INFO: `, writes to standard output
//! * `Warning`, prefixed `WARNING: `, writes to standard output
//! * `Error`, prefixed `ERROR: `, writes to standard error
//! * `Stdout` writes the bare message to standard output
//!
//! The first four annotate every line with the date, the time and the short source location
//! of the call site. Write through them with the [`debug!`], [`info!`], [`warning!`],
//! [`error!`] and [`stdout!`] macros, or with [`Handle::write`].
//!
//! The loggers are backed by `log4rs`. Calling [`init`] again swaps the whole configuration
//! in place. Programs that would rather pass logging around explicitly can build a
//! [`LoggerRegistry`] and a [`RegistryLogger`] themselves. The [`runner`] module reads the debug
//! flag from the command line.
pub mod error;
pub mod log;
pub mod runner;

pub use crate::error::LogError;
pub use crate::log::{
    current, init, is_initialized, try_init, Handle, LoggerRegistry, RegistryLogger, Sink,
};
