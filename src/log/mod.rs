//! The `log` module sets up the five process-wide loggers: `Debug`, `Info`, `Warning`, `Error`
//! and `Stdout`. Each one is bound to a fixed prefix and an output sink. Loggers are installed by
//! calling [`init`] once at startup:
//!
//! ```rust,no_run
//! use log_registry::{debug, error, info, stdout, warning};
//!
//! fn main() {
//!     // `true` routes debug messages to standard output, `false` discards them.
//!     log_registry::init(true);
//!
//!     debug!("loaded {} entries", 3);
//!     info!("starting");
//!     warning!("cache is cold");
//!     error!("upstream unavailable");
//!     stdout!("plain text, no prefix");
//! }
//! ```
//!
//! Every handle except `Stdout` annotates its lines with the date, the time and the short
//! source location of the call site:
//!
//! ```text
//! DEBUG: 2024/01/23 01:23:23 main.rs:9: loaded 3 entries
//! ```
//!
//! `Error` always writes to standard error. Every other handle writes to standard output,
//! except `Debug`, whose output is discarded unless debugging was enabled.
//!
//! Writing through a handle before [`init`] has been called does nothing.
//!
//! Components that would rather not rely on global state can build a [`LoggerRegistry`] and a
//! [`RegistryLogger`] explicitly and pass them around.

mod short_file_encoder;
mod standard_logger;

use std::fmt;
use std::panic::Location;
use std::sync::LazyLock;
use std::sync::{Mutex, MutexGuard};

pub use log::{Level, LevelFilter};
use log::{Log, Record};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::Append;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::Encode;
use log4rs::{Config, Handle as Log4rsHandle};

use crate::error::LogError;
use short_file_encoder::ShortFileEncoder;

// Used by the exported macros.
#[doc(hidden)]
pub use log as __log;

/// Target names used to route records to their handle. They are namespaced so that records
/// from a crate named `info` or `error` are not mistaken for handle output.
pub const DEBUG_TARGET: &str = "log_registry::debug";
pub const INFO_TARGET: &str = "log_registry::info";
pub const WARNING_TARGET: &str = "log_registry::warning";
pub const ERROR_TARGET: &str = "log_registry::error";
pub const STDOUT_TARGET: &str = "log_registry::stdout";

// Local date and time followed by the short source location.
const ANNOTATION_PATTERN: &str = "{d(%Y/%m/%d %H:%M:%S)} {f}:{L}: ";
const MESSAGE_PATTERN: &str = "{m}{n}";

/// The global registry. It is written only by [`init`] and [`try_init`].
static LOG_REGISTRY: LazyLock<Mutex<GlobalRegistry>> = LazyLock::new(Mutex::default);

/// One of the five named loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Debug,
    Info,
    Warning,
    Error,
    Stdout,
}

impl Handle {
    pub const ALL: [Handle; 5] = [
        Handle::Debug,
        Handle::Info,
        Handle::Warning,
        Handle::Error,
        Handle::Stdout,
    ];

    /// The literal text written at the start of every line.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Handle::Debug => "DEBUG: ",
            Handle::Info => "INFO: ",
            Handle::Warning => "WARNING: ",
            Handle::Error => "ERROR: ",
            Handle::Stdout => "",
        }
    }

    /// The `log` target records for this handle are emitted with.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Handle::Debug => DEBUG_TARGET,
            Handle::Info => INFO_TARGET,
            Handle::Warning => WARNING_TARGET,
            Handle::Error => ERROR_TARGET,
            Handle::Stdout => STDOUT_TARGET,
        }
    }

    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Handle::Debug => Level::Debug,
            Handle::Info | Handle::Stdout => Level::Info,
            Handle::Warning => Level::Warn,
            Handle::Error => Level::Error,
        }
    }

    /// Whether lines carry the date, time and source location.
    #[must_use]
    pub const fn annotated(self) -> bool {
        !matches!(self, Handle::Stdout)
    }

    /// Writes a message through the globally installed logger, recording the caller's
    /// location. Does nothing if [`init`] has not been called.
    #[track_caller]
    pub fn write(self, args: fmt::Arguments<'_>) {
        write_record(log::logger(), self, args, Location::caller());
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handle::Debug => "Debug",
            Handle::Info => "Info",
            Handle::Warning => "Warning",
            Handle::Error => "Error",
            Handle::Stdout => "Stdout",
        };
        f.write_str(name)
    }
}

/// Where a handle's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    /// Accepts every write and produces nothing.
    Discard,
    Stdout,
    Stderr,
}

/// The handle-to-sink bindings chosen at startup. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerRegistry {
    debug: bool,
}

impl LoggerRegistry {
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    #[must_use]
    pub const fn debug_enabled(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub const fn sink(&self, handle: Handle) -> Sink {
        match handle {
            Handle::Debug if self.debug => Sink::Stdout,
            Handle::Debug => Sink::Discard,
            Handle::Error => Sink::Stderr,
            Handle::Info | Handle::Warning | Handle::Stdout => Sink::Stdout,
        }
    }

    /// The `log4rs` pattern used to format lines for `handle`.
    #[must_use]
    pub fn pattern(&self, handle: Handle) -> String {
        // Prefixes contain no pattern metacharacters.
        let mut pattern = handle.prefix().to_owned();
        if handle.annotated() {
            pattern.push_str(ANNOTATION_PATTERN);
        }
        pattern.push_str(MESSAGE_PATTERN);
        pattern
    }

    /// Builds a `log4rs` configuration with one non-additive logger per handle.
    /// `make_appender` provides the appender for every handle whose sink is not
    /// [`Sink::Discard`]. Discarded handles get no appender and are switched off.
    ///
    /// # Errors
    /// Returns an error if `log4rs` rejects the assembled configuration.
    pub fn build_config<F>(&self, mut make_appender: F) -> Result<Config, LogError>
    where
        F: FnMut(Sink, Box<dyn Encode>) -> Box<dyn Append>,
    {
        let mut config = Config::builder();

        for handle in Handle::ALL {
            let logger = Logger::builder().additive(false);
            let logger = match self.sink(handle) {
                Sink::Discard => logger.build(handle.target(), LevelFilter::Off),
                sink => {
                    let encoder: Box<dyn Encode> =
                        Box::new(ShortFileEncoder::with_pattern(&self.pattern(handle)));
                    let appender = make_appender(sink, encoder);
                    config = config.appender(Appender::builder().build(handle.target(), appender));
                    logger
                        .appender(handle.target())
                        .build(handle.target(), handle.level().to_level_filter())
                }
            };
            config = config.logger(logger);
        }

        // Records for any other target are dropped.
        let root = Root::builder().build(LevelFilter::Off);
        Ok(config.build(root)?)
    }

    /// The configuration that writes to the process's standard streams.
    ///
    /// # Errors
    /// Returns an error if `log4rs` rejects the assembled configuration.
    pub fn console_config(&self) -> Result<Config, LogError> {
        self.build_config(console_appender)
    }

    /// Builds a logger for this registry without installing it globally.
    ///
    /// # Errors
    /// Returns an error if `log4rs` rejects the assembled configuration.
    pub fn build_logger(&self) -> Result<RegistryLogger, LogError> {
        Ok(RegistryLogger::new(*self, self.console_config()?))
    }
}

fn console_appender(sink: Sink, encoder: Box<dyn Encode>) -> Box<dyn Append> {
    let target = match sink {
        Sink::Stderr => Target::Stderr,
        Sink::Stdout | Sink::Discard => Target::Stdout,
    };
    Box::new(ConsoleAppender::builder().encoder(encoder).target(target).build())
}

/// A logger bound to a [`LoggerRegistry`] that is not installed globally. Use it to hand
/// logging explicitly to the components that need it.
pub struct RegistryLogger {
    registry: LoggerRegistry,
    logger: log4rs::Logger,
}

impl fmt::Debug for RegistryLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLogger")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl RegistryLogger {
    /// Wraps an already built configuration.
    #[must_use]
    pub fn new(registry: LoggerRegistry, config: Config) -> Self {
        Self {
            registry,
            logger: log4rs::Logger::new(config),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    /// Writes a message through `handle`, recording the caller's location.
    #[track_caller]
    pub fn write(&self, handle: Handle, args: fmt::Arguments<'_>) {
        write_record(&self.logger, handle, args, Location::caller());
    }

    pub fn flush(&self) {
        Log::flush(&self.logger);
    }
}

fn write_record(
    logger: &dyn Log,
    handle: Handle,
    args: fmt::Arguments<'_>,
    location: &'static Location<'static>,
) {
    logger.log(
        &Record::builder()
            .args(args)
            .level(handle.level())
            .target(handle.target())
            .file_static(Some(location.file()))
            .line(Some(location.line()))
            .build(),
    );
}

/// Process-wide logging state: the registry last installed and the handle used to swap the
/// `log4rs` configuration when [`init`] is called again.
#[derive(Default)]
pub(in crate::log) struct GlobalRegistry {
    pub(in crate::log) registry: Option<LoggerRegistry>,
    root_handle: Option<Log4rsHandle>,
}

impl fmt::Debug for GlobalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalRegistry")
            .field("registry", &self.registry)
            .field("installed", &self.root_handle.is_some())
            .finish()
    }
}

// The public API

/// Installs the five loggers. Debug output goes to standard output if `debug` is true and is
/// discarded otherwise. Calling `init` again replaces all five loggers.
///
/// # Panics
/// Panics if the logger cannot be installed, for example because another global logger has
/// already been set. There is no way to continue without working loggers.
pub fn init(debug: bool) {
    if let Err(e) = try_init(debug) {
        panic!("failed to initialize loggers: {e}");
    }
}

/// Same as [`init`], but returns installation failures instead of panicking.
///
/// # Errors
/// Returns an error if the configuration cannot be built or if a different global logger is
/// already installed.
pub fn try_init(debug: bool) -> Result<LoggerRegistry, LogError> {
    let registry = LoggerRegistry::new(debug);
    let mut global = get_global_registry();
    global.install(registry)?;
    Ok(registry)
}

/// The registry most recently installed by [`init`], if any.
pub fn current() -> Option<LoggerRegistry> {
    get_global_registry().registry
}

pub fn is_initialized() -> bool {
    current().is_some()
}

/// Fetches the global registry.
fn get_global_registry() -> MutexGuard<'static, GlobalRegistry> {
    // A panic while holding the lock cannot leave the registry half-written.
    LOG_REGISTRY
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Writes to the `Debug` handle using `format!` syntax.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log::__log::log!(
            target: $crate::log::DEBUG_TARGET,
            $crate::log::Level::Debug,
            $($arg)+
        )
    };
}

/// Writes to the `Info` handle using `format!` syntax.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log::__log::log!(
            target: $crate::log::INFO_TARGET,
            $crate::log::Level::Info,
            $($arg)+
        )
    };
}

/// Writes to the `Warning` handle using `format!` syntax.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::log::__log::log!(
            target: $crate::log::WARNING_TARGET,
            $crate::log::Level::Warn,
            $($arg)+
        )
    };
}

/// Writes to the `Error` handle using `format!` syntax.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log::__log::log!(
            target: $crate::log::ERROR_TARGET,
            $crate::log::Level::Error,
            $($arg)+
        )
    };
}

/// Writes the bare message to standard output, with no prefix or annotation.
#[macro_export]
macro_rules! stdout {
    ($($arg:tt)+) => {
        $crate::log::__log::log!(
            target: $crate::log::STDOUT_TARGET,
            $crate::log::Level::Info,
            $($arg)+
        )
    };
}

/// Serializes tests that touch the global logger.
#[cfg(test)]
pub(crate) static TEST_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);
