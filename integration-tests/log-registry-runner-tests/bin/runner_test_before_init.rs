use log_registry::runner::run_with_args;
use log_registry::{current, info, is_initialized, stdout, Handle, LoggerRegistry};

fn main() {
    // Nothing is installed yet, so these go nowhere.
    assert!(!is_initialized());
    Handle::Error.write(format_args!("an error before init"));
    info!("an info message before init");

    run_with_args(|registry, _, _| {
        assert!(is_initialized());
        assert_eq!(current(), Some(*registry));
        stdout!("initialized");

        // An injected logger is independent of the global debug flag.
        let logger = LoggerRegistry::new(false).build_logger()?;
        assert!(!logger.registry().debug_enabled());
        logger.write(Handle::Info, format_args!("an injected info message"));
        logger.write(Handle::Debug, format_args!("an injected debug message"));
        logger.flush();
        Ok(())
    })
    .unwrap();
}
