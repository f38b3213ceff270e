use clap::Args;
use log_registry::runner::run_with_custom_args;
use log_registry::{debug, error, info, init, stdout, warning, Handle};

#[derive(Args, Debug)]
struct SwitchArgs {
    /// Re-initialize with the opposite debug flag and write a second round of messages
    #[arg(long, default_value_t = false)]
    switch_debug: bool,
}

fn main() {
    run_with_custom_args(|_, args, custom: Option<SwitchArgs>| {
        debug!("a debug message");
        info!("an info message");
        warning!("a warning message");
        error!("an error message");
        stdout!("a plain message");
        Handle::Debug.write(format_args!("a handle debug message"));

        if custom.is_some_and(|custom| custom.switch_debug) {
            init(!args.debug);
            debug!("a debug message after switching");
            info!("an info message after switching");
        }
        Ok(())
    })
    .unwrap();
}
