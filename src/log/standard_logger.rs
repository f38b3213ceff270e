use crate::error::LogError;
use crate::log::{GlobalRegistry, LoggerRegistry};

impl GlobalRegistry {
    /// Sets the global logger to conform to `registry`, replacing whatever was installed before.
    pub(in crate::log) fn install(&mut self, registry: LoggerRegistry) -> Result<(), LogError> {
        let new_config = registry.console_config()?;

        match self.root_handle {
            Some(ref mut handle) => {
                // The global logger has already been initialized
                handle.set_config(new_config);
            }

            None => {
                // The global logger has not yet been initialized
                self.root_handle = Some(log4rs::init_config(new_config)?);
            }
        }

        self.registry = Some(registry);
        Ok(())
    }
}
