//! Log macros record the call site as a path relative to the crate root (`src/log/mod.rs`).
//! Annotated lines show only the file name (`mod.rs`), so the record is rewritten before it
//! reaches the pattern encoder.

use std::path::Path;

use log::Record;
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Encode, Write};

/// Wraps an encoder and strips the directories from the record's source file.
#[derive(Debug)]
pub struct ShortFileEncoder {
    inner: Box<dyn Encode>,
}

impl ShortFileEncoder {
    pub fn new(inner: Box<dyn Encode>) -> Self {
        Self { inner }
    }

    pub fn with_pattern(pattern: &str) -> Self {
        Self::new(Box::new(PatternEncoder::new(pattern)))
    }
}

fn short_file(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

impl Encode for ShortFileEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> Result<(), anyhow::Error> {
        let Some(file) = record.file() else {
            return self.inner.encode(w, record);
        };

        let record = Record::builder()
            .args(*record.args())
            .metadata(record.metadata().clone())
            .module_path(record.module_path())
            .file(Some(short_file(file)))
            .line(record.line())
            .build();

        // Delegate to the inner encoder
        self.inner.encode(w, &record)
    }
}

#[cfg(test)]
mod tests {
    use super::{short_file, ShortFileEncoder};
    use log::{Level, Record};
    use log4rs::encode::writer::simple::SimpleWriter;
    use log4rs::encode::Encode;

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("src/log/mod.rs"), "mod.rs");
        assert_eq!(short_file("main.rs"), "main.rs");
        assert_eq!(short_file(""), "");
    }

    #[test]
    fn test_encode_rewrites_file() {
        let encoder = ShortFileEncoder::with_pattern("{f}:{L} {l} {m}");
        let mut buffer = Vec::new();
        encoder
            .encode(
                &mut SimpleWriter(&mut buffer),
                &Record::builder()
                    .args(format_args!("hello"))
                    .level(Level::Warn)
                    .file(Some("integration-tests/bin/host.rs"))
                    .line(Some(12))
                    .build(),
            )
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "host.rs:12 WARN hello");
    }
}
