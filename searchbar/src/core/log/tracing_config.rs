// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io::Write,
          ops::Add,
          sync::{Arc, Mutex}};

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "searchbar_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout, stderr, or an in memory [`SharedLogBuffer`],
/// 3. both.
///
/// Use [`crate::try_initialize_logging_global`] or
/// [`crate::try_initialize_logging_thread_local`] to install it. Both of them accept
/// anything that is [`Into<TracingConfig>`], so a [`tracing::Level`], a [`LevelFilter`],
/// a [`DisplayPreference`], or a [`WriterConfig`] all work, and they can be combined
/// with `+`.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// Where the log lines go. The `String` is the log file path.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Clone, PartialEq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
    /// Captures formatted log lines in memory. Handy in tests.
    Buffer(SharedLogBuffer),
}

impl Debug for DisplayPreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayPreference::Stdout => write!(f, "Stdout"),
            DisplayPreference::Stderr => write!(f, "Stderr"),
            DisplayPreference::Buffer(_) => write!(f, "Buffer"),
        }
    }
}

/// Cloneable in memory sink for log output. All clones write to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedLogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl PartialEq for SharedLogBuffer {
    fn eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.inner, &other.inner) }
}

impl SharedLogBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(guard) => String::from_utf8_lossy(&guard).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for SharedLogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| std::io::Error::other("log buffer lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl TracingConfig {
    /// Log at `DEBUG` to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new_file_and_display(
        maybe_filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                maybe_filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(maybe_filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                maybe_filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

/// Conversions so that the logging entry points can take `impl Into<TracingConfig>`.
pub mod tracing_config_options {
    use super::{Add, DEFAULT_LOG_FILE_NAME, DisplayPreference, LevelFilter,
                TracingConfig, WriterConfig};

    impl From<tracing::Level> for TracingConfig {
        fn from(level: tracing::Level) -> Self {
            Self {
                level_filter: level.into(),
                writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
            }
        }
    }

    impl From<LevelFilter> for TracingConfig {
        fn from(level_filter: LevelFilter) -> Self {
            Self {
                level_filter,
                writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
            }
        }
    }

    impl From<DisplayPreference> for TracingConfig {
        fn from(preferred_display: DisplayPreference) -> Self {
            Self {
                level_filter: LevelFilter::DEBUG,
                writer_config: WriterConfig::Display(preferred_display),
            }
        }
    }

    impl From<WriterConfig> for TracingConfig {
        fn from(writer_config: WriterConfig) -> Self {
            Self {
                level_filter: LevelFilter::DEBUG,
                writer_config,
            }
        }
    }

    /// The more verbose level wins, writer configs are merged.
    impl Add<TracingConfig> for TracingConfig {
        type Output = Self;

        fn add(self, rhs: Self) -> Self::Output {
            Self {
                level_filter: self.level_filter.max(rhs.level_filter),
                writer_config: self.writer_config + rhs.writer_config,
            }
        }
    }

    /// Merge two [`WriterConfig`]s. On a collision `rhs` wins, since it has higher
    /// specificity. A display and a file on opposite sides combine into
    /// [`WriterConfig::DisplayAndFile`].
    impl Add<WriterConfig> for WriterConfig {
        type Output = Self;

        fn add(self, rhs: WriterConfig) -> Self::Output {
            use WriterConfig::{Display, DisplayAndFile, File, None};

            match (self, rhs) {
                (None, rhs) => rhs,
                (lhs, None) => lhs,
                (Display(display), File(file)) | (File(file), Display(display)) => {
                    DisplayAndFile(display, file)
                }
                (DisplayAndFile(_, file), Display(display)) => {
                    DisplayAndFile(display, file)
                }
                (DisplayAndFile(display, _), File(file)) => DisplayAndFile(display, file),
                (_, rhs) => rhs,
            }
        }
    }

}
