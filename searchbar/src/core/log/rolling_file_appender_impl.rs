// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use tracing_appender::rolling::RollingFileAppender;

use crate::SearchBarError;

/// Creates a file appender that never rolls over, writing to `path_str`.
///
/// Note that if you wrap this up in a non blocking writer the log lines are lost when
/// the guard is dropped early, so it is used as is.
///
/// # Errors
///
/// Returns [`SearchBarError::Logging`] if:
/// - The path has no parent directory.
/// - The path has no file name.
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| SearchBarError::Logging {
        reason: format!("log file {} has no parent folder", path.display()),
    })?;

    let file_name = path.file_name().ok_or_else(|| SearchBarError::Logging {
        reason: format!("log file {} has no file name", path.display()),
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
