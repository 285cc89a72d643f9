// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Error types shared by the engine and its collaborators

use thiserror::Error;

/// Root error type for all alarm engine failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlarmError {
    /// Caller supplied an argument the engine refuses to act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The security repository failed to read or write state.
    #[error("repository error: {0}")]
    Repository(String),

    /// The image classifier could not produce a result.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// A status listener rejected a notification.
    #[error("listener error: {0}")]
    Listener(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("config error: {0}")]
    Config(String),
}

impl AlarmError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AlarmError>;
