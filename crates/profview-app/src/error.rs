// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use thiserror::Error;

/// How a caller asked to move the cursor directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpTarget {
    Index(usize),
    Name(String),
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("no profile at {target}; {len} profiles loaded")]
    IndexOutOfRange { target: JumpTarget, len: usize },

    #[error("resource {path:?} unavailable: {reason}")]
    ResourceUnavailable { path: String, reason: String },

    #[error("invalid field configuration: {reason}")]
    Configuration { reason: String },
}

impl ProfileError {
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
