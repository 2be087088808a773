// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge or query referenced a node the graph does not contain.
    #[error("Node '{node}' not found in graph")]
    UnknownNode { node: String },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid algorithm configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub fn unknown_node(node: &impl std::fmt::Debug) -> Self {
        Self::UnknownNode {
            node: format!("{node:?}"),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
