// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod api {
    pub mod error;
}

pub mod core {
    pub mod cancel;
}

pub mod graph {
    pub mod contract;
    pub mod simple_graph;
}

// Re-exports for convenience
pub use api::error::{GraphError, Result};
pub use core::cancel::{CancelFlag, CancellationToken, NeverCancelled};
pub use graph::contract::{Graph, InboundSemiGraph, Node, OutboundSemiGraph};
pub use graph::simple_graph::SimpleGraph;
