// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Errors

/// Errors surfaced by the benchmark engine and its report I/O.
///
/// Nothing inside the simulation can fail once the orchestrator's
/// preconditions hold; every variant here is raised before sampling starts
/// or while reading/writing report files.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown profile '{name}' (known: {})", .known.join(", "))]
    UnknownProfile { name: String, known: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
