use lossrank_core::{ErrorCode, GraphError};

/// Errors raised while aligning and correlating two rankings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    #[error(
        "{ranking} ranking does not match the node set: missing [{}], unexpected [{}]",
        missing.join(", "),
        unexpected.join(", ")
    )]
    NodeSetMismatch {
        ranking: &'static str,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("sequences differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("rank correlation needs at least 2 nodes, got {0}")]
    InsufficientNodes(usize),

    #[error("{0} scores are all equal; rank correlation is undefined")]
    ConstantScores(&'static str),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl CompareError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NodeSetMismatch { .. } | Self::LengthMismatch { .. } => {
                ErrorCode::NodeSetMismatch
            }
            Self::InsufficientNodes(_) => ErrorCode::InsufficientNodes,
            Self::ConstantScores(_) => ErrorCode::ConstantScores,
            Self::Graph(err) => err.code(),
        }
    }
}
