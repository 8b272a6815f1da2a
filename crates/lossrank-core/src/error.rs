use std::fmt;

/// Machine-readable error codes for script-friendly failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidParameter,
    InvalidWeightBounds,
    DuplicateNode,
    UnknownNode,
    SelfLoop,
    NegativeWeight,
    NonFiniteWeight,
    NodeSetMismatch,
    InsufficientNodes,
    ConstantScores,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidParameter => "E1001",
            Self::InvalidWeightBounds => "E1002",
            Self::DuplicateNode => "E2001",
            Self::UnknownNode => "E2002",
            Self::SelfLoop => "E2003",
            Self::NegativeWeight => "E2004",
            Self::NonFiniteWeight => "E2005",
            Self::NodeSetMismatch => "E3001",
            Self::InsufficientNodes => "E3002",
            Self::ConstantScores => "E3003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidParameter => "Invalid parameter",
            Self::InvalidWeightBounds => "Invalid weight bounds",
            Self::DuplicateNode => "Duplicate node identifier",
            Self::UnknownNode => "Edge references an unknown node",
            Self::SelfLoop => "Self-loop edge",
            Self::NegativeWeight => "Negative edge weight",
            Self::NonFiniteWeight => "Non-finite edge weight",
            Self::NodeSetMismatch => "Rankings cover different node sets",
            Self::InsufficientNodes => "Too few nodes to correlate",
            Self::ConstantScores => "Ranking has no variation",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidWeightBounds => Some("Pass --min-weight no larger than --max-weight."),
            Self::DuplicateNode => Some("List each node identifier once in --nodes."),
            Self::NodeSetMismatch => {
                Some("Both rankings must be computed over the same graph.")
            }
            Self::InsufficientNodes => Some("Use at least two nodes."),
            Self::ConstantScores => {
                Some("The graph is too sparse to order its nodes; try another seed.")
            }
            Self::InvalidParameter
            | Self::UnknownNode
            | Self::SelfLoop
            | Self::NegativeWeight
            | Self::NonFiniteWeight => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while validating configuration or building a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("min weight {min} exceeds max weight {max}")]
    InvalidWeightBounds { min: u32, max: u32 },

    #[error("node `{0}` listed more than once")]
    DuplicateNode(String),

    #[error("edge {from} -> {to} references unknown node `{missing}`")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    #[error("self-loop on node `{0}`")]
    SelfLoop(String),

    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight {
        from: String,
        to: String,
        weight: f64,
    },
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::InvalidWeightBounds { .. } => ErrorCode::InvalidWeightBounds,
            Self::DuplicateNode(_) => ErrorCode::DuplicateNode,
            Self::UnknownNode { .. } => ErrorCode::UnknownNode,
            Self::SelfLoop(_) => ErrorCode::SelfLoop,
            Self::NegativeWeight { .. } => ErrorCode::NegativeWeight,
            Self::NonFiniteWeight { .. } => ErrorCode::NonFiniteWeight,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
