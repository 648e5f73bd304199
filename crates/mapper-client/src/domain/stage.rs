//! Stages of one association pipeline run

use mapper_types::BusError;
use serde::Serialize;
use std::fmt;

/// Where a pipeline run currently is.
///
/// ```text
/// Idle -> AwaitingEndpoints -> AwaitingSubtree -> Merging -> Done
///               |                    |
///               +-------> Failed <---+
/// ```
///
/// An empty reply in either awaiting stage goes straight to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolveStage {
    Idle,
    AwaitingEndpoints,
    AwaitingSubtree,
    Merging,
    Done,
    Failed,
}

impl ResolveStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingEndpoints => "awaiting_endpoints",
            Self::AwaitingSubtree => "awaiting_subtree",
            Self::Merging => "merging",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a pipeline run ended, used as the metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Both stages returned entries; the result may still be empty.
    Merged,
    EmptyEndpoints,
    EmptySubtree,
    Failed(mapper_types::ErrorKind),
}

impl ResolveOutcome {
    #[must_use]
    pub fn failed(err: &BusError) -> Self {
        Self::Failed(err.kind())
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::EmptyEndpoints => "empty_endpoints",
            Self::EmptySubtree => "empty_subtree",
            Self::Failed(kind) => kind.as_str(),
        }
    }
}
