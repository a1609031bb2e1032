use std::fmt;

use visual::StepError;

/// Why a transition left the selection where it was.
///
/// None of these are fatal: the context logs them and keeps its previous
/// state. Only [`crate::SelectionContext::delegate`] hands them to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavError {
    /// Geometry produced no box or no hit-test result.
    Unresolvable,
    /// The target lies outside the editing host.
    HostBoundary,
    /// The event needs boundaries the context does not have.
    MalformedSelection,
    /// A collaborator refused the subject or action.
    Unsupported(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Unresolvable => write!(f, "no position could be resolved"),
            NavError::HostBoundary => write!(f, "target lies outside the editing host"),
            NavError::MalformedSelection => write!(f, "selection is missing or invalid"),
            NavError::Unsupported(what) => write!(f, "unsupported: {what}"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<StepError> for NavError {
    fn from(err: StepError) -> Self {
        match err {
            StepError::LeftEditingHost | StepError::NotInEditingHost => NavError::HostBoundary,
            StepError::NoTarget => NavError::Unresolvable,
        }
    }
}
