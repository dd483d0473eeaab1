//! Non-fatal findings reported alongside a rendered deck.

use std::fmt;

/// Something the renderer skipped while producing a deck.
///
/// Warnings never stop rendering; they are returned with the output so the
/// caller decides whether to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A recognized node had no Diagram Interchange shape, so nothing was drawn.
    UnresolvedNode { id: String },

    /// A sequence flow touches an element that was not drawn.
    DanglingConnector { source: String, target: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::UnresolvedNode { id } => {
                write!(f, "node `{id}` has no diagram shape and was not drawn")
            }
            RenderWarning::DanglingConnector { source, target } => write!(
                f,
                "sequence flow `{source}` -> `{target}` skipped: an endpoint was not drawn"
            ),
        }
    }
}
