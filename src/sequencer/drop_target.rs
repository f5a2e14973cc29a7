//! Drop Target Resolution
//!
//! Turns a drag-and-drop gesture into `reorder` arguments. The UI reports
//! the gap the entry was dropped into, not the final index.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// The gap before the entry at this index (0..=len)
    Gap(usize),
    /// After the last entry
    End,
}

/// Compute `(from, to)` for [`reorder`](super::reorder).
///
/// Returns `Ok(None)` when the drop leaves the entry where it was, which
/// callers treat as a silent no-op.
pub fn resolve_drop(len: usize, from: usize, target: DropTarget) -> DomainResult<Option<(usize, usize)>> {
    if from >= len {
        return Err(DomainError::IndexOutOfRange { index: from, len });
    }

    let gap = match target {
        DropTarget::Gap(gap) if gap <= len => gap,
        DropTarget::Gap(gap) => return Err(DomainError::IndexOutOfRange { index: gap, len }),
        DropTarget::End => len,
    };

    // Removing the dragged entry shifts every later gap left by one
    let to = if gap > from { gap - 1 } else { gap };
    Ok((to != from).then_some((from, to)))
}
