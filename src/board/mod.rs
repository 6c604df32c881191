//! Board geometry: pure coordinate and identity queries, no mutation.
//!
//! The board is a shared 52-cell ring plus, per color, a private 5-cell
//! home stretch and a goal. A color's relative step maps onto the ring
//! through its fixed offset. All inputs are pre-validated by the caller;
//! nothing here can fail.

use crate::core::{Color, GOAL, STRETCH_START};

/// Cells on the shared ring.
pub const RING_CELLS: u8 = 52;

/// Safe-spot cells on the ring, in ascending order.
///
/// The four start cells (0, 13, 26, 39) are all safe, so entering from
/// home never captures and is never blocked by a pair.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Map a relative step to a global ring cell.
///
/// Defined for steps in 0..=50, or 0..=51 while the owner is under the
/// Master-mode finishing lock and keeps circling the ring.
#[must_use]
pub fn global_cell(color: Color, steps: i8) -> u8 {
    debug_assert!((0..=STRETCH_START).contains(&steps));
    ((u16::from(color.offset()) + steps as u16) % u16::from(RING_CELLS)) as u8
}

/// Is this ring cell a safe spot?
///
/// Blockade and capture restrictions are waived on safe spots.
#[must_use]
pub fn is_safe(cell: u8) -> bool {
    SAFE_CELLS.contains(&cell)
}

/// A position past the open ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeStretch {
    /// Index into the color's private 5-cell stretch (0..=4).
    Cell(u8),
    /// The goal.
    Goal,
}

/// Map a relative step to the private home stretch.
///
/// Steps 51..=55 map to stretch cells 0..=4, step 56 to the goal, and
/// anything else (home or ring positions) to `None`. Which color's
/// stretch it is follows from the token's owner; the stretch is private,
/// so no global index exists.
#[must_use]
pub fn home_stretch_cell(steps: i8) -> Option<HomeStretch> {
    match steps {
        STRETCH_START..=55 => Some(HomeStretch::Cell((steps - STRETCH_START) as u8)),
        GOAL => Some(HomeStretch::Goal),
        _ => None,
    }
}
