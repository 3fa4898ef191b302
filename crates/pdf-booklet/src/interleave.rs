//! Front/back sheet interleaving for duplex output

use crate::types::*;
use std::fmt;

/// A rendered sheet side, identified by side and 1-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetRef {
    pub side: SheetSide,
    pub index: usize,
}

impl SheetRef {
    pub fn front(index: usize) -> Self {
        Self {
            side: SheetSide::Front,
            index,
        }
    }

    pub fn back(index: usize) -> Self {
        Self {
            side: SheetSide::Back,
            index,
        }
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.label(), self.index)
    }
}

/// Interleave front and back sheets as `F1, B1, F2, B2, ...`.
///
/// Every front sheet needs a matching back sheet; otherwise nothing is
/// produced and `MismatchedSheetCounts` is returned.
pub fn interleave_sheets<T>(front: Vec<T>, back: Vec<T>) -> Result<Vec<T>> {
    if front.len() != back.len() {
        return Err(BookletError::MismatchedSheetCounts {
            front: front.len(),
            back: back.len(),
        });
    }

    let mut order = Vec::with_capacity(front.len() * 2);
    for (f, b) in front.into_iter().zip(back) {
        order.push(f);
        order.push(b);
    }
    Ok(order)
}

/// The final order as labelled sheet references
pub fn final_order(front_sheets: usize, back_sheets: usize) -> Result<Vec<SheetRef>> {
    interleave_sheets(
        (1..=front_sheets).map(SheetRef::front).collect(),
        (1..=back_sheets).map(SheetRef::back).collect(),
    )
}
