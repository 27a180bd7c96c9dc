//! Nodes of the expansion tree and their structural position codes.

use crate::error::{LSystemError, Result};
use serde::{Deserialize, Serialize};

/// Radix of the position encoding: each tree level contributes one base-100 digit.
pub const POSITION_BASE: u128 = 100;

/// Largest number of children a single rewrite may produce.
pub const MAX_BRANCHING: usize = 99;

/// Path of an instance through the expansion tree as base-100 digits.
///
/// A root at axiom index `i` has code `i`; child `i` of a node with code `p`
/// has code `100 * p + i`. The digits are stored unpacked, so the path never
/// truncates however deep the tree grows. The derived ordering compares the
/// axiom index, then the digits lexicographically: an ancestor sorts before its
/// descendants, and a leaf that stopped early still sorts between its cousins.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionCode {
    root: usize,
    digits: Vec<u8>,
}

impl PositionCode {
    pub fn root(index: usize) -> Self {
        Self {
            root: index,
            digits: Vec::new(),
        }
    }

    /// Code of the `index`-th child of this node. `index` must be below [`MAX_BRANCHING`].
    pub(crate) fn child(&self, index: usize) -> Self {
        debug_assert!(index < MAX_BRANCHING);
        let mut digits = Vec::with_capacity(self.digits.len() + 1);
        digits.extend_from_slice(&self.digits);
        digits.push(index as u8);
        Self {
            root: self.root,
            digits,
        }
    }

    /// Index of the axiom symbol this path descends from.
    pub fn root_index(&self) -> usize {
        self.root
    }

    /// Child indices from the root down, one per generation.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn depth(&self) -> usize {
        self.digits.len()
    }

    /// The packed integer `100 * p + i`, or `None` once it exceeds `u128`.
    pub fn code(&self) -> Option<u128> {
        self.digits.iter().try_fold(self.root as u128, |code, &digit| {
            code.checked_mul(POSITION_BASE)?.checked_add(digit as u128)
        })
    }
}

/// One symbol occurrence in the expansion tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInstance {
    pub symbol: char,
    /// `0` for symbols of the axiom.
    pub generation: u32,
    pub position: PositionCode,
}

impl SymbolInstance {
    pub fn root(symbol: char, index: usize) -> Self {
        Self {
            symbol,
            generation: 0,
            position: PositionCode::root(index),
        }
    }

    /// Builds the `index`-th child produced by rewriting this instance.
    ///
    /// Fails with [`LSystemError::PositionOverflow`] past the branching limit.
    pub fn child(&self, symbol: char, index: usize) -> Result<Self> {
        if index >= MAX_BRANCHING {
            return Err(LSystemError::PositionOverflow {
                symbol: self.symbol,
                len: index + 1,
            });
        }
        Ok(Self {
            symbol,
            generation: self.generation + 1,
            position: self.position.child(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(root: usize, digits: &[usize]) -> PositionCode {
        digits
            .iter()
            .fold(PositionCode::root(root), |p, &d| p.child(d))
    }

    #[test]
    fn child_code_is_base_100() {
        let p = path(3, &[7, 42]);
        assert_eq!(p.code(), Some(3 * 100 * 100 + 7 * 100 + 42));
        assert_eq!(p.depth(), 2);
        assert_eq!(p.digits(), &[7, 42]);
    }

    #[test]
    fn shallow_leaf_orders_between_deep_cousins() {
        // Root 1 stayed terminal; roots 0 and 2 were rewritten twice.
        let early = path(0, &[5, 9]);
        let shallow = PositionCode::root(1);
        let late = path(2, &[0, 0]);
        assert!(early < shallow);
        assert!(shallow < late);
        // Plain numeric comparison of the packed values would misplace it.
        assert!(shallow.code() < early.code());
    }

    #[test]
    fn ancestor_precedes_first_descendant() {
        let parent = path(4, &[2]);
        let first = parent.child(0);
        assert!(parent < first);
        assert_ne!(parent, first);
    }

    #[test]
    fn deep_paths_keep_ordering_past_u128() {
        let left = path(0, &[98; 40]);
        let mut right_digits = vec![98; 39];
        right_digits.push(97);
        let right = path(0, &right_digits).child(0);
        assert_eq!(left.code(), None);
        assert!(right < left);
        assert!(left < PositionCode::root(1));
    }

    #[test]
    fn hundredth_child_is_rejected() {
        let parent = SymbolInstance::root('F', 0);
        assert!(parent.child('F', MAX_BRANCHING - 1).is_ok());
        assert!(matches!(
            parent.child('F', MAX_BRANCHING),
            Err(LSystemError::PositionOverflow { symbol: 'F', len: 100 })
        ));
    }
}
