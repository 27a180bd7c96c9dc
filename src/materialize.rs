//! Recovers the structural symbol order from concurrently collected leaves.

use crate::instance::SymbolInstance;

/// Sorts terminal instances into left-to-right grammar order.
///
/// Position codes are unique among leaves, so the result does not depend on
/// the arrival order. Sorting an already ordered slice leaves it unchanged.
pub fn sort_terminals(terminals: &mut [SymbolInstance]) {
    terminals.sort_unstable_by(|a, b| a.position.cmp(&b.position));
}

/// Orders `terminals` by position code and projects their symbols.
pub fn materialize(mut terminals: Vec<SymbolInstance>) -> String {
    sort_terminals(&mut terminals);
    terminals.iter().map(|instance| instance.symbol).collect()
}
