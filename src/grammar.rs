//! Static description of an L-System: production rules, axiom and generation limit.

use std::collections::HashMap;

/// Production rules mapping a single symbol to its ordered replacement.
///
/// Immutable once built and shared read-only between expansion tasks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: HashMap<char, Vec<char>>,
}

impl Grammar {
    /// An empty rule set: every symbol is terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the production for `symbol`.
    pub fn insert(&mut self, symbol: char, replacement: &str) {
        self.rules.insert(symbol, replacement.chars().collect());
    }

    /// Returns the replacement for `symbol`, or `None` if it has no production.
    pub fn production(&self, symbol: char) -> Option<&[char]> {
        self.rules.get(&symbol).map(Vec::as_slice)
    }

    /// Whether `symbol` has a production.
    pub fn contains(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    /// Number of symbols with a production.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(symbol, replacement)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[char])> {
        self.rules.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl<S: AsRef<str>> FromIterator<(char, S)> for Grammar {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        let mut grammar = Grammar::new();
        for (symbol, replacement) in iter {
            grammar.insert(symbol, replacement.as_ref());
        }
        grammar
    }
}

/// The complete input of one expansion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LSystem {
    pub grammar: Grammar,
    pub axiom: Vec<char>,
    /// Number of rewriting passes. `0` leaves the axiom unchanged.
    pub max_generation: u32,
}

impl LSystem {
    /// Bundles rules, axiom and generation limit.
    pub fn new(grammar: Grammar, axiom: &str, max_generation: u32) -> Self {
        Self {
            grammar,
            axiom: axiom.chars().collect(),
            max_generation,
        }
    }

    /// Starts a builder with no rules and a generation limit of `0`.
    pub fn builder(axiom: &str) -> LSystemBuilder {
        LSystemBuilder {
            grammar: Grammar::new(),
            axiom: axiom.to_owned(),
            max_generation: 0,
        }
    }

    /// Whether an instance of `symbol` at `generation` is a leaf of the expansion tree.
    pub fn is_terminal(&self, symbol: char, generation: u32) -> bool {
        generation >= self.max_generation || !self.grammar.contains(symbol)
    }
}

/// Builder for [`LSystem`].
///
/// ```ignore
/// let koch = LSystem::builder("F").rule('F', "F+F-F-F+F").generations(3).build();
/// ```
#[derive(Clone, Debug)]
pub struct LSystemBuilder {
    grammar: Grammar,
    axiom: String,
    max_generation: u32,
}

impl LSystemBuilder {
    pub fn rule(mut self, symbol: char, replacement: &str) -> Self {
        self.grammar.insert(symbol, replacement);
        self
    }

    pub fn generations(mut self, max_generation: u32) -> Self {
        self.max_generation = max_generation;
        self
    }

    pub fn build(self) -> LSystem {
        LSystem::new(self.grammar, &self.axiom, self.max_generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_production_is_terminal() {
        let system = LSystem::builder("FX").rule('F', "FF").generations(2).build();
        assert!(!system.is_terminal('F', 0));
        assert!(system.is_terminal('X', 0));
        assert!(system.is_terminal('F', 2));
    }

    #[test]
    fn grammar_collects_pairs() {
        let grammar: Grammar = [('A', "AB"), ('B', "A")].into_iter().collect();
        assert_eq!(grammar.production('A'), Some(&['A', 'B'][..]));
        assert_eq!(grammar.production('C'), None);
        assert_eq!(grammar.len(), 2);
    }
}
