/* Subset simulation. The engines track every state the automaton could be in after reading a
 * prefix of the word, without materializing the equivalent DFA. */

use bitvec::prelude::*;

use crate::closure::{epsilon_closure, epsilon_closure_of_set};
use crate::fa::{AutomatonDescription, Symbol, FA};
use crate::index::TransitionIndex;

// This function returns the set of states reachable via char c from within the set q
fn delta(index: &TransitionIndex, q: &BitVec<u8>, c: char) -> BitVec<u8> {
    let mut result = index.empty_set();
    for state in q.iter_ones() {
        for target in index.targets(state, &Symbol::Char(c)) {
            result.set(*target, true);
        }
    }
    result
}

/// Nondeterministic automaton without epsilon transitions.
#[derive(Debug, Clone)]
pub struct NFA {
    index: TransitionIndex,
}

impl NFA {
    pub fn new(automaton: &AutomatonDescription) -> Self {
        NFA {
            index: TransitionIndex::new(automaton, false),
        }
    }

    /// States occupied after reading the whole word.
    pub fn run(&self, word: &str) -> BitVec<u8> {
        let mut current = self.index.empty_set();
        current.set(self.index.get_start_state(), true);

        for c in word.chars() {
            if current.not_any() {
                break;
            }
            current = delta(&self.index, &current, c);
        }

        current
    }
}

impl FA for NFA {
    fn get_index(&self) -> &TransitionIndex {
        &self.index
    }

    fn accepts(&self, word: &str) -> bool {
        self.index.any_accepting(&self.run(word))
    }
}

/// Nondeterministic automaton with epsilon transitions. Epsilon moves are taken once at the
/// start and after every consumed symbol.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    index: TransitionIndex,
}

impl EpsilonNFA {
    pub fn new(automaton: &AutomatonDescription) -> Self {
        EpsilonNFA {
            index: TransitionIndex::new(automaton, true),
        }
    }

    /// States occupied after reading the whole word, closed under epsilon moves.
    pub fn run(&self, word: &str) -> BitVec<u8> {
        let mut current = epsilon_closure(&self.index, self.index.get_start_state());

        for c in word.chars() {
            if current.not_any() {
                break;
            }
            let moved = delta(&self.index, &current, c);
            current = epsilon_closure_of_set(&self.index, &moved);
        }

        current
    }
}

impl FA for EpsilonNFA {
    fn get_index(&self) -> &TransitionIndex {
        &self.index
    }

    fn accepts(&self, word: &str) -> bool {
        self.index.any_accepting(&self.run(word))
    }
}
