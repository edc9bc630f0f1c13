/* Deterministic simulation. Follows the single outgoing transition for each input symbol and
 * rejects as soon as one is missing. */

use crate::fa::{AutomatonDescription, Symbol, FA};
use crate::index::TransitionIndex;

#[derive(Debug, Clone)]
pub struct DFA {
    index: TransitionIndex,
}

impl DFA {
    /// Build the engine. The description is trusted to be deterministic: when a (state, symbol)
    /// pair has several destinations an arbitrary one of them is followed.
    pub fn new(automaton: &AutomatonDescription) -> Self {
        DFA {
            index: TransitionIndex::new(automaton, false),
        }
    }

    fn step(&self, state: usize, c: char) -> Option<usize> {
        self.index.targets(state, &Symbol::Char(c)).iter().next().copied()
    }
}

impl FA for DFA {
    fn get_index(&self) -> &TransitionIndex {
        &self.index
    }

    fn accepts(&self, word: &str) -> bool {
        let mut current = self.index.get_start_state();

        for c in word.chars() {
            current = match self.step(current, c) {
                Some(next) => next,
                None => return false,
            };
        }

        self.index.is_accepting(current)
    }
}

#[cfg(test)]
mod dfa_tests {
    use super::*;
    use crate::fa::{State, Transition};

    // (q0 -a-> q1 -b-> q0), accepting q0
    fn alternating() -> DFA {
        let automaton = AutomatonDescription::new(
            "q0",
            vec![State::from("q0")],
            vec![
                Transition::new("q0", Symbol::Char('a'), "q1"),
                Transition::new("q1", Symbol::Char('b'), "q0"),
            ],
        );
        DFA::new(&automaton)
    }

    #[test]
    fn test_accepts_alternation() {
        let dfa = alternating();

        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("abab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("aba"));
    }

    #[test]
    fn test_empty_word() {
        let dfa = alternating();
        assert!(dfa.accepts(""));

        let automaton = AutomatonDescription::new(
            "q0",
            vec![State::from("q1")],
            vec![Transition::new("q0", Symbol::Char('a'), "q1")],
        );
        assert!(!DFA::new(&automaton).accepts(""));
    }

    #[test]
    fn test_missing_transition_rejects() {
        let dfa = alternating();

        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("bab"));
        assert!(!dfa.accepts("aa"));
        assert!(!dfa.accepts("abzab"));
    }

    #[test]
    fn test_fa_trait_implementation_for_dfa() {
        let dfa = alternating();

        assert_eq!(dfa.get_num_states(), 2);
        assert_eq!(dfa.get_start_state(), 0);
        assert_eq!(dfa.get_acceptor_states().len(), 2);
        assert!(dfa.get_acceptor_states()[0]);
        assert!(!dfa.get_acceptor_states()[1]);
    }

    #[test]
    fn test_numeric_states() {
        let automaton = AutomatonDescription::new(
            0i64,
            vec![State::from(1i64)],
            vec![
                Transition::new(0i64, Symbol::Char('0'), 0i64),
                Transition::new(0i64, Symbol::Char('1'), 1i64),
                Transition::new(1i64, Symbol::Char('0'), 1i64),
            ],
        );
        let dfa = DFA::new(&automaton);

        assert!(dfa.accepts("0010"));
        assert!(!dfa.accepts("000"));
        assert!(!dfa.accepts("011"));
    }
}
