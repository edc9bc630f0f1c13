use std::collections::HashSet;

use crate::fa::{AutomatonClass, AutomatonDescription, Symbol};

/// Decide which kind of automaton the transition relation describes, in one pass over the
/// transitions. Any epsilon transition makes it an epsilon-NFA, wherever it appears. Otherwise a
/// repeated (from, read) pair makes it an NFA, even when the whole triple is a literal duplicate.
/// Stopping at the first repeated pair in scan order would report NFA for a relation whose
/// epsilon transition comes later, so only an epsilon transition ends the scan early.
pub fn classify(automaton: &AutomatonDescription) -> AutomatonClass {
    let mut seen = HashSet::new();
    let mut repeated = false;

    for transition in &automaton.transitions {
        if transition.read == Symbol::Epsilon {
            return AutomatonClass::EpsilonNFA;
        }
        if !seen.insert((&transition.from, transition.read)) {
            repeated = true;
        }
    }

    if repeated {
        AutomatonClass::NFA
    } else {
        AutomatonClass::DFA
    }
}

#[cfg(test)]
mod classify_tests {
    use super::*;
    use crate::fa::{State, Transition};

    fn automaton(transitions: Vec<Transition>) -> AutomatonDescription {
        AutomatonDescription::new("q0", vec![State::from("q0")], transitions)
    }

    #[test]
    fn test_empty_relation_is_dfa() {
        assert_eq!(classify(&automaton(vec![])), AutomatonClass::DFA);
    }

    #[test]
    fn test_distinct_pairs_are_dfa() {
        let automaton = automaton(vec![
            Transition::new("q0", Symbol::Char('a'), "q1"),
            Transition::new("q0", Symbol::Char('b'), "q1"),
            Transition::new("q1", Symbol::Char('a'), "q0"),
        ]);
        assert_eq!(classify(&automaton), AutomatonClass::DFA);
    }

    #[test]
    fn test_repeated_pair_is_nfa() {
        let automaton = automaton(vec![
            Transition::new("q0", Symbol::Char('a'), "q0"),
            Transition::new("q0", Symbol::Char('a'), "q1"),
        ]);
        assert_eq!(classify(&automaton), AutomatonClass::NFA);
    }

    #[test]
    fn test_duplicated_triple_is_nfa() {
        let automaton = automaton(vec![
            Transition::new("q0", Symbol::Char('a'), "q1"),
            Transition::new("q0", Symbol::Char('a'), "q1"),
        ]);
        assert_eq!(classify(&automaton), AutomatonClass::NFA);
    }

    #[test]
    fn test_epsilon_takes_precedence() {
        let automaton = automaton(vec![
            Transition::new("q0", Symbol::Char('a'), "q0"),
            Transition::new("q0", Symbol::Char('a'), "q1"),
            Transition::new("q1", Symbol::Epsilon, "q0"),
        ]);
        assert_eq!(classify(&automaton), AutomatonClass::EpsilonNFA);

        let automaton = AutomatonDescription::new(
            "q0",
            vec![],
            vec![Transition::new("q0", Symbol::Epsilon, "q0")],
        );
        assert_eq!(classify(&automaton), AutomatonClass::EpsilonNFA);
    }

    #[test]
    fn test_same_symbol_from_different_states_is_dfa() {
        let automaton = automaton(vec![
            Transition::new("q0", Symbol::Char('a'), "q1"),
            Transition::new("q1", Symbol::Char('a'), "q1"),
        ]);
        assert_eq!(classify(&automaton), AutomatonClass::DFA);
    }
}
