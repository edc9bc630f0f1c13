use tracing::info;

use crate::classify::classify;
use crate::dfa::DFA;
use crate::fa::{AutomatonClass, AutomatonDescription, FA};
use crate::index::TransitionIndex;
use crate::nfa::{EpsilonNFA, NFA};

/// The engine matching an automaton's class. Classification and index construction happen once,
/// in `new`, and every word afterwards reuses them.
#[derive(Debug, Clone)]
pub enum Simulator {
    Dfa(DFA),
    Nfa(NFA),
    EpsilonNfa(EpsilonNFA),
}

impl Simulator {
    pub fn new(automaton: &AutomatonDescription) -> Self {
        let class = classify(automaton);
        info!(
            "classified automaton as {} ({} transitions)",
            class,
            automaton.transitions.len()
        );
        Self::with_class(automaton, class)
    }

    /// Build the engine for an already known class.
    pub fn with_class(automaton: &AutomatonDescription, class: AutomatonClass) -> Self {
        match class {
            AutomatonClass::DFA => Simulator::Dfa(DFA::new(automaton)),
            AutomatonClass::NFA => Simulator::Nfa(NFA::new(automaton)),
            AutomatonClass::EpsilonNFA => Simulator::EpsilonNfa(EpsilonNFA::new(automaton)),
        }
    }

    pub fn class(&self) -> AutomatonClass {
        match self {
            Simulator::Dfa(_) => AutomatonClass::DFA,
            Simulator::Nfa(_) => AutomatonClass::NFA,
            Simulator::EpsilonNfa(_) => AutomatonClass::EpsilonNFA,
        }
    }

    /// 1 when the word is accepted, 0 otherwise.
    pub fn simulate(&self, word: &str) -> u8 {
        u8::from(self.accepts(word))
    }
}

impl FA for Simulator {
    fn get_index(&self) -> &TransitionIndex {
        match self {
            Simulator::Dfa(dfa) => dfa.get_index(),
            Simulator::Nfa(nfa) => nfa.get_index(),
            Simulator::EpsilonNfa(enfa) => enfa.get_index(),
        }
    }

    fn accepts(&self, word: &str) -> bool {
        match self {
            Simulator::Dfa(dfa) => dfa.accepts(word),
            Simulator::Nfa(nfa) => nfa.accepts(word),
            Simulator::EpsilonNfa(enfa) => enfa.accepts(word),
        }
    }
}

/// Classify and simulate a single word in one go. Prefer building a `Simulator` once when
/// several words are evaluated against the same automaton.
pub fn simulate_word(automaton: &AutomatonDescription, word: &str) -> u8 {
    Simulator::with_class(automaton, classify(automaton)).simulate(word)
}
