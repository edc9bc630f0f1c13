use bitvec::prelude::BitVec;
use serde::Deserialize;
use std::fmt;

use crate::index::TransitionIndex;

/// An opaque automaton state. Descriptions may name states with strings or integers.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Deserialize)]
#[serde(untagged)]
pub enum State {
    Name(String),
    Number(i64),
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Name(name) => write!(f, "{}", name),
            State::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::Name(name.to_string())
    }
}

impl From<i64> for State {
    fn from(number: i64) -> Self {
        State::Number(number)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(ch) => write!(f, "{}", ch),
        }
    }
}

/// Transition as it appears in the JSON description, before the `read` field is checked.
#[derive(Deserialize)]
struct RawTransition {
    from: State,
    #[serde(default)]
    read: Option<String>,
    to: State,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(try_from = "RawTransition")]
pub struct Transition {
    pub from: State,
    pub read: Symbol,
    pub to: State,
}

/// Raised when a transition reads something other than a single character or null.
#[derive(Debug)]
pub struct InvalidSymbol(pub String);

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transition reads {:?}, expected a single character or null",
            self.0
        )
    }
}

impl std::error::Error for InvalidSymbol {}

impl TryFrom<RawTransition> for Transition {
    type Error = InvalidSymbol;

    fn try_from(raw: RawTransition) -> Result<Self, Self::Error> {
        let read = match raw.read {
            None => Symbol::Epsilon,
            Some(read) => {
                let mut chars = read.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Symbol::Char(ch),
                    _ => return Err(InvalidSymbol(read)),
                }
            }
        };

        Ok(Transition {
            from: raw.from,
            read,
            to: raw.to,
        })
    }
}

impl Transition {
    pub fn new(from: impl Into<State>, read: Symbol, to: impl Into<State>) -> Self {
        Transition {
            from: from.into(),
            read,
            to: to.into(),
        }
    }
}

/// An automaton as loaded from its description file. Never mutated after loading.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct AutomatonDescription {
    pub initial: State,
    #[serde(rename = "final", default)]
    pub final_states: Vec<State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl AutomatonDescription {
    pub fn new(
        initial: impl Into<State>,
        final_states: Vec<State>,
        transitions: Vec<Transition>,
    ) -> Self {
        AutomatonDescription {
            initial: initial.into(),
            final_states,
            transitions,
        }
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().any(|t| t.read == Symbol::Epsilon)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AutomatonClass {
    DFA,
    NFA,
    EpsilonNFA,
}

impl fmt::Display for AutomatonClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonClass::DFA => write!(f, "DFA"),
            AutomatonClass::NFA => write!(f, "NFA"),
            AutomatonClass::EpsilonNFA => write!(f, "epsilon-NFA"),
        }
    }
}

/// Common interface of the simulation engines. States are the dense ids handed out by the
/// engine's transition index.
pub trait FA {
    fn get_index(&self) -> &TransitionIndex;
    /// Decide whether the word is accepted. Every char of the word is one input symbol.
    fn accepts(&self, word: &str) -> bool;

    fn get_num_states(&self) -> usize {
        self.get_index().get_num_states()
    }

    fn get_start_state(&self) -> usize {
        self.get_index().get_start_state()
    }

    fn get_acceptor_states(&self) -> &BitVec<u8> {
        self.get_index().get_acceptor_states()
    }
}
