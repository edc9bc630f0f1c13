/* Lookup structure built from the raw transition list. States are interned into dense ids so
 * that the engines can track sets of states as bit vectors. */

use bitvec::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::fa::{AutomatonDescription, State, Symbol};

#[derive(Debug, Clone)]
struct IndexedState {
    state: State,
    transitions: HashMap<Symbol, HashSet<usize>>,
}

impl IndexedState {
    fn new(state: State) -> Self {
        IndexedState {
            state,
            transitions: HashMap::new(),
        }
    }

    fn add_transition(&mut self, symbol: Symbol, to: usize) {
        self.transitions.entry(symbol).or_default().insert(to);
    }
}

/// Read-only mapping from (state, symbol) to the set of destination states.
#[derive(Debug, Clone)]
pub struct TransitionIndex {
    states: Vec<IndexedState>,
    ids: HashMap<State, usize>,
    start_state: usize,
    accept_states: BitVec<u8>,
    empty: HashSet<usize>,
}

impl TransitionIndex {
    /// Build the index. Epsilon transitions are only recorded when `include_epsilon` is set, the
    /// states they mention are interned either way.
    pub fn new(automaton: &AutomatonDescription, include_epsilon: bool) -> Self {
        let mut index = TransitionIndex {
            states: Vec::new(),
            ids: HashMap::new(),
            start_state: 0,
            accept_states: BitVec::new(),
            empty: HashSet::new(),
        };

        index.start_state = index.intern(&automaton.initial);

        for transition in &automaton.transitions {
            let from = index.intern(&transition.from);
            let to = index.intern(&transition.to);

            if transition.read == Symbol::Epsilon && !include_epsilon {
                continue;
            }
            index.states[from].add_transition(transition.read, to);
        }

        for state in &automaton.final_states {
            let id = index.intern(state);
            index.accept_states.set(id, true);
        }

        index
    }

    fn intern(&mut self, state: &State) -> usize {
        if let Some(&id) = self.ids.get(state) {
            return id;
        }
        let id = self.states.len();
        self.states.push(IndexedState::new(state.clone()));
        self.ids.insert(state.clone(), id);
        self.accept_states.push(false);
        id
    }

    /// Destinations of `state` on `symbol`. Unknown pairs answer with the empty set.
    pub fn targets(&self, state: usize, symbol: &Symbol) -> &HashSet<usize> {
        self.states
            .get(state)
            .and_then(|indexed| indexed.transitions.get(symbol))
            .unwrap_or(&self.empty)
    }

    pub fn get_num_states(&self) -> usize {
        self.states.len()
    }

    pub fn get_start_state(&self) -> usize {
        self.start_state
    }

    pub fn get_acceptor_states(&self) -> &BitVec<u8> {
        &self.accept_states
    }

    pub fn get_id(&self, state: &State) -> Option<usize> {
        self.ids.get(state).copied()
    }

    pub fn get_state(&self, id: usize) -> Option<&State> {
        self.states.get(id).map(|indexed| &indexed.state)
    }

    pub fn is_accepting(&self, id: usize) -> bool {
        self.accept_states.get(id).map(|bit| *bit).unwrap_or(false)
    }

    /// True when any state of the set is an accept state.
    pub fn any_accepting(&self, states: &BitVec<u8>) -> bool {
        states.iter_ones().any(|id| self.is_accepting(id))
    }

    /// Get a list of all outgoing transitions for the given state
    pub fn get_state_transitions(&self, id: usize) -> Vec<(&Symbol, &HashSet<usize>)> {
        match self.states.get(id) {
            Some(indexed) => indexed.transitions.iter().collect(),
            None => Vec::new(),
        }
    }

    /// An empty state set sized for this index.
    pub fn empty_set(&self) -> BitVec<u8> {
        BitVec::repeat(false, self.states.len())
    }

    /// Translate a state set back into the states it names.
    pub fn states_of(&self, set: &BitVec<u8>) -> HashSet<State> {
        set.iter_ones()
            .filter_map(|id| self.get_state(id).cloned())
            .collect()
    }
}
