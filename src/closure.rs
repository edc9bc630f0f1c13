use bitvec::prelude::*;
use std::collections::VecDeque;

use crate::fa::Symbol;
use crate::index::TransitionIndex;

/// States reachable from `seed` through zero or more epsilon transitions, the seed included.
/// The index must have been built with epsilon transitions.
pub fn epsilon_closure(index: &TransitionIndex, seed: usize) -> BitVec<u8> {
    let mut closure = index.empty_set();
    close_into(index, seed, &mut closure);
    closure
}

/// Union of the epsilon closures of every state in `states`.
pub fn epsilon_closure_of_set(index: &TransitionIndex, states: &BitVec<u8>) -> BitVec<u8> {
    let mut closure = index.empty_set();
    for state in states.iter_ones() {
        close_into(index, state, &mut closure);
    }
    closure
}

// Breadth first. A state joins the closure and has its successors queued the first time it is
// dequeued. States already in `closure` are never expanded again.
fn close_into(index: &TransitionIndex, seed: usize, closure: &mut BitVec<u8>) {
    let mut work_list: VecDeque<usize> = VecDeque::new();
    work_list.push_back(seed);

    while let Some(state) = work_list.pop_front() {
        if state >= closure.len() || closure[state] {
            continue;
        }
        closure.set(state, true);

        for target in index.targets(state, &Symbol::Epsilon) {
            if !closure[*target] {
                work_list.push_back(*target);
            }
        }
    }
}

#[cfg(test)]
mod closure_tests {
    use super::*;
    use crate::fa::{AutomatonDescription, State, Transition};

    fn chain() -> TransitionIndex {
        let automaton = AutomatonDescription::new(
            "q0",
            vec![State::from("q3")],
            vec![
                Transition::new("q0", Symbol::Epsilon, "q1"),
                Transition::new("q1", Symbol::Epsilon, "q2"),
                Transition::new("q2", Symbol::Epsilon, "q0"),
                Transition::new("q2", Symbol::Char('a'), "q3"),
            ],
        );
        TransitionIndex::new(&automaton, true)
    }

    #[test]
    fn test_closure_follows_cycle() {
        let index = chain();
        let closure = epsilon_closure(&index, 0);

        assert_eq!(closure.count_ones(), 3);
        assert!(closure[0] && closure[1] && closure[2]);
        assert!(!closure[3]);
    }

    #[test]
    fn test_closure_contains_seed() {
        let index = chain();
        let closure = epsilon_closure(&index, 3);

        assert_eq!(closure.iter_ones().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_closure_is_idempotent() {
        let index = chain();
        let once = epsilon_closure(&index, 1);
        let twice = epsilon_closure_of_set(&index, &once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_closure_without_epsilon_index() {
        let automaton = AutomatonDescription::new(
            "q0",
            vec![],
            vec![Transition::new("q0", Symbol::Epsilon, "q1")],
        );
        let index = TransitionIndex::new(&automaton, false);
        let closure = epsilon_closure(&index, 0);

        assert_eq!(closure.iter_ones().collect::<Vec<_>>(), vec![0]);
    }
}
