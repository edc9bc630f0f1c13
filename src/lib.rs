//! # autosim
//!
//! A finite automaton simulator.
//!
//! This library provides functionality to:
//! - Load an automaton description (initial state, final states, transitions) from JSON
//! - Classify it as a DFA, an NFA or an epsilon-NFA from its transition relation
//! - Decide acceptance of input words by deterministic or subset simulation
//! - Batch evaluate delimited test cases against their expected outcome, timing each word
//! - Visualize the automaton state machine

pub mod batch;
pub mod classify;
pub mod closure;
pub mod dfa;
pub mod fa;
pub mod index;
pub mod io;
pub mod nfa;
pub mod runner;
pub mod simulator;
pub mod visualizer;

// Re-export commonly used functions for convenience
pub use batch::{evaluate_batch, BatchEvaluator, TestCase, TestResult};
pub use classify::classify;
pub use fa::{AutomatonClass, AutomatonDescription, State, Symbol, Transition, FA};
pub use io::{load_automaton, parse_automaton};
pub use runner::{run, run_with, RunConfig, RunSummary};
pub use simulator::{simulate_word, Simulator};
pub use visualizer::visualize;
