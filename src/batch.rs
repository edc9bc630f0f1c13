/* Batch evaluation of test cases. Each record is a list of fields, the first is the input word
 * and the second the expected outcome. Records with fewer than two fields are skipped. */

use color_eyre::eyre::{Report, Result};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::fa::{AutomatonClass, AutomatonDescription};
use crate::simulator::Simulator;

#[derive(Debug)]
pub enum BatchError {
    /// The expected outcome of a record is neither 0 nor 1
    InvalidExpected(String, String),
    /// The test case source could not be read
    ReadError(String),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::InvalidExpected(word, value) => write!(
                f,
                "Error: Expected result {:?} for input {:?} must be 0 or 1!",
                value, word
            ),
            BatchError::ReadError(reason) => {
                write!(f, "Error: Failed to read the test cases! {}", reason)
            }
        }
    }
}

impl std::error::Error for BatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: String,
    pub expected: u8,
}

impl TestCase {
    pub fn new(input: &str, expected: u8) -> Self {
        TestCase {
            input: input.to_string(),
            expected,
        }
    }

    /// Build a test case from a record. `Ok(None)` marks a malformed record that should be
    /// skipped, an expected value other than 0 or 1 is an error.
    pub fn from_record(fields: &[String]) -> Result<Option<Self>> {
        if fields.len() < 2 {
            return Ok(None);
        }

        let expected = match fields[1].trim() {
            "0" => 0,
            "1" => 1,
            other => {
                let err = BatchError::InvalidExpected(fields[0].clone(), other.to_string());
                return Err(Report::new(err));
            }
        };

        Ok(Some(TestCase::new(&fields[0], expected)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub case: TestCase,
    pub observed: u8,
    pub elapsed: Duration,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.case.expected == self.observed
    }

    /// Elapsed wall clock time rounded to 6 decimal digits
    pub fn elapsed_seconds(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 1e6).round() / 1e6
    }
}

pub struct BatchEvaluator {
    simulator: Simulator,
}

impl BatchEvaluator {
    /// Classify the automaton and build its engine once for the whole batch.
    pub fn new(automaton: &AutomatonDescription) -> Self {
        BatchEvaluator {
            simulator: Simulator::new(automaton),
        }
    }

    pub fn class(&self) -> AutomatonClass {
        self.simulator.class()
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Run one test case, timing only the simulation itself.
    pub fn evaluate_case(&self, case: TestCase) -> TestResult {
        let start = Instant::now();
        let observed = self.simulator.simulate(&case.input);
        let elapsed = start.elapsed();

        debug!(
            "input {:?}: expected {}, observed {}, took {:?}",
            case.input, case.expected, observed, elapsed
        );

        TestResult {
            case,
            observed,
            elapsed,
        }
    }

    pub fn evaluate_record(&self, fields: &[String]) -> Result<Option<TestResult>> {
        match TestCase::from_record(fields)? {
            Some(case) => Ok(Some(self.evaluate_case(case))),
            None => {
                debug!("skipping malformed record {:?}", fields);
                Ok(None)
            }
        }
    }

    /// Lazily evaluate records in order, yielding one result per well formed record.
    pub fn results<'a, I>(&'a self, records: I) -> impl Iterator<Item = Result<TestResult>> + 'a
    where
        I: IntoIterator<Item = Vec<String>>,
        I::IntoIter: 'a,
    {
        records
            .into_iter()
            .filter_map(move |fields| self.evaluate_record(&fields).transpose())
    }
}

/// Evaluate every record against the automaton. Malformed records produce no result, the first
/// invalid expected value aborts the batch.
pub fn evaluate_batch<I>(automaton: &AutomatonDescription, records: I) -> Result<Vec<TestResult>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let evaluator = BatchEvaluator::new(automaton);
    let results: Result<Vec<TestResult>> = evaluator.results(records).collect();
    results
}

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::fa::{State, Symbol, Transition};

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    fn alternating() -> AutomatonDescription {
        AutomatonDescription::new(
            "q0",
            vec![State::from("q0")],
            vec![
                Transition::new("q0", Symbol::Char('a'), "q1"),
                Transition::new("q1", Symbol::Char('b'), "q0"),
            ],
        )
    }

    #[test]
    fn test_from_record() {
        assert_eq!(
            TestCase::from_record(&record(&["ab", "1"])).unwrap(),
            Some(TestCase::new("ab", 1))
        );
        assert_eq!(
            TestCase::from_record(&record(&["", " 0 ", "extra"])).unwrap(),
            Some(TestCase::new("", 0))
        );
        assert_eq!(TestCase::from_record(&record(&["ab"])).unwrap(), None);
        assert_eq!(TestCase::from_record(&record(&[])).unwrap(), None);
    }

    #[test]
    fn test_invalid_expected() {
        let err = TestCase::from_record(&record(&["ab", "yes"])).unwrap_err();
        let err = err.downcast_ref::<BatchError>().unwrap();

        match err {
            BatchError::InvalidExpected(word, value) => {
                assert_eq!(word, "ab");
                assert_eq!(value, "yes");
            }
            _ => panic!("unexpected error {err}"),
        }
    }

    #[test]
    fn test_expected_outside_zero_one_is_rejected() {
        for value in ["01", "+1", "2", "-0", ""] {
            let err = TestCase::from_record(&record(&["ab", value])).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<BatchError>(),
                    Some(BatchError::InvalidExpected(_, _))
                ),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let records = vec![
            record(&["ab", "1"]),
            record(&["a", "0"]),
            record(&["abab", "0"]),
        ];
        let results = evaluate_batch(&alternating(), records).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].case.input, "ab");
        assert_eq!(results[0].observed, 1);
        assert_eq!(results[1].observed, 0);
        assert_eq!(results[2].observed, 1);
        assert!(results[0].passed());
        assert!(results[1].passed());
        assert!(!results[2].passed());
    }

    #[test]
    fn test_batch_skips_malformed_records() {
        let records = vec![record(&["ab", "1"]), record(&[]), record(&["ab"])];
        let results = evaluate_batch(&alternating(), records).unwrap();

        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_batch_aborts_on_invalid_expected() {
        let records = vec![record(&["ab", "1"]), record(&["ab", "2"])];
        assert!(evaluate_batch(&alternating(), records).is_err());
    }

    #[test]
    fn test_elapsed_rounding() {
        let result = TestResult {
            case: TestCase::new("a", 0),
            observed: 0,
            elapsed: Duration::from_nanos(1_234_567),
        };
        assert_eq!(result.elapsed_seconds(), 0.001235);
    }
}
