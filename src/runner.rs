use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::batch::BatchEvaluator;
use crate::fa::{AutomatonClass, AutomatonDescription};
use crate::io::{create_result_file, load_automaton, read_test_records};
use crate::visualizer::save_graph;

/// Where to read from and write to for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub automaton_path: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub delimiter: char,
    pub save_graph: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            automaton_path: PathBuf::from("automaton.aut"),
            input_path: PathBuf::from("tests.in"),
            output_path: PathBuf::from("results.out"),
            delimiter: ';',
            save_graph: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub class: AutomatonClass,
    pub evaluated: usize,
    pub passed: usize,
}

/// Evaluate the configured test cases against an already loaded automaton, streaming every
/// result to the output file as soon as it is produced.
pub fn run_with(automaton: &AutomatonDescription, config: &RunConfig) -> Result<RunSummary> {
    let evaluator = BatchEvaluator::new(automaton);
    let records = read_test_records(&config.input_path, config.delimiter)?;
    let mut writer = create_result_file(&config.output_path, config.delimiter)?;

    let mut evaluated = 0;
    let mut passed = 0;

    for record in records {
        let fields = record?;
        if let Some(result) = evaluator.evaluate_record(&fields)? {
            writer.write_result(&result)?;
            evaluated += 1;
            if result.passed() {
                passed += 1;
            }
        }
    }
    writer.finish()?;

    info!(
        "evaluated {} test cases, {} matched the expected result",
        evaluated, passed
    );

    if config.save_graph {
        save_graph(evaluator.simulator(), &graph_file_stem(&config.automaton_path))?;
    }

    Ok(RunSummary {
        class: evaluator.class(),
        evaluated,
        passed,
    })
}

/// Load the automaton and run the whole batch. The output file is only created once the
/// automaton has been loaded successfully.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let automaton = load_automaton(&config.automaton_path)?;
    run_with(&automaton, config)
}

fn graph_file_stem(automaton_path: &Path) -> String {
    let stem = automaton_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "automaton".to_string());

    match automaton_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(stem).to_string_lossy().to_string()
        }
        _ => stem,
    }
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[test]
    fn test_graph_file_stem() {
        assert_eq!(graph_file_stem(Path::new("automaton.aut")), "automaton");
        assert_eq!(
            graph_file_stem(Path::new("data/sample.json")),
            Path::new("data").join("sample").to_string_lossy()
        );
    }

    #[test]
    fn test_missing_automaton_creates_no_output() {
        let output_path = std::env::temp_dir().join("autosim_runner_missing_automaton.out");
        let _ = std::fs::remove_file(&output_path);

        let config = RunConfig {
            automaton_path: PathBuf::from("does/not/exist.aut"),
            output_path: output_path.clone(),
            ..RunConfig::default()
        };

        assert!(run(&config).is_err());
        assert!(!output_path.exists());
    }
}
