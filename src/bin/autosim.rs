use autosim::{load_automaton, run_with, visualize, RunConfig, Simulator};
use clap::{Arg, Command};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Command::new("autosim")
        .version("0.1")
        .author("Nagendra Kumar Jamadagni")
        .about("Classify a finite automaton and check a list of words against their expected acceptance")
        .arg(
            Arg::new("automaton")
                .short('a')
                .long("automaton")
                .value_name("AUTOMATON FILE")
                .help("JSON description of the automaton with its initial state, final states and transitions")
                .default_value("automaton.aut")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("TEST CASE FILE")
                .help("Delimited test cases, one per line: the input word and the expected result (0 or 1)")
                .default_value("tests.in")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("RESULT FILE")
                .help("The output file storing input, expected result, observed result and elapsed seconds")
                .default_value("results.out")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .value_name("CHAR")
                .help("Field delimiter of the test case and result files")
                .default_value(";")
                .value_parser(clap::value_parser!(char)),
        )
        .arg(
            Arg::new("save-graph")
                .short('s')
                .long("save-graph")
                .help("Save the automaton graph as a dot file next to the automaton, and as a jpg when graphviz is installed")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("visualize")
                .short('v')
                .long("visualize")
                .help("Visualize the automaton inside an interactive window that allows for zooming, panning and clicking of elements")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log every evaluated test case")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if args.get_flag("verbose") { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = RunConfig {
        save_graph: args.get_flag("save-graph"),
        ..RunConfig::default()
    };
    if let Some(path) = args.get_one::<PathBuf>("automaton") {
        config.automaton_path = path.clone();
    }
    if let Some(path) = args.get_one::<PathBuf>("input") {
        config.input_path = path.clone();
    }
    if let Some(path) = args.get_one::<PathBuf>("output") {
        config.output_path = path.clone();
    }
    if let Some(delimiter) = args.get_one::<char>("delimiter") {
        config.delimiter = *delimiter;
    }

    let automaton = load_automaton(&config.automaton_path)?;
    let summary = run_with(&automaton, &config)?;

    println!(
        "Simulation finished. Results stored in: {}",
        config.output_path.display()
    );
    println!(
        "{} automaton, {} test cases evaluated, {} matched the expected result",
        summary.class, summary.evaluated, summary.passed
    );

    if args.get_flag("visualize") {
        visualize(&Simulator::new(&automaton))?;
    }

    Ok(())
}
