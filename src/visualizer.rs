use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::process::Command;

use crate::fa::FA;
use color_eyre::eyre::{Report, Result};
use eframe::{run_native, App, CreationContext, NativeOptions};
use egui::Color32;
use egui_graphs::{
    DefaultGraphView, Graph, SettingsInteraction, SettingsNavigation, SettingsStyle,
};
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use petgraph::{graph::EdgeIndex, graph::NodeIndex, prelude::StableGraph};
use tracing::{info, warn};

struct Visualizer {
    graph: Graph,
}

impl Visualizer {
    fn new(_: &CreationContext<'_>, graph: Graph) -> Self {
        Visualizer { graph }
    }
}

impl App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let navigation_settings = &SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(true);
            let interactive_settings = &SettingsInteraction::new()
                .with_dragging_enabled(true)
                .with_node_clicking_enabled(true)
                .with_node_selection_enabled(true)
                .with_edge_clicking_enabled(true)
                .with_edge_selection_enabled(true);
            let style_settings = &SettingsStyle::default().with_labels_always(true);
            ui.add(
                &mut DefaultGraphView::new(&mut self.graph)
                    .with_styles(style_settings)
                    .with_interactions(interactive_settings)
                    .with_navigations(navigation_settings),
            );
        });
    }
}

fn state_label<T: FA>(fa: &T, state_idx: usize) -> String {
    match fa.get_index().get_state(state_idx) {
        Some(state) => state.to_string(),
        None => format!("#{}", state_idx),
    }
}

/// State label prefixed with its roles, a start state that is also final carries both.
fn role_label<T: FA>(fa: &T, state_idx: usize) -> String {
    let mut label = String::new();
    if state_idx == fa.get_start_state() {
        label.push_str("Start\n");
    }
    if fa.get_acceptor_states()[state_idx] {
        label.push_str("Accept\n");
    }
    label.push_str(&state_label(fa, state_idx));
    label
}

/// One label per (from, to) pair, parallel transitions merged as "a, b".
fn edge_labels<T: FA>(fa: &T) -> BTreeMap<(usize, usize), String> {
    let mut symbols: BTreeMap<(usize, usize), Vec<String>> = BTreeMap::new();

    for state_idx in 0..fa.get_num_states() {
        for (symbol, targets) in fa.get_index().get_state_transitions(state_idx) {
            for target in targets {
                symbols
                    .entry((state_idx, *target))
                    .or_default()
                    .push(symbol.to_string());
            }
        }
    }

    symbols
        .into_iter()
        .map(|(edge, mut labels)| {
            labels.sort();
            (edge, labels.join(", "))
        })
        .collect()
}

fn generate_stable_graph<T: FA>(fa: &T) -> Result<Graph> {
    let mut stable_graph = StableGraph::new();

    let num_states = fa.get_num_states();

    let start_node_color = Color32::from_rgb(20, 67, 130);
    let accept_node_color = Color32::from_rgb(20, 130, 90);

    let labels = edge_labels(fa);
    let mut edge_map: BTreeMap<(usize, usize), EdgeIndex> = BTreeMap::new();

    for _state_idx in 0..num_states {
        stable_graph.add_node(());
    }

    for (from, to) in labels.keys() {
        let edge_idx = stable_graph.add_edge(NodeIndex::new(*from), NodeIndex::new(*to), ());
        edge_map.insert((*from, *to), edge_idx);
    }

    let mut graph = Graph::from(&stable_graph);
    let missing = || Report::msg("graph element disappeared during conversion");

    for state_idx in 0..num_states {
        let node = graph.node_mut(NodeIndex::new(state_idx)).ok_or_else(missing)?;
        node.set_label(state_label(fa, state_idx));

        if state_idx == fa.get_start_state() {
            node.set_color(start_node_color);
        }
        if fa.get_acceptor_states()[state_idx] {
            node.set_color(accept_node_color);
        }
    }

    for (edge, label) in labels {
        let edge_idx = edge_map.get(&edge).ok_or_else(missing)?;
        let edge = graph.edge_mut(*edge_idx).ok_or_else(missing)?;
        edge.set_label(label);
    }

    Ok(graph)
}

/// Render the automaton in graphviz DOT syntax
pub fn to_dot<T: FA>(fa: &T) -> String {
    let mut graph = DiGraph::new();
    let mut node_map = Vec::with_capacity(fa.get_num_states());

    for state_idx in 0..fa.get_num_states() {
        node_map.push(graph.add_node(role_label(fa, state_idx)));
    }

    for ((from, to), label) in edge_labels(fa) {
        graph.add_edge(node_map[from], node_map[to], label);
    }

    Dot::new(&graph).to_string()
}

/// Save the automaton graph as `<filename>.dot` and, when graphviz is available, `<filename>.jpg`
pub fn save_graph<T: FA>(fa: &T, filename: &str) -> Result<()> {
    let dot_filename = format!("{}.dot", filename);
    let mut dot_file = File::create(&dot_filename)?;
    dot_file.write_all(to_dot(fa).as_bytes())?;

    let jpg_filename = format!("{}.jpg", filename);
    match Command::new("dot")
        .args(["-Tjpg", &dot_filename, "-o", &jpg_filename])
        .output()
    {
        Ok(output) if output.status.success() => {
            info!("automaton visualization saved as {}", jpg_filename)
        }
        Ok(output) => warn!(
            "graphviz failed to render {}: {}",
            dot_filename,
            String::from_utf8_lossy(&output.stderr)
        ),
        Err(error) => warn!("graphviz is not available, kept {}: {}", dot_filename, error),
    }

    Ok(())
}

/// Visualizes the finite automata provided
pub fn visualize<T: FA>(fa: &T) -> Result<()> {
    let graph = generate_stable_graph(fa)?;
    run_native(
        "finite automata visualizer",
        NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Visualizer::new(cc, graph)))),
    )
    .map_err(|error| Report::msg(error.to_string()))
}
