//! Case driver: load, span, breach, respan.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use knightnet_core::loader::LoadError;
use knightnet_core::mst::{list_tree_edges, MstEngine, MstResult};
use knightnet_core::{Edge, LoadPolicy, NetworkGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// How the breached node is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreachTarget {
    /// Breach this node.
    Node(String),
    /// Pick uniformly from the sorted real nodes with this seed.
    Seeded(u64),
}

/// Everything needed to run one case.
#[derive(Debug, Clone)]
pub struct CaseSettings {
    pub input: PathBuf,
    pub max_visibility: i64,
    pub start: Option<String>,
    pub breach: BreachTarget,
    pub policy: LoadPolicy,
}

/// One spanning computation and its canonical listing.
#[derive(Debug, Clone, Serialize)]
pub struct SpanPhase {
    pub start: String,
    pub result: MstResult,
    pub listed: Vec<Edge>,
}

/// What happened after the initial tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Fewer than two real nodes; nothing was spanned.
    NoRealNodes,
    /// Initial tree computed, node breached, remaining network respanned.
    Reconnected {
        initial: SpanPhase,
        breached: String,
        after: SpanPhase,
    },
}

/// Full record of one case, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub input: PathBuf,
    pub max_visibility: i64,
    pub skipped: Vec<LoadError>,
    pub real_nodes: Vec<String>,
    pub real_graph: Vec<Edge>,
    pub outcome: CaseOutcome,
}

/// Runs one case end to end.
pub fn run_case(settings: &CaseSettings) -> Result<CaseReport> {
    let (mut graph, load) = NetworkGraph::load(&settings.input, settings.policy)
        .with_context(|| format!("failed to load {}", settings.input.display()))?;

    let real = graph.real_nodes();
    let real_graph: Vec<Edge> = graph
        .eligible_edges(settings.max_visibility)
        .into_iter()
        .cloned()
        .collect();
    tracing::info!(
        input = %settings.input.display(),
        real = real.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "case loaded"
    );

    let mut report = CaseReport {
        input: settings.input.clone(),
        max_visibility: settings.max_visibility,
        skipped: load.skipped,
        real_nodes: real.iter().cloned().collect(),
        real_graph,
        outcome: CaseOutcome::NoRealNodes,
    };
    if real.len() <= 1 {
        return Ok(report);
    }

    let mut engine = MstEngine::new(settings.max_visibility);
    let start = settings
        .start
        .clone()
        .or_else(|| real.first().cloned())
        .unwrap_or_default();
    let initial = span(&mut engine, &graph, start);

    let breached = pick_breach(&real, &settings.breach)?;
    tracing::info!(node = %breached, "breaching node");
    graph.remove_node(&breached);

    // At least one real node survives: there were two or more and one was removed.
    let next_start = graph.real_nodes().first().cloned().unwrap_or_default();
    let after = span(&mut engine, &graph, next_start);
    report.outcome = CaseOutcome::Reconnected {
        initial,
        breached,
        after,
    };
    Ok(report)
}

fn span(engine: &mut MstEngine, graph: &NetworkGraph, start: String) -> SpanPhase {
    let result = engine.compute(graph, &start);
    let listed = list_tree_edges(&result);
    SpanPhase {
        start,
        result,
        listed,
    }
}

/// Chooses the node to breach. `real` is sorted, so a seed always picks the same node.
///
/// A named target must be one of the real nodes.
pub fn pick_breach(real: &BTreeSet<String>, target: &BreachTarget) -> Result<String> {
    match target {
        BreachTarget::Node(node) => {
            if !real.contains(node) {
                bail!("breach node {node} is not a real node");
            }
            Ok(node.clone())
        }
        BreachTarget::Seeded(seed) => {
            let nodes: Vec<&String> = real.iter().collect();
            if nodes.is_empty() {
                bail!("no real nodes to breach");
            }
            let mut rng = StdRng::seed_from_u64(*seed);
            Ok(nodes[rng.gen_range(0..nodes.len())].clone())
        }
    }
}
