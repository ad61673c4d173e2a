//! Layered layout pipeline: cycle breaking, longest-path ranking,
//! barycenter ordering, coordinate assignment.

use crate::error::Result;
use crate::graph::{Direction, Graph, LayoutOptions, LayoutResult, NodePlacement, Point};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

const ORDERING_SWEEPS: usize = 4;

pub fn layered(graph: &Graph, options: &LayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let n = graph.nodes.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }

    let index: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    // Edge endpoints resolved to node indices. Self loops do not influence
    // ranks or ordering.
    let mut arcs: Vec<(usize, usize)> = Vec::with_capacity(graph.edges.len());
    for e in &graph.edges {
        let (Some(src), Some(dst)) = (
            graph.resolve_endpoint(&e.source),
            graph.resolve_endpoint(&e.target),
        ) else {
            continue;
        };
        let (u, v) = (index[src], index[dst]);
        if u != v {
            arcs.push((u, v));
        }
    }

    let dag = break_cycles(n, &arcs);
    let rank = rank_longest_path(n, &dag);
    let layers = order_layers(n, &rank, &dag);
    Ok(assign_coordinates(graph, options, &rank, &layers, &dag))
}

/// DFS cycle breaking: back arcs are traversed in the reverse direction, as
/// in the acyclic phase of a dagre-style pipeline.
fn break_cycles(n: usize, arcs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (ai, &(u, _)) in arcs.iter().enumerate() {
        adj[u].push(ai);
    }

    let mut mark = vec![Mark::White; n];
    let mut reversed = vec![false; arcs.len()];
    for root in 0..n {
        if mark[root] != Mark::White {
            continue;
        }
        mark[root] = Mark::Gray;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(&(u, cursor)) = stack.last() {
            if cursor >= adj[u].len() {
                mark[u] = Mark::Black;
                stack.pop();
                continue;
            }
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }
            let ai = adj[u][cursor];
            let v = arcs[ai].1;
            match mark[v] {
                Mark::Gray => reversed[ai] = true,
                Mark::White => {
                    mark[v] = Mark::Gray;
                    stack.push((v, 0));
                }
                Mark::Black => {}
            }
        }
    }

    arcs.iter()
        .enumerate()
        .map(|(ai, &(u, v))| if reversed[ai] { (v, u) } else { (u, v) })
        .collect()
}

fn rank_longest_path(n: usize, dag: &[(usize, usize)]) -> Vec<usize> {
    let mut indegree = vec![0usize; n];
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in dag {
        out[u].push(v);
        indegree[v] += 1;
    }

    let mut rank = vec![0usize; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    while let Some(u) = queue.pop_front() {
        for &v in &out[u] {
            rank[v] = rank[v].max(rank[u] + 1);
            indegree[v] -= 1;
            if indegree[v] == 0 {
                queue.push_back(v);
            }
        }
    }
    rank
}

/// Groups nodes into layers and runs alternating barycenter sweeps to reduce
/// crossings. Nodes without neighbors in the fixed layer keep their order.
fn order_layers(n: usize, rank: &[usize], dag: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let max_rank = rank.iter().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for v in 0..n {
        layers[rank[v]].push(v);
    }

    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in dag {
        preds[v].push(u);
        succs[u].push(v);
    }

    let mut pos = vec![0usize; n];
    let reindex = |layers: &[Vec<usize>], pos: &mut [usize]| {
        for layer in layers {
            for (i, &v) in layer.iter().enumerate() {
                pos[v] = i;
            }
        }
    };
    reindex(&layers, &mut pos);

    for sweep in 0..ORDERING_SWEEPS {
        let downward = sweep % 2 == 0;
        let range: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };
        for l in range {
            let neighbors = if downward { &preds } else { &succs };
            let mut keyed: Vec<(f64, usize)> = layers[l]
                .iter()
                .map(|&v| {
                    let ns = &neighbors[v];
                    let key = if ns.is_empty() {
                        pos[v] as f64
                    } else {
                        ns.iter().map(|&u| pos[u] as f64).sum::<f64>() / ns.len() as f64
                    };
                    (key, v)
                })
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            layers[l] = keyed.into_iter().map(|(_, v)| v).collect();
            reindex(&layers, &mut pos);
        }
    }

    layers
}

fn assign_coordinates(
    graph: &Graph,
    options: &LayoutOptions,
    rank: &[usize],
    layers: &[Vec<usize>],
    dag: &[(usize, usize)],
) -> LayoutResult {
    let n = graph.nodes.len();
    // Along the layout direction a node occupies its "primary" extent; the
    // stacking axis within a layer is the "breadth" extent.
    let (primary, breadth_size): (Vec<f64>, Vec<f64>) = match options.direction {
        Direction::Right => (
            graph.nodes.iter().map(|node| node.width).collect(),
            graph.nodes.iter().map(|node| node.height).collect(),
        ),
        Direction::Down => (
            graph.nodes.iter().map(|node| node.height).collect(),
            graph.nodes.iter().map(|node| node.width).collect(),
        ),
    };

    let mut layer_offset = vec![0.0f64; layers.len()];
    for l in 1..layers.len() {
        let prev_extent = layers[l - 1]
            .iter()
            .map(|&v| primary[v])
            .fold(0.0f64, f64::max);
        layer_offset[l] = layer_offset[l - 1] + prev_extent + options.layer_spacing;
    }

    let mut breadth = vec![0.0f64; n];
    for layer in layers {
        let mut b = 0.0;
        for &v in layer {
            breadth[v] = b;
            b += breadth_size[v] + options.node_spacing;
        }
    }

    if options.node_placement == NodePlacement::NetworkSimplex {
        align_to_predecessors(dag, layers, &mut breadth, &breadth_size, options.node_spacing);
    }

    let mut result = LayoutResult::default();
    for (v, node) in graph.nodes.iter().enumerate() {
        let along = layer_offset[rank[v]];
        let across = breadth[v];
        let (x, y) = match options.direction {
            Direction::Right => (along, across),
            Direction::Down => (across, along),
        };
        result.positions.insert(node.id.clone(), Point { x, y });
    }
    result
}

/// Placement refinement: pulls each node toward the barycenter of its
/// predecessors while keeping the intra-layer spacing intact.
fn align_to_predecessors(
    dag: &[(usize, usize)],
    layers: &[Vec<usize>],
    breadth: &mut [f64],
    breadth_size: &[f64],
    node_spacing: f64,
) {
    let n = breadth.len();
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in dag {
        preds[v].push(u);
    }

    for layer in layers.iter().skip(1) {
        let mut floor = f64::NEG_INFINITY;
        for &v in layer {
            let desired = if preds[v].is_empty() {
                breadth[v]
            } else {
                let center = preds[v]
                    .iter()
                    .map(|&u| breadth[u] + breadth_size[u] / 2.0)
                    .sum::<f64>()
                    / preds[v].len() as f64;
                center - breadth_size[v] / 2.0
            };
            let b = desired.max(floor);
            breadth[v] = b;
            floor = b + breadth_size[v] + node_spacing;
        }
    }
}
