//! Graph traversals and single-source shortest paths

use super::errors::{ExecResult, ExecutionError};
use crate::dispatch::GraphInput;
use crate::trace::{Counter, GraphView, HighlightType, Recorder, Step};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

pub const DFS_CODE: &str = "\
procedure dfs(G, v)
  mark v as visited
  for each neighbor u of v
    if u is not visited
      dfs(G, u)
  end for";

pub const BFS_CODE: &str = "\
procedure bfs(G, s)
  mark s as visited; enqueue(Q, s)
  while Q is not empty
    v = dequeue(Q)
    for each neighbor u of v
      if u is not visited
        mark u as visited; enqueue(Q, u)
  end while";

pub const DIJKSTRA_CODE: &str = "\
procedure dijkstra(G, s)
  dist[v] = infinity for all v; dist[s] = 0
  while some vertex is unvisited
    u = unvisited vertex with the smallest dist
    mark u as visited
    for each edge (u, v, w)
      if dist[u] + w < dist[v]
        dist[v] = dist[u] + w
  return dist";

impl GraphInput {
    fn view(&self) -> GraphView {
        GraphView::capture(&self.nodes, &self.edges)
    }

    fn contains(&self, id: usize) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Neighbours of `node` in edge order
    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.edges
            .iter()
            .filter_map(move |e| e.neighbor_of(node).map(|to| (to, e.weight)))
    }
}

/// Emit the explanatory step for a missing start node; returns whether it was missing
fn missing_start(graph: &GraphInput, start: usize, view: GraphView, rec: &mut Recorder) -> bool {
    if graph.contains(start) {
        return false;
    }
    rec.push(
        Step::new(format!("Start node {} is not in the graph", start), view)
            .at_line(1)
            .var("start", start),
    );
    true
}

pub fn dfs(graph: &GraphInput, start: usize, rec: &mut Recorder) -> ExecResult<()> {
    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new(format!("Starting depth-first search from node {}", start), graph.view())
            .at_line(1)
            .var("start", start),
    );
    if missing_start(graph, start, graph.view(), rec) {
        return Ok(());
    }

    let mut visited = FxHashSet::default();
    let mut order = Vec::new();
    dfs_visit(graph, start, None, &mut visited, &mut order, rec);

    rec.push(
        Step::new(
            format!("DFS order: {}", join_ids(&order)),
            graph.view().highlight(HighlightType::Visited, order.clone()),
        )
        .at_line(6)
        .var("visited", order.len()),
    );
    Ok(())
}

fn dfs_visit(
    graph: &GraphInput,
    node: usize,
    parent: Option<usize>,
    visited: &mut FxHashSet<usize>,
    order: &mut Vec<usize>,
    rec: &mut Recorder,
) {
    visited.insert(node);
    order.push(node);
    rec.count(Counter::Operations);

    let mut view = graph.view().highlight(HighlightType::Visiting, [node]);
    if let Some(p) = parent {
        view = view.edge(p, node);
    }
    rec.push(
        Step::new(format!("Visiting node {}", node), view)
            .at_line(2)
            .var("node", node)
            .var("depth", order.len() - 1),
    );

    let neighbors: Vec<usize> = graph.neighbors(node).map(|(to, _)| to).collect();
    for next in neighbors {
        if visited.contains(&next) {
            rec.push(
                Step::new(
                    format!("Node {} already visited, skipping", next),
                    graph.view().highlight(HighlightType::Visited, [next]).edge(node, next),
                )
                .at_line(4)
                .var("node", node)
                .var("neighbor", next),
            );
        } else {
            dfs_visit(graph, next, Some(node), visited, order, rec);
        }
    }
}

pub fn bfs(graph: &GraphInput, start: usize, rec: &mut Recorder) -> ExecResult<()> {
    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new(format!("Starting breadth-first search from node {}", start), graph.view())
            .at_line(1)
            .var("start", start),
    );
    if missing_start(graph, start, graph.view(), rec) {
        return Ok(());
    }

    let mut visited = FxHashSet::default();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited.insert(start);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        rec.count(Counter::Operations);
        rec.push(
            Step::new(format!("Dequeued node {}", node), graph.view().highlight(HighlightType::Current, [node]))
                .at_line(4)
                .var("node", node)
                .var("queue", join_ids(queue.make_contiguous())),
        );

        let neighbors: Vec<usize> = graph.neighbors(node).map(|(to, _)| to).collect();
        for next in neighbors {
            if visited.insert(next) {
                queue.push_back(next);
                rec.push(
                    Step::new(
                        format!("Discovered node {}, adding it to the queue", next),
                        graph.view().highlight(HighlightType::Visiting, [next]).edge(node, next),
                    )
                    .at_line(7)
                    .var("node", node)
                    .var("neighbor", next)
                    .var("queue", join_ids(queue.make_contiguous())),
                );
            }
        }
    }

    rec.push(
        Step::new(
            format!("BFS order: {}", join_ids(&order)),
            graph.view().highlight(HighlightType::Visited, order.clone()),
        )
        .at_line(8)
        .var("visited", order.len()),
    );
    Ok(())
}

/// Dijkstra over the directed, weighted edges. Negative weights are rejected.
pub fn dijkstra(graph: &GraphInput, start: usize, rec: &mut Recorder) -> ExecResult<()> {
    if let Some(edge) = graph.edges.iter().find(|e| e.weight < 0) {
        return Err(ExecutionError::InvalidInput {
            algorithm: "dijkstra",
            requirement: format!("non-negative edge weights (edge {}-{} has weight {})", edge.from, edge.to, edge.weight),
        });
    }

    rec.track(&[Counter::Operations]);
    let mut dist: FxHashMap<usize, i64> = FxHashMap::default();
    let mut previous: FxHashMap<usize, usize> = FxHashMap::default();
    rec.push(
        Step::new(format!("Dijkstra from node {}: every distance starts at infinity", start), graph.view().weighted())
            .at_line(2)
            .var("start", start),
    );
    if missing_start(graph, start, graph.view().weighted(), rec) {
        return Ok(());
    }
    dist.insert(start, 0);

    let mut visited = FxHashSet::default();
    let mut order = Vec::new();
    loop {
        // node ids are sorted, so ties go to the smallest id
        let next = graph
            .nodes
            .iter()
            .filter(|n| !visited.contains(&n.id))
            .filter_map(|n| dist.get(&n.id).map(|&d| (d, n.id)))
            .min();
        let Some((d, u)) = next else {
            break;
        };

        visited.insert(u);
        order.push(u);
        rec.count(Counter::Operations);
        rec.push(
            Step::new(
                format!("Visiting node {} with distance {}", u, d),
                graph.view().weighted().highlight(HighlightType::Current, [u]),
            )
            .at_line(4)
            .var("u", u)
            .var("dist[u]", d),
        );

        let edges: Vec<(usize, i64)> = graph.neighbors(u).collect();
        for (v, w) in edges {
            if visited.contains(&v) {
                continue;
            }
            let candidate = d.saturating_add(w);
            let known = dist.get(&v).copied();
            rec.push(
                Step::new(
                    format!(
                        "Edge {} -> {} (weight {}): {} + {} = {} vs {}",
                        u,
                        v,
                        w,
                        d,
                        w,
                        candidate,
                        known.map_or_else(|| "∞".to_string(), |k| k.to_string())
                    ),
                    graph.view().weighted().highlight(HighlightType::Compare, [u, v]).edge(u, v),
                )
                .at_line(6)
                .var("u", u)
                .var("v", v)
                .var("w", w),
            );

            if known.map_or(true, |k| candidate < k) {
                dist.insert(v, candidate);
                previous.insert(v, u);
                rec.push(
                    Step::new(
                        format!("Updated distance of node {} to {}", v, candidate),
                        graph.view().weighted().highlight(HighlightType::Found, [v]).edge(u, v),
                    )
                    .at_line(7)
                    .var("v", v)
                    .var("dist[v]", candidate),
                );
            }
        }
    }

    let mut finish = graph.view().weighted().highlight(HighlightType::Visited, order.clone());
    for (&v, &u) in &previous {
        finish = finish.edge(u, v);
    }
    finish.highlighted_edges.sort_unstable();
    let mut step = Step::new("Shortest distances computed", finish).at_line(8);
    for node in &graph.nodes {
        let label = format!("dist[{}]", node.id);
        step = match dist.get(&node.id) {
            Some(&d) => step.var(&label, d),
            None => step.var(&label, "∞"),
        };
    }
    rec.push(step);
    Ok(())
}

fn join_ids(ids: &[usize]) -> String {
    ids.iter().map(usize::to_string).collect::<Vec<_>>().join(" -> ")
}
