use std::collections::VecDeque;

use tracing::debug;

use crate::{Adjacency, AnalysisError, Result};

/// Kahn's algorithm over every node of `adjacency`.
///
/// Zero in-degree nodes are released in ascending index order, so the result is deterministic.
///
/// # Errors
/// Returns [`AnalysisError::CyclicGraph`] if some nodes never reach in-degree zero.
pub fn topological_order(adjacency: &Adjacency) -> Result<Vec<usize>> {
    let total = adjacency.len();
    let mut in_degree = adjacency.in_degrees();
    let mut ready: VecDeque<usize> = (0..total).filter(|&n| in_degree[n] == 0).collect();
    let mut order = Vec::with_capacity(total);

    while let Some(node) = ready.pop_front() {
        order.push(node);
        for &next in adjacency.fanout(node) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    if order.len() != total {
        debug!(
            "Topological sort stalled after {} of {} nodes",
            order.len(),
            total
        );
        return Err(AnalysisError::CyclicGraph {
            visited: order.len(),
            total,
        });
    }
    Ok(order)
}
