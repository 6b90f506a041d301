//! Community detection algorithms
//!
//! Greedy modularity maximization (Clauset-Newman-Moore) on the unweighted
//! undirected projection of the view.
//!
//! Among merges of equal gain the pair with the lowest community indices
//! wins, so on tied graphs the partition (and occasionally its modularity)
//! can differ from other CNM implementations such as networkx.

use super::common::{GraphView, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Result of community detection
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityResult {
    /// Disjoint node groups, largest first, members ascending
    pub communities: Vec<Vec<NodeId>>,
    /// Modularity of the returned partition
    pub modularity: f64,
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    /// Merge the sets of `i` and `j`, returning the surviving root.
    fn union(&mut self, i: usize, j: usize) -> usize {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i == root_j {
            return root_i;
        }
        if self.rank[root_i] < self.rank[root_j] {
            self.parent[root_i] = root_j;
            root_j
        } else if self.rank[root_i] > self.rank[root_j] {
            self.parent[root_j] = root_i;
            root_i
        } else {
            self.parent[root_j] = root_i;
            self.rank[root_i] += 1;
            root_i
        }
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Greedy modularity communities
///
/// Starts from singletons and repeatedly merges the pair of connected
/// communities with the largest modularity gain. Stops when no merge has a
/// strictly positive gain. Ties go to the pair with the lowest indices.
pub fn greedy_modularity_communities(view: &GraphView) -> CommunityResult {
    let n = view.node_count;
    let adjacency = view.undirected_adjacency();

    let mut degree: Vec<f64> = adjacency.iter().map(|nbrs| nbrs.len() as f64).collect();
    let m = degree.iter().sum::<f64>() / 2.0;

    let mut uf = UnionFind::new(n);

    if m > 0.0 {
        // Edge count between each pair of communities, keyed (low, high).
        let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs.range(u + 1..) {
                *links.entry((u, v)).or_insert(0.0) += 1.0;
            }
        }

        loop {
            let mut best: Option<(f64, usize, usize)> = None;
            for (&(a, b), &l) in &links {
                let gain = l / m - degree[a] * degree[b] / (2.0 * m * m);
                if best.map_or(true, |(g, _, _)| gain > g) {
                    best = Some((gain, a, b));
                }
            }

            let Some((gain, a, b)) = best else { break };
            if gain <= 0.0 {
                break;
            }

            let root = uf.union(a, b);
            let gone = if root == a { b } else { a };
            degree[root] += degree[gone];
            degree[gone] = 0.0;

            // Re-key every link touching the merged pair onto the surviving root.
            let touched: Vec<(usize, usize)> = links
                .keys()
                .filter(|(x, y)| *x == a || *y == a || *x == b || *y == b)
                .copied()
                .collect();
            for key in touched {
                let Some(l) = links.remove(&key) else { continue };
                let other = if key.0 == a || key.0 == b { key.1 } else { key.0 };
                if other == a || other == b {
                    continue;
                }
                *links.entry(ordered(root, other)).or_insert(0.0) += l;
            }
        }
    }

    let mut groups: HashMap<usize, Vec<NodeId>> = HashMap::new();
    for idx in 0..n {
        let root = uf.find(idx);
        groups.entry(root).or_default().push(view.index_to_node[idx]);
    }

    let mut communities: Vec<Vec<NodeId>> = groups
        .into_values()
        .map(|mut members| {
            members.sort_unstable();
            members
        })
        .collect();
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    let modularity = modularity(view, &communities);
    CommunityResult { communities, modularity }
}

/// Modularity of a partition of the view's undirected projection.
///
/// Returns 0 for a view without edges. Nodes missing from `communities` are
/// ignored.
pub fn modularity(view: &GraphView, communities: &[Vec<NodeId>]) -> f64 {
    let adjacency = view.undirected_adjacency();
    let m = adjacency.iter().map(|nbrs| nbrs.len()).sum::<usize>() as f64 / 2.0;
    if m == 0.0 {
        return 0.0;
    }

    let mut label = vec![usize::MAX; view.node_count];
    for (c, members) in communities.iter().enumerate() {
        for node in members {
            if let Some(&idx) = view.node_to_index.get(node) {
                label[idx] = c;
            }
        }
    }

    let mut internal = vec![0.0; communities.len()];
    let mut degree_total = vec![0.0; communities.len()];
    for (u, nbrs) in adjacency.iter().enumerate() {
        let c = label[u];
        if c == usize::MAX {
            continue;
        }
        degree_total[c] += nbrs.len() as f64;
        for &v in nbrs.range(u + 1..) {
            if label[v] == c {
                internal[c] += 1.0;
            }
        }
    }

    internal
        .iter()
        .zip(degree_total.iter())
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}
