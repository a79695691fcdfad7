use fixor_common::GraphDescription;

/// Fan-in and fan-out lists built from a description's adjacency matrix.
///
/// Both lists are sorted by ascending node index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adjacency {
    /// Maps each node to the nodes driving it.
    fanin: Vec<Vec<usize>>,
    /// Maps each node to the nodes it drives.
    fanout: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Builds the lists for every node of `desc`.
    #[must_use]
    pub fn build(desc: &GraphDescription) -> Self {
        let n = desc.node_count();
        let mut fanin = vec![Vec::new(); n];
        let mut fanout = vec![Vec::new(); n];

        for (from, to) in desc.edges() {
            fanout[from].push(to);
            fanin[to].push(from);
        }

        Self { fanin, fanout }
    }

    /// Number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fanin.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fanin.is_empty()
    }

    /// Nodes driving `node`, ascending.
    #[must_use]
    pub fn fanin(&self, node: usize) -> &[usize] {
        self.fanin.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes driven by `node`, ascending.
    #[must_use]
    pub fn fanout(&self, node: usize) -> &[usize] {
        self.fanout.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// In-degree of every node.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        self.fanin.iter().map(Vec::len).collect()
    }
}
