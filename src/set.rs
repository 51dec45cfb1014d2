use crate::NodeIndex;

/// Membership set over the dense node slots of one graph.
// TODO: Bitset
#[derive(Default, Debug, Clone)]
pub(crate) struct NodeSet {
    v: Vec<bool>,
}

impl NodeSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            v: Vec::with_capacity(capacity),
        }
    }

    /// Returns true if `n` was not already in the set
    pub fn add(&mut self, n: NodeIndex) -> bool {
        let i = n.0;
        if i >= self.v.len() {
            self.v.resize(i + 1, false);
        }
        !std::mem::replace(&mut self.v[i], true)
    }

    pub fn has(&self, n: NodeIndex) -> bool {
        self.v.get(n.0).copied().unwrap_or(false)
    }

    /// Empties the set but keeps the allocation.
    pub fn clear(&mut self) {
        self.v.clear();
    }
}

#[cfg(test)]
mod test {
    use crate::{NodeIndex, NodeSet};

    fn slots(n: usize) -> Vec<NodeIndex> {
        (0..n).map(NodeIndex).collect()
    }

    #[test]
    fn empty_with_capacity() {
        let set = NodeSet::with_capacity(30);
        for n in slots(10) {
            assert!(!set.has(n));
        }
    }

    #[test]
    fn add_reports_new() {
        let mut set = NodeSet::with_capacity(30);
        let nodes = slots(10);
        assert!(set.add(nodes[9]));
        assert!(!set.add(nodes[9]));
        assert!(set.has(nodes[9]));
        for &n in &nodes[0..9] {
            assert!(!set.has(n));
        }
    }

    #[test]
    fn clear_forgets_everything() {
        let mut set = NodeSet::with_capacity(8);
        for (i, n) in slots(8).into_iter().enumerate() {
            if i % 2 == 0 {
                set.add(n);
            }
        }
        assert!(set.has(NodeIndex(6)));
        set.clear();
        for n in slots(8) {
            assert!(!set.has(n));
        }
        assert!(set.add(NodeIndex(6)));
    }
}
