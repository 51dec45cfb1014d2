use crate::NodeIndex;

/// Sparse per-node values stored in a dense vector indexed by node slot.
#[derive(Debug, Clone)]
pub(crate) struct NodeMap<T> {
    v: Vec<Option<T>>,
}

impl<T> Default for NodeMap<T> {
    fn default() -> Self {
        Self { v: Vec::new() }
    }
}

impl<T> std::ops::Index<NodeIndex> for NodeMap<T> {
    type Output = T;
    fn index(&self, n: NodeIndex) -> &T {
        if let Some(t) = self.get(n) {
            t
        } else {
            panic!("Node not in map: {:?}", n);
        }
    }
}

impl<T> NodeMap<T> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            v: Vec::with_capacity(cap),
        }
    }

    /// Stores `t` for `n`, returning the previous value.
    pub fn insert(&mut self, n: NodeIndex, t: T) -> Option<T> {
        let i = n.0;
        if i >= self.v.len() {
            self.v.resize_with(i + 1, || None);
        }
        self.v[i].replace(t)
    }

    pub fn get(&self, n: NodeIndex) -> Option<&T> {
        self.v.get(n.0).and_then(Option::as_ref)
    }

    pub fn clear(&mut self) {
        self.v.clear();
    }
}
