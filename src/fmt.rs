use crate::astar::Path;
use crate::graph::Graph;

mod dot {
    use crate::astar::Path;
    use crate::graph::Graph;
    use crate::NodeId;

    use std::collections::HashSet;
    use std::fmt::Write as _;

    fn write_header(name: &str, out: &mut String) {
        out.push_str("graph ");
        out.push_str(name);
        out.push_str(" {\n");
    }

    fn write_footer(out: &mut String) {
        out.push_str("}\n");
    }

    fn key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        (a.min(b), a.max(b))
    }

    pub fn write(g: &Graph, path: Option<&Path>, out: &mut String) {
        let on_path: HashSet<NodeId> = path.into_iter().flat_map(|p| p.ids()).collect();
        let path_edges: HashSet<(NodeId, NodeId)> = path
            .into_iter()
            .flat_map(|p| p.steps().windows(2).map(|w| key(w[0].node, w[1].node)))
            .collect();

        write_header("G", out);

        for n in g.nodes() {
            let _ = write!(
                out,
                "  {} [pos=\"{},{}!\", label=\"{}\\nh={}\"",
                n.id, n.x, n.y, n.id, n.heuristic
            );
            if on_path.contains(&n.id) {
                out.push_str(", color=red");
            }
            out.push_str("];\n");
        }

        for n in g.slots() {
            let from = g.record(n).id;
            for e in g.edges(n) {
                let to = g.record(e.node).id;
                // Each undirected edge is stored in both directions, emit it once
                if to < from {
                    continue;
                }
                let _ = write!(out, "  {} -- {} [label=\"{}\"", from, to, e.weight);
                if path_edges.contains(&key(from, to)) {
                    out.push_str(", color=red, penwidth=2");
                }
                out.push_str("];\n");
            }
        }

        write_footer(out);
    }
}

/// Graphviz rendering of the scene, nodes pinned at their positions.
pub fn to_dot(g: &Graph) -> String {
    let mut out = String::new();
    dot::write(g, None, &mut out);
    out
}

/// Same as [`to_dot`] with the nodes and edges of `path` drawn in red.
pub fn to_dot_with_path(g: &Graph, path: &Path) -> String {
    let mut out = String::new();
    dot::write(g, Some(path), &mut out);
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::test::line_graph;
    use crate::{a_star, NodeId};

    #[test]
    fn edges_written_once() {
        let dot = to_dot(&line_graph());
        assert!(dot.starts_with("graph G {\n"));
        assert!(dot.contains("  1 -- 2 [label=\"1\"];\n"));
        assert!(!dot.contains("2 -- 1"));
        assert_eq!(dot.matches(" -- ").count(), 3);
        assert!(dot.contains("  5 [pos=\"5,0!\""));
    }

    #[test]
    fn path_highlighted() {
        let g = line_graph();
        let result = a_star(&g, NodeId(3), NodeId(1)).unwrap();
        let dot = to_dot_with_path(&g, result.path().unwrap());
        assert!(dot.contains("  1 -- 2 [label=\"1\", color=red, penwidth=2];\n"));
        assert!(dot.contains("  3 -- 4 [label=\"1\"];\n"));
        assert_eq!(dot.matches(", color=red]").count(), 3);
    }
}
