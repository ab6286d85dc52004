//! Model decoding.
//!
//! Turns a satisfying assignment of the k-clique formula back into a vertex
//! set and re-checks it against the graph. Any disagreement is reported as
//! [`Error::DecodeInconsistency`], never repaired.

use crate::result::{Assignment, Clique};
use cliquesat_base::{Error, Graph, Result, VarMap, Vertex};

/// Extracts the clique encoded by `assignment` for clique size `k`.
///
/// Every position must hold exactly one vertex, the `k` vertices must be
/// distinct, and every pair of them must be adjacent in `graph`.
pub fn decode_clique(graph: &Graph, assignment: &Assignment, k: usize) -> Result<Clique> {
    let inconsistent = |reason: String| Error::DecodeInconsistency { k, reason };

    let map = VarMap::new(graph.num_vertices(), k)?;
    if assignment.num_vars() != map.num_vars() {
        return Err(inconsistent(format!(
            "assignment covers {} variables, expected {}",
            assignment.num_vars(),
            map.num_vars()
        )));
    }

    let mut slots: Vec<Option<Vertex>> = vec![None; k];
    for var in assignment.true_vars() {
        let (v, p) = map
            .decode(var)
            .map_err(|e| inconsistent(e.to_string()))?;
        if let Some(prev) = slots[p].replace(v) {
            return Err(inconsistent(format!(
                "position {p} holds both vertex {prev} and vertex {v}"
            )));
        }
    }

    let mut members = Vec::with_capacity(k);
    for (p, slot) in slots.into_iter().enumerate() {
        let v = slot.ok_or_else(|| inconsistent(format!("position {p} holds no vertex")))?;
        members.push(v);
    }

    let clique = Clique::new(members);
    if let Some(w) = clique.vertices().windows(2).find(|w| w[0] == w[1]) {
        return Err(inconsistent(format!(
            "vertex {} occupies more than one position",
            w[0]
        )));
    }

    let verts = clique.vertices();
    for (i, &u) in verts.iter().enumerate() {
        if let Some(&v) = verts[i + 1..].iter().find(|&&v| !graph.has_edge(u, v)) {
            return Err(inconsistent(format!(
                "vertices {u} and {v} are not adjacent"
            )));
        }
    }

    Ok(clique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::placement_assignment;

    fn triangle_plus_isolated() -> Graph {
        Graph::new(4, [(1, 2), (2, 3), (1, 3)]).unwrap()
    }

    fn assignment_with(num_vars: usize, true_vars: &[usize]) -> Assignment {
        let mut values = vec![false; num_vars];
        for &v in true_vars {
            values[v - 1] = true;
        }
        Assignment::from_values(values)
    }

    #[test]
    fn test_decode_valid_model() {
        let g = triangle_plus_isolated();
        // At(1,0) = 1, At(2,1) = 6, At(3,2) = 11
        let a = assignment_with(12, &[1, 6, 11]);
        let clique = decode_clique(&g, &a, 3).unwrap();
        assert_eq!(clique.vertices(), &[1, 2, 3]);
    }

    #[test]
    fn test_decode_placement_in_any_order() {
        let g = triangle_plus_isolated();
        let a = Assignment::from_values(placement_assignment(&g, &[3, 1, 2]).unwrap());
        assert_eq!(decode_clique(&g, &a, 3).unwrap().vertices(), &[1, 2, 3]);
    }

    #[test]
    fn test_empty_position() {
        let g = triangle_plus_isolated();
        let a = assignment_with(12, &[1, 6]);
        let err = decode_clique(&g, &a, 3).unwrap_err();
        assert!(err.to_string().contains("position 2 holds no vertex"), "{err}");
    }

    #[test]
    fn test_crowded_position() {
        let g = triangle_plus_isolated();
        let a = assignment_with(12, &[1, 2, 6, 11]);
        let err = decode_clique(&g, &a, 3).unwrap_err();
        assert!(matches!(err, Error::DecodeInconsistency { k: 3, .. }));
    }

    #[test]
    fn test_repeated_vertex() {
        let g = Graph::complete(3).unwrap();
        // vertex 1 at positions 0 and 1
        let a = assignment_with(6, &[1, 4]);
        let err = decode_clique(&g, &a, 2).unwrap_err();
        assert!(err.to_string().contains("vertex 1"), "{err}");
    }

    #[test]
    fn test_non_adjacent_pair() {
        let g = triangle_plus_isolated();
        // vertices 1, 2, 4
        let a = assignment_with(12, &[1, 6, 12]);
        let err = decode_clique(&g, &a, 3).unwrap_err();
        assert!(err.to_string().contains("1 and 4 are not adjacent"), "{err}");
    }

    #[test]
    fn test_wrong_size() {
        let g = triangle_plus_isolated();
        let a = assignment_with(8, &[1, 6]);
        assert!(matches!(
            decode_clique(&g, &a, 3),
            Err(Error::DecodeInconsistency { .. })
        ));
    }
}
