//! DIMACS edge format reader.
//!
//! ```text
//! c comment
//! p edge <num_vertices> <num_edges>
//! e <u> <v>
//! ```

use cliquesat_base::{Error, Graph, Result, Vertex};
use std::io::{BufRead, BufReader, Read};

/// A graph read from a DIMACS edge file, with the header's declared edge count.
#[derive(Debug, Clone)]
pub struct DimacsGraph {
    /// The graph, with self-loops dropped and duplicate edges merged.
    pub graph: Graph,
    /// Edge count announced by the `p edge` line. Advisory only.
    pub declared_edges: usize,
}

impl DimacsGraph {
    /// Parses a DIMACS edge file from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut header: Option<(usize, usize)> = None;
        let mut edges: Vec<(Vertex, Vertex)> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('c') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens[0] {
                "p" => {
                    if header.is_some() {
                        return Err(bad_line(line_no, line, "duplicate 'p' header"));
                    }
                    if tokens.len() < 4 || tokens[1] != "edge" {
                        return Err(bad_line(
                            line_no,
                            line,
                            "only 'p edge <num_vertices> <num_edges>' headers are supported",
                        ));
                    }
                    let n = parse_count(tokens[2], line_no, line, "number of vertices")?;
                    let m = parse_count(tokens[3], line_no, line, "number of edges")?;
                    if n < 1 {
                        return Err(bad_line(line_no, line, "graph must have at least one vertex"));
                    }
                    header = Some((n, m));
                }
                "e" => {
                    let Some((n, _)) = header else {
                        return Err(bad_line(line_no, line, "edge line before 'p edge' header"));
                    };
                    if tokens.len() < 3 {
                        return Err(bad_line(line_no, line, "malformed edge line"));
                    }
                    let u = parse_vertex(tokens[1], n, line_no, line)?;
                    let v = parse_vertex(tokens[2], n, line_no, line)?;
                    if u != v {
                        edges.push((u, v));
                    }
                }
                tag => {
                    return Err(bad_line(line_no, line, &format!("unknown line tag '{tag}'")));
                }
            }
        }

        let Some((n, m)) = header else {
            return Err(Error::validation(
                "no valid 'p edge' header line found in the input",
            ));
        };

        let graph = Graph::new(n, edges)?;
        if graph.num_edges() != m {
            tracing::warn!(
                "Header declares {} edges but {} distinct edges were read",
                m,
                graph.num_edges()
            );
        }

        Ok(Self {
            graph,
            declared_edges: m,
        })
    }

    /// Parses a DIMACS edge file from a string.
    pub fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

fn bad_line(line_no: usize, line: &str, msg: &str) -> Error {
    Error::Validation(format!("line {line_no}: {msg}: {line:?}"))
}

fn parse_count(token: &str, line_no: usize, line: &str, what: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| bad_line(line_no, line, &format!("invalid {what}")))
}

fn parse_vertex(token: &str, n: usize, line_no: usize, line: &str) -> Result<Vertex> {
    let v: Vertex = token
        .parse()
        .map_err(|_| bad_line(line_no, line, "non-integer vertex id"))?;
    if !(1..=n).contains(&v) {
        return Err(bad_line(
            line_no,
            line,
            &format!("vertex {v} is out of range [1, {n}]"),
        ));
    }
    Ok(v)
}
