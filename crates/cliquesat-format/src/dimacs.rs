//! DIMACS CNF serializer and reader.
//!
//! Standard format used in SAT competitions.

use cliquesat_base::{Clause, CnfFormula, Error, Literal, Result};
use std::io::{BufRead, BufReader, Read, Write};

/// Writes `cnf` in DIMACS CNF format.
///
/// The output is a pure function of the formula: one `p cnf` header with the
/// declared variable count and the number of clauses, then one line per
/// clause, literals separated by single spaces and terminated by `0`.
pub fn write_cnf<W: Write>(cnf: &CnfFormula, mut writer: W) -> Result<()> {
    writeln!(writer, "p cnf {} {}", cnf.num_vars(), cnf.num_clauses())?;
    for clause in cnf.clauses() {
        for lit in clause.literals() {
            write!(writer, "{lit} ")?;
        }
        writer.write_all(b"0\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts to a DIMACS string.
#[must_use]
pub fn to_dimacs(cnf: &CnfFormula) -> String {
    let mut out = format!("p cnf {} {}\n", cnf.num_vars(), cnf.num_clauses());
    for clause in cnf.clauses() {
        for lit in clause.literals() {
            out.push_str(&lit.to_string());
            out.push(' ');
        }
        out.push_str("0\n");
    }
    out
}

/// Parses DIMACS CNF from a reader.
///
/// Clauses may span lines and end at `0`; a final clause missing its `0` is
/// accepted. The header counts must match what follows.
pub fn read_cnf<R: Read>(reader: R) -> Result<CnfFormula> {
    let reader = BufReader::new(reader);
    let mut header: Option<(usize, usize)> = None;
    let mut cnf = CnfFormula::default();
    let mut pending: Vec<Literal> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        // SATLIB end-of-data marker
        if line.starts_with('%') {
            break;
        }

        // Parse header
        if line.starts_with('p') {
            if header.is_some() {
                return Err(bad_line(line_no, "duplicate 'p cnf' header"));
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 4 || parts[1] != "cnf" {
                return Err(bad_line(line_no, "expected 'p cnf <vars> <clauses>'"));
            }
            let num_vars = parts[2]
                .parse()
                .map_err(|e| bad_line(line_no, &format!("invalid variable count: {e}")))?;
            let num_clauses = parts[3]
                .parse()
                .map_err(|e| bad_line(line_no, &format!("invalid clause count: {e}")))?;
            header = Some((num_vars, num_clauses));
            cnf = CnfFormula::new(num_vars);
            continue;
        }

        if header.is_none() {
            return Err(bad_line(line_no, "clause before 'p cnf' header"));
        }

        // Parse clause
        for token in line.split_whitespace() {
            let lit: i64 = token
                .parse()
                .map_err(|e| bad_line(line_no, &format!("invalid literal {token:?}: {e}")))?;
            match Literal::from_dimacs(lit) {
                Some(lit) => pending.push(lit),
                None => {
                    let clause = Clause::new(std::mem::take(&mut pending))
                        .map_err(|_| bad_line(line_no, "empty clause"))?;
                    cnf.add_clause(clause)
                        .map_err(|e| bad_line(line_no, &e.to_string()))?;
                }
            }
        }
    }

    let Some((_, declared_clauses)) = header else {
        return Err(Error::validation("DIMACS header 'p cnf ...' not found"));
    };

    if !pending.is_empty() {
        cnf.add_clause(Clause::new(pending)?)?;
    }

    if cnf.num_clauses() != declared_clauses {
        return Err(Error::validation(format!(
            "header declares {declared_clauses} clauses but {} were read",
            cnf.num_clauses()
        )));
    }

    Ok(cnf)
}

/// Parses DIMACS CNF from a string.
pub fn cnf_from_str(s: &str) -> Result<CnfFormula> {
    read_cnf(s.as_bytes())
}

fn bad_line(line_no: usize, msg: &str) -> Error {
    Error::Validation(format!("DIMACS line {line_no}: {msg}"))
}
