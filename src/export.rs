//! Input-deck keywords for committed node sets and equations.
//!
//! Produces `*NODE`, `*NSET` and `*EQUATION` cards readable by Abaqus and
//! CalculiX, so a [`MeshHost`] setup can be pasted into a deck.

use crate::host::{MeshHost, RecordedEquation};

/// Node labels per `*NSET` data line (the keyword limit is 16)
const LABELS_PER_LINE: usize = 16;

/// Render reference nodes, node sets and equations of a host model
pub fn write_keywords(host: &MeshHost) -> String {
    let mut inp = String::new();

    inp.push_str("** Periodic boundary conditions\n");

    if !host.reference_nodes.is_empty() {
        inp.push_str("** Reference nodes (position is arbitrary)\n");
        inp.push_str("*NODE, NSET=PBC_REFERENCE\n");
        for id in &host.reference_nodes {
            inp.push_str(&format!("{}, 0.0, 0.0, 0.0\n", id));
        }
    }

    for (name, nodes) in &host.node_sets {
        inp.push_str(&format!("*NSET, NSET={}, UNSORTED\n", name));
        for chunk in nodes.chunks(LABELS_PER_LINE) {
            let line: Vec<String> = chunk.iter().map(|id| id.to_string()).collect();
            inp.push_str(&line.join(", "));
            inp.push('\n');
        }
    }

    for eq in &host.equations {
        write_equation(&mut inp, eq);
    }

    inp
}

/// Render one `*EQUATION` block, preceded by its name as a comment
pub fn write_equation(inp: &mut String, eq: &RecordedEquation) {
    inp.push_str(&format!("** {}\n", eq.name));
    inp.push_str("*EQUATION\n");
    inp.push_str(&format!("{}\n", eq.terms.len()));
    for term in &eq.terms {
        inp.push_str(&format!(
            "{}, {}, {}\n",
            term.node,
            term.dof.number(),
            format_coefficient(term.coefficient)
        ));
    }
}

fn format_coefficient(value: f64) -> String {
    // keep a decimal point so the reader never sees an integer field
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{:e}", value)
    }
}
