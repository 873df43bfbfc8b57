/// This is the main logic behind the checker output
///
/// It has varying levels of output, where 0 means nothing is displayed to the screen, and each
/// additional level includes everything previous
///
/// 0 - Nothing
/// 1 - Success counts, energy gaps and modularity scores
/// 2 - Every checked vertex pair or sample
///
pub struct ResultLogger {
    pub output_level: usize,
}

impl ResultLogger {
    pub const fn new(level: usize) -> Self {
        Self {
            output_level: level,
        }
    }

    pub fn output_header(&self, problem: &str, num_nodes: usize, num_edges: usize, samples: usize) {
        if self.output_level < 2 {
            return;
        }

        println!("------------------------------------------------------");
        println!("Checking {problem} results");
        println!("Graph: {num_nodes} nodes, {num_edges} edges");
        println!("Samples: {samples}");
        println!("------------------------------------------------------");
    }

    pub fn output_pair(&self, key: &str, expected: &[Vec<usize>], found: Option<&[usize]>, ok: bool) {
        if self.output_level < 2 {
            return;
        }

        let status = if ok { "ok" } else { "wrong" };
        match found {
            Some(path) => println!("{key} | found {path:?} | expected {expected:?} | {status}"),
            None => println!("{key} | no path | expected {expected:?} | {status}"),
        }
    }

    /// The `ok / total` line of the shortest path checker.
    pub fn output_count(&self, ok: usize, total: usize) {
        if self.output_level < 1 {
            return;
        }

        println!("{ok} / {total}");
    }

    pub fn output_energy_gap(&self, best: f64, expected: i64) {
        if self.output_level < 1 {
            return;
        }

        println!("Best energy: {best} | Expected: {expected}");
    }

    pub fn output_modularity(&self, sample: Option<f64>, baseline: f64) {
        if self.output_level < 1 {
            return;
        }

        match sample {
            Some(q) => println!("Modularity: {q} | Greedy baseline: {baseline}"),
            None => println!("Modularity: no valid partition | Greedy baseline: {baseline}"),
        }
    }

    pub fn output_latex_table(&self, rows: &[ResultRow]) {
        if self.output_level < 1 {
            return;
        }

        print!("{}", format_latex_table(rows));
    }
}

/// One benchmark result, a line of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub graph_type: String,
    pub solver: String,
    pub vertices: usize,
    pub logical_qubits: usize,
    pub physical_qubits: usize,
    pub couplers: usize,
    pub samples: usize,
    pub time: f64,
    pub performance: String,
}

/// Formats results as LaTeX table rows, with an `\hline` whenever the graph type changes.
pub fn format_latex_table(rows: &[ResultRow]) -> String {
    let mut out = String::new();
    let mut current = rows.first().map(|r| r.graph_type.as_str());

    for r in rows {
        if current != Some(r.graph_type.as_str()) {
            current = Some(r.graph_type.as_str());
            out.push_str("\\hline\n");
        }
        out.push_str(&format!(
            "{} & {} & {} & {} & {} & {} & {} & {} & {} \\\\\n",
            r.graph_type,
            r.solver,
            r.vertices,
            r.logical_qubits,
            r.physical_qubits,
            r.couplers,
            r.samples,
            r.time,
            r.performance
        ));
    }

    out
}
