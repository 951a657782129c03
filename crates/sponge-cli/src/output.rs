use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde_json::Value;
use sponge_api::{NetworkBundle, ScoreMatrix};
use sponge_common::{FlatTable, Result};
use sponge_plot::{plot_heatmap, render_mds};
use tracing::info;

/// Write `table` as CSV to `path`, or stdout without one.
pub fn write_table(table: &FlatTable, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            table.write_csv(BufWriter::new(File::create(path)?))?;
            info!(rows = table.len(), "Wrote table to {:?}", path);
        }
        None => table.write_csv(io::stdout().lock())?,
    }
    Ok(())
}

/// Score matrix as a table: a `label` column followed by one column per label.
/// Missing scores become empty cells.
pub fn scores_table(scores: &ScoreMatrix) -> Result<FlatTable> {
    let mut columns = Vec::with_capacity(scores.labels.len() + 1);
    columns.push("label".to_string());
    columns.extend(scores.labels.iter().cloned());

    let mut table = FlatTable::new(columns);
    for (i, row) in scores.values.iter().enumerate() {
        let mut cells = Vec::with_capacity(row.len() + 1);
        cells.push(Value::String(scores.row_label(i)));
        cells.extend(row.iter().map(|v| serde_json::json!(v)));
        table.push_row(cells)?;
    }
    Ok(table)
}

/// Save `<prefix>_heatmap.svg` and `<prefix>_mds.svg` under `dir`.
pub fn save_bundle_plots(bundle: &NetworkBundle, dir: &Path, prefix: &str, triangular: bool) -> Result<()> {
    plot_heatmap(&bundle.scores, &format!("{} similarity", prefix), triangular)
        .save(dir.join(format!("{}_heatmap.svg", prefix)))?;
    render_mds(&bundle.distances, &format!("{} MDS plot", prefix)).save(dir.join(format!("{}_mds.svg", prefix)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sponge_api::{DistanceTable, MdsPoint};

    fn matrix() -> ScoreMatrix {
        ScoreMatrix::new(
            vec!["BRCA".to_string(), "LUAD".to_string()],
            vec![vec![1.0, 0.25], vec![0.25, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_scores_table_layout() {
        let table = scores_table(&matrix()).unwrap();
        assert_eq!(table.columns(), &["label", "BRCA", "LUAD"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "label"), Some(&Value::from("LUAD")));
        assert_eq!(table.get(0, "LUAD"), Some(&Value::from(0.25)));
    }

    #[test]
    fn test_scores_table_keeps_unlabelled_rows() {
        let scores = ScoreMatrix::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 0.2], vec![0.2, f64::NAN], vec![0.3, 0.4]],
        )
        .unwrap();
        let table = scores_table(&scores).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2, "label"), Some(&Value::from("2")));
        assert_eq!(table.get(1, "B"), Some(&Value::Null));
    }

    #[test]
    fn test_write_table_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_table(&scores_table(&matrix()).unwrap(), Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "label,BRCA,LUAD\nBRCA,1.0,0.25\nLUAD,0.25,1.0\n");
    }

    #[test]
    fn test_save_bundle_plots() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = NetworkBundle {
            scores: matrix(),
            distances: DistanceTable {
                points: vec![
                    MdsPoint { x: 0.0, y: 0.0, label: "BRCA".into() },
                    MdsPoint { x: 1.0, y: 0.5, label: "LUAD".into() },
                ],
            },
        };
        save_bundle_plots(&bundle, dir.path(), "type", true).unwrap();

        assert!(dir.path().join("type_heatmap.svg").exists());
        let mds = std::fs::read_to_string(dir.path().join("type_mds.svg")).unwrap();
        assert!(mds.contains(">type MDS plot</text>"));
    }
}
