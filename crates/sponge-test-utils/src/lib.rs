//! Shared fixtures for SPONGE client tests: canned API payloads.

use serde_json::{json, Value};

pub use pretty_assertions;

/// 3x2 RGB PNG, every pixel #D099F2, base64-encoded.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAMAAAACCAIAAAASFvFNAAAAEElEQVR4nGO4MPMTBDHAWQCMnA4jsByssQAAAABJRU5ErkJggg==";

/// Error body the API sends with a 404.
pub fn not_found(detail: &str) -> Value {
    json!({ "detail": detail })
}

/// `n` differential expression records with identical keys.
pub fn diff_expr_records(n: usize) -> Value {
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "ensg_number": format!("ENSG{:011}", i),
                "gene_symbol": format!("GENE{}", i),
                "log2FoldChange": i as f64 * 0.5 - 1.0,
                "pvalue": 0.01 * (i + 1) as f64,
                "padj": 0.05,
            })
        })
        .collect();
    Value::Array(rows)
}

/// Symmetric n x n similarity matrix with 1.0 on the diagonal.
pub fn symmetric_scores(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 1.0 } else { 1.0 / (1.0 + (i + j) as f64) })
                .collect()
        })
        .collect()
}

pub fn labels(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

/// One `type`/`subtype` block of a networkResults payload.
pub fn network_bundle(names: &[&str]) -> Value {
    let n = names.len();
    let xs: Vec<f64> = (0..n).map(|i| i as f64 - (n as f64 / 2.0)).collect();
    let ys: Vec<f64> = (0..n).map(|i| (i * i) as f64 * 0.1).collect();
    json!({
        "scores": {"values": symmetric_scores(n), "labels": names},
        "euclidean_distances": {"x": xs, "y": ys, "labels": names},
    })
}

/// networkResults payload; `subtypes` empty gives `"subtype": {}`.
pub fn network_payload(types: &[&str], subtypes: &[&str]) -> Value {
    let subtype = if subtypes.is_empty() {
        json!({})
    } else {
        network_bundle(subtypes)
    };
    json!({ "type": network_bundle(types), "subtype": subtype })
}
