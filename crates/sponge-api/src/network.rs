//! Network comparison results.
//!
//! `networkResults` returns, for a cancer type and (when available) its
//! subtypes, the pairwise network similarity scores and a 2D MDS
//! projection of them:
//!
//! ```text
//! { "type":    { "scores": { "values": [[..]], "labels": [..] },
//!                "euclidean_distances": { "x": [..], "y": [..], "labels": [..] } },
//!   "subtype": { ...same shape... } | {} }
//! ```

use serde::Serialize;
use serde_json::Value;

use sponge_common::{Result, SpongeError};

/// Pairwise scores. `labels` name the columns, and the rows too when the
/// matrix is square. Missing scores are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Build a matrix, checking every row has one value per label.
    pub fn new(labels: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if let Some((i, row)) = values.iter().enumerate().find(|(_, r)| r.len() != labels.len()) {
            return Err(SpongeError::malformed(
                format!("values[{}]", i),
                format!("row has {} values for {} labels", row.len(), labels.len()),
            ));
        }
        Ok(Self { labels, values })
    }

    pub fn n_rows(&self) -> usize {
        self.values.len()
    }

    pub fn n_cols(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_square(&self) -> bool {
        self.n_rows() == self.n_cols()
    }

    /// Name of a row: its label, or its index when the matrix has more
    /// rows than labels.
    pub fn row_label(&self, row: usize) -> String {
        self.labels.get(row).cloned().unwrap_or_else(|| row.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdsPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// MDS coordinates, one point per network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistanceTable {
    pub points: Vec<MdsPoint>,
}

impl DistanceTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.y)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkBundle {
    pub scores: ScoreMatrix,
    pub distances: DistanceTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkResults {
    #[serde(rename = "type")]
    pub cancer_type: NetworkBundle,
    /// `None` when the API has no subtype networks for this disease.
    pub subtype: Option<NetworkBundle>,
}

impl NetworkResults {
    pub fn from_json(body: &Value) -> Result<Self> {
        let cancer_type = NetworkBundle::from_json(field(body, "", "type")?, "type")?;

        let subtype = match field(body, "", "subtype")? {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(NetworkBundle::from_json(other, "subtype")?),
        };

        Ok(Self { cancer_type, subtype })
    }
}

impl NetworkBundle {
    fn from_json(node: &Value, path: &str) -> Result<Self> {
        let scores_path = join(path, "scores");
        let scores = field(node, path, "scores")?;
        let labels = strings(field(scores, &scores_path, "labels")?, &join(&scores_path, "labels"))?;

        let values_path = join(&scores_path, "values");
        let values = array(field(scores, &scores_path, "values")?, &values_path)?
            .iter()
            .enumerate()
            .map(|(i, row)| scores_row(row, &format!("{}[{}]", values_path, i)))
            .collect::<Result<Vec<_>>>()?;

        let scores = ScoreMatrix::new(labels, values).map_err(|e| match e {
            SpongeError::MalformedResponse { path, reason } => {
                SpongeError::malformed(join(&scores_path, &path), reason)
            }
            other => other,
        })?;

        let dist_path = join(path, "euclidean_distances");
        let distances = field(node, path, "euclidean_distances")?;
        let xs = numbers(field(distances, &dist_path, "x")?, &join(&dist_path, "x"))?;
        let ys = numbers(field(distances, &dist_path, "y")?, &join(&dist_path, "y"))?;
        let point_labels = strings(field(distances, &dist_path, "labels")?, &join(&dist_path, "labels"))?;

        if ys.len() != xs.len() || point_labels.len() != xs.len() {
            return Err(SpongeError::malformed(
                dist_path,
                format!(
                    "x, y and labels differ in length ({}, {}, {})",
                    xs.len(),
                    ys.len(),
                    point_labels.len()
                ),
            ));
        }

        let points = xs
            .into_iter()
            .zip(ys)
            .zip(point_labels)
            .map(|((x, y), label)| MdsPoint { x, y, label })
            .collect();

        Ok(Self {
            scores,
            distances: DistanceTable { points },
        })
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn field<'a>(node: &'a Value, path: &str, key: &str) -> Result<&'a Value> {
    let object = node.as_object().ok_or_else(|| {
        SpongeError::malformed(if path.is_empty() { "$" } else { path }, "expected an object")
    })?;
    object
        .get(key)
        .ok_or_else(|| SpongeError::malformed(join(path, key), "missing key"))
}

fn array<'a>(node: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    node.as_array()
        .ok_or_else(|| SpongeError::malformed(path, "expected an array"))
}

fn numbers(node: &Value, path: &str) -> Result<Vec<f64>> {
    array(node, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| SpongeError::malformed(format!("{}[{}]", path, i), "expected a number"))
        })
        .collect()
}

/// Like `numbers`, but `null` is a missing score.
fn scores_row(node: &Value, path: &str) -> Result<Vec<f64>> {
    array(node, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Null => Ok(f64::NAN),
            other => other
                .as_f64()
                .ok_or_else(|| SpongeError::malformed(format!("{}[{}]", path, i), "expected a number or null")),
        })
        .collect()
}

fn strings(node: &Value, path: &str) -> Result<Vec<String>> {
    array(node, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(SpongeError::malformed(format!("{}[{}]", path, i), "expected a string")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle() -> Value {
        json!({
            "scores": {"values": [[1.0, 0.2], [0.2, 1.0]], "labels": ["BRCA", "LUAD"]},
            "euclidean_distances": {"x": [0.1, -0.1], "y": [0.0, 0.3], "labels": ["BRCA", "LUAD"]}
        })
    }

    #[test]
    fn test_type_and_subtype() {
        let results = NetworkResults::from_json(&json!({"type": bundle(), "subtype": bundle()})).unwrap();
        assert_eq!(results.cancer_type.scores.labels, vec!["BRCA", "LUAD"]);
        assert_eq!(results.cancer_type.scores.get(0, 1), Some(0.2));
        assert_eq!(results.cancer_type.distances.len(), 2);
        assert_eq!(results.cancer_type.distances.points[1].label, "LUAD");
        assert!(results.subtype.is_some());
    }

    #[test]
    fn test_null_subtype_is_none() {
        let results = NetworkResults::from_json(&json!({"type": bundle(), "subtype": null})).unwrap();
        assert!(results.subtype.is_none());
    }

    #[test]
    fn test_missing_key_reports_path() {
        let mut broken = bundle();
        broken["euclidean_distances"].as_object_mut().unwrap().remove("y");
        let err = NetworkResults::from_json(&json!({"type": bundle(), "subtype": broken})).unwrap_err();
        assert!(
            matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "subtype.euclidean_distances.y"),
            "{err}"
        );

        let err = NetworkResults::from_json(&json!({"type": bundle()})).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "subtype"));
    }

    #[test]
    fn test_ragged_scores_rejected() {
        let mut broken = bundle();
        broken["scores"]["values"] = json!([[1.0, 0.2], [0.2]]);
        let err = NetworkResults::from_json(&json!({"type": broken, "subtype": {}})).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "type.scores.values[1]"));
    }

    #[test]
    fn test_non_numeric_score_rejected() {
        let mut broken = bundle();
        broken["scores"]["values"][0][1] = json!("high");
        let err = NetworkResults::from_json(&json!({"type": broken, "subtype": {}})).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "type.scores.values[0][1]"));
    }

    #[test]
    fn test_null_score_is_nan() {
        let mut sparse = bundle();
        sparse["scores"]["values"] = json!([[null, 0.2], [0.2, null]]);
        let results = NetworkResults::from_json(&json!({"type": sparse, "subtype": {}})).unwrap();
        let scores = &results.cancer_type.scores;
        assert!(scores.get(0, 0).unwrap().is_nan());
        assert_eq!(scores.get(0, 1), Some(0.2));
        assert!(scores.get(1, 1).unwrap().is_nan());
    }

    #[test]
    fn test_row_label_falls_back_to_index() {
        let scores = ScoreMatrix::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 0.2], vec![0.2, 1.0], vec![0.3, 0.4]],
        )
        .unwrap();
        assert!(!scores.is_square());
        assert_eq!(scores.row_label(1), "B");
        assert_eq!(scores.row_label(2), "2");
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut broken = bundle();
        broken["euclidean_distances"]["labels"] = json!(["BRCA"]);
        let err = NetworkResults::from_json(&json!({"type": broken, "subtype": {}})).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "type.euclidean_distances"));
    }
}
