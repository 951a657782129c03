//! Gene set enrichment analysis between two disease/condition pairs.

use serde_json::Value;
use sponge_common::{FlatTable, Result};

use super::{owned_list, Comparison};
use crate::enrichment::EnrichmentPlot;
use crate::params::QueryParams;
use crate::query::{decode_table, Query};

/// `gseaSets`: gene sets that have results for the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GseaSets {
    pub comparison: Comparison,
}

impl GseaSets {
    pub fn new(comparison: Comparison) -> Self {
        Self { comparison }
    }
}

impl Query for GseaSets {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "gseaSets"
    }

    fn params(&self) -> Result<QueryParams> {
        Ok(self.comparison.with_subtype_params(self.comparison.required_params()))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// `gseaTerms`: terms of one gene set with results for the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GseaTerms {
    pub comparison: Comparison,
    pub gene_set: String,
}

impl GseaTerms {
    pub fn new(comparison: Comparison, gene_set: impl Into<String>) -> Self {
        Self {
            comparison,
            gene_set: gene_set.into(),
        }
    }
}

impl Query for GseaTerms {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "gseaTerms"
    }

    fn params(&self) -> Result<QueryParams> {
        let params = self
            .comparison
            .required_params()
            .with("gene_set", self.gene_set.as_str());
        Ok(self.comparison.with_subtype_params(params))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// `gseaResults`: enrichment results, for all terms of the set unless some are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GseaResults {
    pub comparison: Comparison,
    pub gene_set: String,
    pub term: Option<Vec<String>>,
}

impl GseaResults {
    pub fn new(comparison: Comparison, gene_set: impl Into<String>) -> Self {
        Self {
            comparison,
            gene_set: gene_set.into(),
            term: None,
        }
    }

    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.term = owned_list(terms);
        self
    }
}

impl Query for GseaResults {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "gseaResults"
    }

    fn params(&self) -> Result<QueryParams> {
        let params = self
            .comparison
            .required_params()
            .with("gene_set", self.gene_set.as_str());
        let params = self.comparison.with_subtype_params(params);
        params.with_list("term", self.term.as_deref())
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// `gseaPlot`: enrichment plot image for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GseaPlot {
    pub comparison: Comparison,
    pub gene_set: String,
    pub term: String,
}

impl GseaPlot {
    pub fn new(comparison: Comparison, gene_set: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            comparison,
            gene_set: gene_set.into(),
            term: term.into(),
        }
    }
}

impl Query for GseaPlot {
    type Output = EnrichmentPlot;

    fn path(&self) -> &'static str {
        "gseaPlot"
    }

    fn params(&self) -> Result<QueryParams> {
        let params = self
            .comparison
            .required_params()
            .with("gene_set", self.gene_set.as_str())
            .with("term", self.term.as_str());
        Ok(self.comparison.with_subtype_params(params))
    }

    fn decode(&self, body: Value) -> Result<EnrichmentPlot> {
        EnrichmentPlot::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_BP: &str = "GO_Biological_Process_2023";

    fn comparison() -> Comparison {
        Comparison::new("liver", "thymoma", "disease", "disease")
    }

    #[test]
    fn test_results_terms_go_last() {
        let query = GseaResults::new(comparison(), GO_BP).with_terms(["GO:0001676", "GO:0006631"]);
        let params = query.params().unwrap();
        let (name, value) = params.as_pairs().last().unwrap();
        assert_eq!(name, "term");
        assert_eq!(value, "GO:0001676,GO:0006631");
        assert_eq!(params.get("gene_set"), Some(GO_BP));
    }

    #[test]
    fn test_plot_sends_single_term() {
        let query = GseaPlot::new(comparison(), GO_BP, "GO:0001676");
        let params = query.params().unwrap();
        assert_eq!(params.get("term"), Some("GO:0001676"));
        assert!(!params.contains("disease_subtype_1"));
    }

    #[test]
    fn test_sets_send_only_comparison() {
        let params = GseaSets::new(comparison()).params().unwrap();
        assert_eq!(params.len(), 4);
    }
}
