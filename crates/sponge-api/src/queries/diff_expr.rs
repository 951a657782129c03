//! Differential expression between two disease/condition pairs.

use serde_json::Value;
use sponge_common::{FlatTable, Result};

use super::{owned_list, Comparison};
use crate::params::{ensure_exclusive, is_given, QueryParams};
use crate::query::{decode_table, Query};

/// `differentialExpression`: per-gene results. Genes are given either as
/// ENSG numbers or as symbols, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferentialExpressionGene {
    pub comparison: Comparison,
    pub ensg_number: Option<Vec<String>>,
    pub gene_symbol: Option<Vec<String>>,
}

impl DifferentialExpressionGene {
    pub fn new(comparison: Comparison) -> Self {
        Self {
            comparison,
            ensg_number: None,
            gene_symbol: None,
        }
    }

    pub fn with_ensg_numbers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensg_number = owned_list(ids);
        self
    }

    pub fn with_gene_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gene_symbol = owned_list(symbols);
        self
    }
}

impl Query for DifferentialExpressionGene {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "differentialExpression"
    }

    fn params(&self) -> Result<QueryParams> {
        ensure_exclusive(&[
            ("ensg_number", is_given(&self.ensg_number)),
            ("gene_symbol", is_given(&self.gene_symbol)),
        ])?;
        let params = self
            .comparison
            .required_params()
            .with_list("ensg_number", self.ensg_number.as_deref())?
            .with_list("gene_symbol", self.gene_symbol.as_deref())?;
        Ok(self.comparison.with_subtype_params(params))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// `differentialExpressionTranscript`: per-transcript results, all
/// transcripts when no ENST numbers are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferentialExpressionTranscript {
    pub comparison: Comparison,
    pub enst_number: Option<Vec<String>>,
}

impl DifferentialExpressionTranscript {
    pub fn new(comparison: Comparison) -> Self {
        Self {
            comparison,
            enst_number: None,
        }
    }

    pub fn with_enst_numbers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enst_number = owned_list(ids);
        self
    }
}

impl Query for DifferentialExpressionTranscript {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "differentialExpressionTranscript"
    }

    fn params(&self) -> Result<QueryParams> {
        let params = self
            .comparison
            .required_params()
            .with_list("enst_number", self.enst_number.as_deref())?;
        Ok(self.comparison.with_subtype_params(params))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liver_vs_thymoma() -> Comparison {
        Comparison::new("liver", "thymoma", "disease", "disease")
    }

    #[test]
    fn test_gene_params_in_wire_order() {
        let query = DifferentialExpressionGene::new(
            liver_vs_thymoma().with_subtypes(None, Some("THYM_A".to_string())),
        )
        .with_gene_symbols(["CYP2E1"]);
        let params = query.params().unwrap();

        let names: Vec<&str> = params.as_pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["disease_name_1", "disease_name_2", "condition_1", "condition_2", "gene_symbol", "disease_subtype_2"]
        );
        assert_eq!(params.get("disease_subtype_2"), Some("THYM_A"));
    }

    #[test]
    fn test_gene_identifiers_are_exclusive() {
        let query = DifferentialExpressionGene::new(liver_vs_thymoma())
            .with_ensg_numbers(["ENSG00000130649"])
            .with_gene_symbols(["CYP2E1"]);
        assert!(query.params().is_err());
    }

    #[test]
    fn test_empty_identifier_list_is_absent() {
        let query = DifferentialExpressionGene::new(liver_vs_thymoma())
            .with_ensg_numbers(Vec::<String>::new())
            .with_gene_symbols(["CYP2E1"]);
        assert_eq!(query.ensg_number, None);
        let params = query.params().unwrap();
        assert!(!params.contains("ensg_number"));
    }

    #[test]
    fn test_empty_list_field_does_not_conflict() {
        let query = DifferentialExpressionGene {
            ensg_number: Some(Vec::new()),
            ..DifferentialExpressionGene::new(liver_vs_thymoma()).with_gene_symbols(["CYP2E1"])
        };
        let params = query.params().unwrap();
        assert!(!params.contains("ensg_number"));
        assert_eq!(params.get("gene_symbol"), Some("CYP2E1"));
    }

    #[test]
    fn test_transcript_list() {
        let query = DifferentialExpressionTranscript::new(liver_vs_thymoma())
            .with_enst_numbers(["ENST00000252945", "ENST00000463117"]);
        let params = query.params().unwrap();
        assert_eq!(params.get("enst_number"), Some("ENST00000252945,ENST00000463117"));
        assert_eq!(query.path(), "differentialExpressionTranscript");
    }
}
