//! miRNAs shared by ceRNA interactions of given genes.

use serde_json::Value;
use sponge_common::{FlatTable, Result};

use super::owned_list;
use crate::params::{ensure_exclusive, is_given, GeneType, QueryParams};
use crate::query::{decode_table, Query};

/// `miRNAInteraction/findceRNA`: all miRNAs contributing to interactions of
/// the given genes. With `between`, only interactions among the genes count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpongedMirna {
    /// Fuzzy-matched dataset name; every dataset when unset.
    pub disease_name: Option<String>,
    pub ensg_number: Option<Vec<String>>,
    pub gene_symbol: Option<Vec<String>>,
    /// Checked against `GENE_TYPES` before sending.
    pub gene_type: Option<String>,
    pub between: bool,
}

impl SpongedMirna {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disease(mut self, disease_name: impl Into<String>) -> Self {
        self.disease_name = Some(disease_name.into());
        self
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

    pub fn with_gene_type(mut self, gene_type: impl Into<String>) -> Self {
        self.gene_type = Some(gene_type.into());
        self
    }

    pub fn between(mut self, between: bool) -> Self {
        self.between = between;
        self
    }
}

impl Query for SpongedMirna {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "miRNAInteraction/findceRNA"
    }

    fn params(&self) -> Result<QueryParams> {
        let gene_type = self
            .gene_type
            .as_deref()
            .map(str::parse::<GeneType>)
            .transpose()?;
        ensure_exclusive(&[
            ("ensg_number", is_given(&self.ensg_number)),
            ("gene_symbol", is_given(&self.gene_symbol)),
        ])?;

        QueryParams::new()
            .with_opt("disease_name", self.disease_name.as_deref())
            .with_opt("gene_type", gene_type.as_ref().map(GeneType::as_str))
            .with_flag("between", self.between)
            .with_list("ensg_number", self.ensg_number.as_deref())?
            .with_list("gene_symbol", self.gene_symbol.as_deref())
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}
