//! spongEffects: ceRNA module enrichment scores and the subtype
//! classifiers trained on them.

use serde_json::Value;
use sponge_common::{FlatTable, Result};

use super::owned_list;
use crate::params::{ensure_exclusive, is_given, ElementLevel, QueryParams};
use crate::query::{decode_table, Query};

/// `spongEffects/getSpongEffectsRuns`: runs and their dataset information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpongEffectsRuns {
    pub disease_name: String,
}

impl SpongEffectsRuns {
    pub fn new(disease_name: impl Into<String>) -> Self {
        Self {
            disease_name: disease_name.into(),
        }
    }
}

impl Query for SpongEffectsRuns {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "spongEffects/getSpongEffectsRuns"
    }

    fn params(&self) -> Result<QueryParams> {
        Ok(QueryParams::new().with("disease_name", self.disease_name.as_str()))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// Queries that take a disease name and an element level and return records.
macro_rules! level_query {
    ($(#[$doc:meta])* $name:ident => $path:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub disease_name: String,
            pub level: ElementLevel,
        }

        impl $name {
            pub fn new(disease_name: impl Into<String>) -> Self {
                Self {
                    disease_name: disease_name.into(),
                    level: ElementLevel::Gene,
                }
            }

            pub fn with_level(mut self, level: ElementLevel) -> Self {
                self.level = level;
                self
            }
        }

        impl Query for $name {
            type Output = FlatTable;

            fn path(&self) -> &'static str {
                $path
            }

            fn params(&self) -> Result<QueryParams> {
                Ok(QueryParams::new()
                    .with("disease_name", self.disease_name.as_str())
                    .with("level", self.level.as_str()))
            }

            fn decode(&self, body: Value) -> Result<FlatTable> {
                decode_table(body)
            }
        }
    };
}

level_query!(
    /// Best run performance for the disease.
    RunPerformance => "spongEffects/getRunPerformance"
);

level_query!(
    /// Per-class model performance of the best run.
    RunClassPerformance => "spongEffects/getRunClassPerformance"
);

level_query!(
    /// Enrichment score class distributions of the trained model.
    EnrichmentScoreDistributions => "spongEffects/enrichmentScoreDistributions"
);

/// Module hub elements. The level picks the endpoint instead of being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpongEffectsModules {
    pub disease_name: String,
    pub level: ElementLevel,
}

impl SpongEffectsModules {
    pub fn new(disease_name: impl Into<String>) -> Self {
        Self {
            disease_name: disease_name.into(),
            level: ElementLevel::Gene,
        }
    }

    pub fn with_level(mut self, level: ElementLevel) -> Self {
        self.level = level;
        self
    }
}

impl Query for SpongEffectsModules {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        match self.level {
            ElementLevel::Gene => "spongEffects/getSpongEffectsGeneModules",
            ElementLevel::Transcript => "spongEffects/getSpongEffectsTranscriptModules",
        }
    }

    fn params(&self) -> Result<QueryParams> {
        Ok(QueryParams::new().with("disease_name", self.disease_name.as_str()))
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}

/// Nodes connected to the given ceRNA hubs. Hubs are named by exactly one
/// of ENSG number, gene symbol or internal gene id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMembers {
    pub disease_name: String,
    pub level: ElementLevel,
    pub ensg_number: Option<Vec<String>>,
    pub gene_symbol: Option<Vec<String>>,
    pub gene_id: Option<Vec<String>>,
}

impl ModuleMembers {
    pub fn new(disease_name: impl Into<String>) -> Self {
        Self {
            disease_name: disease_name.into(),
            level: ElementLevel::Gene,
            ensg_number: None,
            gene_symbol: None,
            gene_id: None,
        }
    }

    pub fn with_level(mut self, level: ElementLevel) -> Self {
        self.level = level;
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

    pub fn with_gene_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gene_id = owned_list(ids);
        self
    }
}

impl Query for ModuleMembers {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        match self.level {
            ElementLevel::Gene => "spongEffects/getSpongEffectsGeneModuleMembers",
            ElementLevel::Transcript => "spongEffects/getSpongEffectsTranscriptModuleMembers",
        }
    }

    fn params(&self) -> Result<QueryParams> {
        ensure_exclusive(&[
            ("ensg_number", is_given(&self.ensg_number)),
            ("gene_symbol", is_given(&self.gene_symbol)),
            ("gene_id", is_given(&self.gene_id)),
        ])?;
        QueryParams::new()
            .with("disease_name", self.disease_name.as_str())
            .with_list("ensg_number", self.ensg_number.as_deref())?
            .with_list("gene_symbol", self.gene_symbol.as_deref())?
            .with_list("gene_id", self.gene_id.as_deref())
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}
