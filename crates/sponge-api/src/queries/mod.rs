//! Query descriptors, one per SPONGE API endpoint.

pub mod diff_expr;
pub mod gsea;
pub mod mirna;
pub mod network;
pub mod overview;
pub mod spong_effects;

pub use diff_expr::{DifferentialExpressionGene, DifferentialExpressionTranscript};
pub use gsea::{GseaPlot, GseaResults, GseaSets, GseaTerms};
pub use mirna::SpongedMirna;
pub use network::{NetworkResultsQuery, PAN_CANCER};
pub use overview::OverallCounts;
pub use spong_effects::{
    EnrichmentScoreDistributions, ModuleMembers, RunClassPerformance, RunPerformance,
    SpongEffectsModules, SpongEffectsRuns,
};

use crate::params::QueryParams;

/// Two disease/condition pairs compared by the differential expression and GSEA endpoints.
/// Without a subtype the overtype is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub disease_name_1: String,
    pub disease_name_2: String,
    pub condition_1: String,
    pub condition_2: String,
    pub disease_subtype_1: Option<String>,
    pub disease_subtype_2: Option<String>,
}

impl Comparison {
    pub fn new(
        disease_name_1: impl Into<String>,
        disease_name_2: impl Into<String>,
        condition_1: impl Into<String>,
        condition_2: impl Into<String>,
    ) -> Self {
        Self {
            disease_name_1: disease_name_1.into(),
            disease_name_2: disease_name_2.into(),
            condition_1: condition_1.into(),
            condition_2: condition_2.into(),
            disease_subtype_1: None,
            disease_subtype_2: None,
        }
    }

    pub fn with_subtypes(mut self, subtype_1: Option<String>, subtype_2: Option<String>) -> Self {
        self.disease_subtype_1 = subtype_1;
        self.disease_subtype_2 = subtype_2;
        self
    }

    /// The four required parameters in wire order.
    fn required_params(&self) -> QueryParams {
        QueryParams::new()
            .with("disease_name_1", self.disease_name_1.as_str())
            .with("disease_name_2", self.disease_name_2.as_str())
            .with("condition_1", self.condition_1.as_str())
            .with("condition_2", self.condition_2.as_str())
    }

    fn with_subtype_params(&self, params: QueryParams) -> QueryParams {
        params
            .with_opt("disease_subtype_1", self.disease_subtype_1.as_deref())
            .with_opt("disease_subtype_2", self.disease_subtype_2.as_deref())
    }
}

/// `into` each item of a list argument; an empty list is no list.
pub(crate) fn owned_list<I, S>(items: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<String> = items.into_iter().map(Into::into).collect();
    (!items.is_empty()).then_some(items)
}
