use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sponge_api::queries::{Comparison, PAN_CANCER};
use sponge_api::ElementLevel;

#[derive(Debug, Parser)]
#[command(name = "sponge", author, version, about = "Query the SPONGE-web ceRNA database", long_about = None)]
pub struct Cli {
    /// API root, overriding config file and environment.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Database schema version sent with versioned queries.
    #[arg(long, global = true)]
    pub api_version: Option<u32>,

    /// Write to this file instead of stdout.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Dataset overview with interaction counts", alias = "counts")]
    Overview,

    #[command(about = "Differential expression of genes between two conditions")]
    DiffExpr {
        #[command(flatten)]
        comparison: ComparisonArgs,
        #[arg(long = "ensg", value_delimiter = ',', conflicts_with = "gene_symbols")]
        ensg_numbers: Vec<String>,
        #[arg(long = "symbol", value_delimiter = ',')]
        gene_symbols: Vec<String>,
    },

    #[command(about = "Differential expression of transcripts between two conditions")]
    DiffExprTranscript {
        #[command(flatten)]
        comparison: ComparisonArgs,
        #[arg(long = "enst", value_delimiter = ',')]
        enst_numbers: Vec<String>,
    },

    #[command(about = "Find ceRNAs sponged by miRNAs", alias = "mirna")]
    FindMirna {
        #[arg(long)]
        disease: Option<String>,
        #[arg(long = "ensg", value_delimiter = ',')]
        ensg_numbers: Vec<String>,
        #[arg(long = "symbol", value_delimiter = ',')]
        gene_symbols: Vec<String>,
        #[arg(long)]
        gene_type: Option<String>,
        /// Only interactions between the given genes.
        #[arg(long)]
        between: bool,
    },

    #[command(about = "Gene sets with GSEA results for a comparison")]
    GseaSets {
        #[command(flatten)]
        comparison: ComparisonArgs,
    },

    #[command(about = "Terms of a gene set")]
    GseaTerms {
        #[command(flatten)]
        comparison: ComparisonArgs,
        #[arg(long)]
        gene_set: String,
    },

    #[command(about = "GSEA results for a gene set")]
    GseaResults {
        #[command(flatten)]
        comparison: ComparisonArgs,
        #[arg(long)]
        gene_set: String,
        #[arg(long = "term", value_delimiter = ',')]
        terms: Vec<String>,
    },

    #[command(about = "GSEA enrichment plot for one term, written as SVG")]
    GseaPlot {
        #[command(flatten)]
        comparison: ComparisonArgs,
        #[arg(long)]
        gene_set: String,
        #[arg(long)]
        term: String,
    },

    #[command(about = "Similarity scores and MDS coordinates between cancer types")]
    Network {
        #[arg(long, default_value = PAN_CANCER)]
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
        /// Write heatmap and MDS figures for types and subtypes here.
        #[arg(long)]
        plots: Option<PathBuf>,
        /// Draw the full matrix instead of one triangle.
        #[arg(long)]
        no_mask: bool,
    },

    #[command(subcommand, about = "spongEffects modules and classifier runs")]
    Effects(EffectsCommand),
}

#[derive(Debug, Subcommand)]
pub enum EffectsCommand {
    #[command(about = "Runs with their dataset information")]
    Runs { disease: String },

    #[command(about = "Overall classifier performance of a run")]
    Performance {
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
    },

    #[command(about = "Per-subtype classifier performance of a run")]
    ClassPerformance {
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
    },

    #[command(about = "Enrichment score distributions per subtype")]
    Distributions {
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
    },

    #[command(about = "Modules ranked by importance")]
    Modules {
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
    },

    #[command(about = "Members of the given modules")]
    Members {
        disease: String,
        #[arg(long, default_value = "gene")]
        level: ElementLevel,
        #[arg(long = "ensg", value_delimiter = ',')]
        ensg_numbers: Vec<String>,
        #[arg(long = "symbol", value_delimiter = ',')]
        gene_symbols: Vec<String>,
        #[arg(long = "gene-id", value_delimiter = ',')]
        gene_ids: Vec<String>,
    },
}

/// The two sides of a differential comparison.
#[derive(Debug, Args)]
pub struct ComparisonArgs {
    #[arg(long)]
    pub disease_1: String,
    #[arg(long)]
    pub disease_2: String,
    #[arg(long)]
    pub condition_1: String,
    #[arg(long)]
    pub condition_2: String,
    #[arg(long)]
    pub subtype_1: Option<String>,
    #[arg(long)]
    pub subtype_2: Option<String>,
}

impl ComparisonArgs {
    pub fn to_comparison(&self) -> Comparison {
        Comparison::new(
            self.disease_1.as_str(),
            self.disease_2.as_str(),
            self.condition_1.as_str(),
            self.condition_2.as_str(),
        )
        .with_subtypes(self.subtype_1.clone(), self.subtype_2.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_diff_expr_list_arguments() {
        let cli = Cli::try_parse_from([
            "sponge",
            "diff-expr",
            "--disease-1",
            "liver",
            "--disease-2",
            "thymoma",
            "--condition-1",
            "disease",
            "--condition-2",
            "disease",
            "--symbol",
            "CYP2E1,TP53",
            "--symbol",
            "MYH9",
        ])
        .unwrap();

        match cli.command {
            Command::DiffExpr { comparison, gene_symbols, ensg_numbers } => {
                assert_eq!(gene_symbols, vec!["CYP2E1", "TP53", "MYH9"]);
                assert!(ensg_numbers.is_empty());
                let comparison = comparison.to_comparison();
                assert_eq!(comparison.disease_name_2, "thymoma");
                assert_eq!(comparison.disease_subtype_1, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_diff_expr_conflicting_identifiers() {
        let parsed = Cli::try_parse_from([
            "sponge",
            "diff-expr",
            "--disease-1",
            "a",
            "--disease-2",
            "b",
            "--condition-1",
            "disease",
            "--condition-2",
            "normal",
            "--ensg",
            "ENSG00000130649",
            "--symbol",
            "CYP2E1",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_network_defaults_and_global_flags() {
        let cli = Cli::try_parse_from(["sponge", "network", "--api-version", "1", "-o", "scores.csv"]).unwrap();
        assert_eq!(cli.api_version, Some(1));
        assert_eq!(cli.output, Some(PathBuf::from("scores.csv")));
        match cli.command {
            Command::Network { disease, level, plots, no_mask } => {
                assert_eq!(disease, PAN_CANCER);
                assert_eq!(level, ElementLevel::Gene);
                assert!(plots.is_none());
                assert!(!no_mask);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_effects_level_parsing() {
        let cli = Cli::try_parse_from(["sponge", "effects", "modules", "kidney", "--level", "transcript"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Effects(EffectsCommand::Modules { level: ElementLevel::Transcript, .. })
        ));

        let bad = Cli::try_parse_from(["sponge", "effects", "modules", "kidney", "--level", "protein"]);
        assert!(bad.is_err());
    }
}
