//! `sponge`: command-line access to the SPONGE-web API.
//!
//! Tables print as CSV, figures are written as SVG.

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use sponge_api::queries::{
    DifferentialExpressionGene, DifferentialExpressionTranscript, EnrichmentScoreDistributions, GseaPlot,
    GseaResults, GseaSets, GseaTerms, ModuleMembers, NetworkResultsQuery, OverallCounts, RunClassPerformance,
    RunPerformance, SpongEffectsModules, SpongEffectsRuns, SpongedMirna,
};
use sponge_api::{ClientConfig, FlatTable, Query, SpongeClient};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, EffectsCommand};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sponge=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sponge = SpongeClient::new(client_config(&cli)?).context("Failed to build HTTP client")?;
    debug!(base_url = %sponge.config().base_url, "Client ready");

    run(&sponge, &cli)
}

/// Config file and environment first, then command-line flags.
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str()).context("Invalid --base-url")?;
    }
    if let Some(version) = cli.api_version {
        config = config.with_api_version(version);
    }
    Ok(config)
}

fn run(sponge: &SpongeClient, cli: &Cli) -> Result<()> {
    let output = cli.output.as_deref();

    match &cli.command {
        Command::Overview => table(sponge, &OverallCounts::new(), cli),
        Command::DiffExpr { comparison, ensg_numbers, gene_symbols } => {
            let query = DifferentialExpressionGene::new(comparison.to_comparison())
                .with_ensg_numbers(ensg_numbers)
                .with_gene_symbols(gene_symbols);
            table(sponge, &query, cli)
        }
        Command::DiffExprTranscript { comparison, enst_numbers } => {
            let query = DifferentialExpressionTranscript::new(comparison.to_comparison()).with_enst_numbers(enst_numbers);
            table(sponge, &query, cli)
        }
        Command::FindMirna { disease, ensg_numbers, gene_symbols, gene_type, between } => {
            let mut query = SpongedMirna::new()
                .with_ensg_numbers(ensg_numbers)
                .with_gene_symbols(gene_symbols)
                .between(*between);
            if let Some(disease) = disease {
                query = query.with_disease(disease.as_str());
            }
            if let Some(gene_type) = gene_type {
                query = query.with_gene_type(gene_type.as_str());
            }
            table(sponge, &query, cli)
        }
        Command::GseaSets { comparison } => table(sponge, &GseaSets::new(comparison.to_comparison()), cli),
        Command::GseaTerms { comparison, gene_set } => {
            table(sponge, &GseaTerms::new(comparison.to_comparison(), gene_set.as_str()), cli)
        }
        Command::GseaResults { comparison, gene_set, terms } => {
            let query = GseaResults::new(comparison.to_comparison(), gene_set.as_str()).with_terms(terms);
            table(sponge, &query, cli)
        }
        Command::GseaPlot { comparison, gene_set, term } => {
            let query = GseaPlot::new(comparison.to_comparison(), gene_set.as_str(), term.as_str());
            let plot = sponge.run(&query).with_context(|| format!("{} failed", query.path()))?;
            let path = output.map(ToOwned::to_owned).unwrap_or_else(|| format!("gsea_{}.svg", sanitize(term)).into());
            sponge_plot::enrichment_figure(&plot)
                .save(&path)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Network { disease, level, plots, no_mask } => {
            let query = NetworkResultsQuery::new(disease.as_str()).with_level(*level);
            let results = sponge.run(&query).with_context(|| format!("{} failed", query.path()))?;
            info!(
                types = results.cancer_type.scores.labels.len(),
                subtypes = results.subtype.as_ref().map_or(0, |s| s.scores.labels.len()),
                "Fetched network results"
            );
            output::write_table(&output::scores_table(&results.cancer_type.scores)?, output)?;

            if let Some(dir) = plots {
                std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
                output::save_bundle_plots(&results.cancer_type, dir, "type", !no_mask)?;
                if let Some(subtype) = &results.subtype {
                    output::save_bundle_plots(subtype, dir, "subtype", !no_mask)?;
                }
            }
            Ok(())
        }
        Command::Effects(effects) => run_effects(sponge, effects, cli),
    }
}

fn run_effects(sponge: &SpongeClient, command: &EffectsCommand, cli: &Cli) -> Result<()> {
    match command {
        EffectsCommand::Runs { disease } => table(sponge, &SpongEffectsRuns::new(disease.as_str()), cli),
        EffectsCommand::Performance { disease, level } => {
            table(sponge, &RunPerformance::new(disease.as_str()).with_level(*level), cli)
        }
        EffectsCommand::ClassPerformance { disease, level } => {
            table(sponge, &RunClassPerformance::new(disease.as_str()).with_level(*level), cli)
        }
        EffectsCommand::Distributions { disease, level } => {
            table(sponge, &EnrichmentScoreDistributions::new(disease.as_str()).with_level(*level), cli)
        }
        EffectsCommand::Modules { disease, level } => {
            table(sponge, &SpongEffectsModules::new(disease.as_str()).with_level(*level), cli)
        }
        EffectsCommand::Members { disease, level, ensg_numbers, gene_symbols, gene_ids } => {
            let query = ModuleMembers::new(disease.as_str())
                .with_level(*level)
                .with_ensg_numbers(ensg_numbers)
                .with_gene_symbols(gene_symbols)
                .with_gene_ids(gene_ids);
            table(sponge, &query, cli)
        }
    }
}

/// Run a record query and write the resulting table.
fn table<Q>(sponge: &SpongeClient, query: &Q, cli: &Cli) -> Result<()>
where
    Q: Query<Output = FlatTable>,
{
    let rows = sponge.run(query).with_context(|| format!("{} failed", query.path()))?;
    info!(endpoint = query.path(), rows = rows.len(), "Query complete");
    output::write_table(&rows, cli.output.as_deref())?;
    Ok(())
}

/// Term ids like `GO:0001676` as a file name.
fn sanitize(term: &str) -> String {
    term.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
