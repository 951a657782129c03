//! Query parameter building and local validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sponge_common::{Result, SpongeError};

/// Separator for list-valued parameters.
pub const LIST_DELIMITER: char = ',';

/// Ordered query parameters. `None` values are never inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an earlier value under the same name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Join a list with `,`. Empty lists are omitted; an element containing
    /// the delimiter would be split server-side, so it is rejected.
    pub fn with_list(self, name: &str, values: Option<&[String]>) -> Result<Self> {
        let values = match values {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(self),
        };
        if let Some(bad) = values.iter().find(|v| v.contains(LIST_DELIMITER)) {
            return Err(SpongeError::InvalidParameters(format!(
                "{} value {:?} contains the list delimiter '{}'",
                name, bad, LIST_DELIMITER
            )));
        }
        let joined = values.join(&LIST_DELIMITER.to_string());
        Ok(self.with(name, joined))
    }

    /// Booleans go out as `True`/`False`.
    pub fn with_flag(self, name: &str, value: bool) -> Self {
        self.with(name, if value { "True" } else { "False" })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// True when a list argument holds at least one item; an empty list is
/// omitted from the request and so is not "given".
pub fn is_given(list: &Option<Vec<String>>) -> bool {
    list.as_ref().is_some_and(|items| !items.is_empty())
}

/// Fail unless at most one of the named groups is set.
pub fn ensure_exclusive(groups: &[(&str, bool)]) -> Result<()> {
    let set: Vec<&str> = groups.iter().filter(|(_, is_set)| *is_set).map(|(n, _)| *n).collect();
    if set.len() > 1 {
        let names: Vec<&str> = groups.iter().map(|(n, _)| *n).collect();
        return Err(SpongeError::InvalidParameters(format!(
            "Only one of {} is allowed, got {}",
            names.join(", "),
            set.join(" and ")
        )));
    }
    Ok(())
}

/// Element level of a SPONGEdb v2 analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementLevel {
    #[default]
    Gene,
    Transcript,
}

impl ElementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementLevel::Gene => "gene",
            ElementLevel::Transcript => "transcript",
        }
    }
}

impl fmt::Display for ElementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementLevel {
    type Err = SpongeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gene" => Ok(ElementLevel::Gene),
            "transcript" => Ok(ElementLevel::Transcript),
            other => Err(SpongeError::InvalidParameters(format!(
                "level {} is not an allowed value [gene, transcript].",
                other
            ))),
        }
    }
}

/// Gene biotypes accepted by the `gene_type` filter.
pub const GENE_TYPES: [&str; 38] = [
    "3prime_overlapping_ncRNA",
    "antisense",
    "antisense_RNA",
    "bidirectional_promoter_lncRNA",
    "IG_C_gene",
    "IG_C_pseudogene",
    "IG_V_gene",
    "IG_V_pseudogene",
    "lincRNA",
    "macro_lncRNA",
    "miRNA",
    "misc_RNA",
    "Mt_rRNA",
    "polymorphic_pseudogene",
    "processed_pseudogene",
    "processed_transcript",
    "protein_coding",
    "pseudogene",
    "ribozyme",
    "rRNA",
    "rRNA_pseudogene",
    "scaRNA",
    "scRNA",
    "sense_intronic",
    "sense_overlapping",
    "snoRNA",
    "snRNA",
    "TEC",
    "TR_C_gene",
    "TR_V_gene",
    "TR_V_pseudogene",
    "transcribed_processed_pseudogene",
    "transcribed_unitary_pseudogene",
    "transcribed_unprocessed_pseudogene",
    "translated_processed_pseudogene",
    "unitary_pseudogene",
    "unprocessed_pseudogene",
    "vaultRNA",
];

/// A validated member of `GENE_TYPES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneType(&'static str);

impl GeneType {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for GeneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for GeneType {
    type Err = SpongeError;

    fn from_str(s: &str) -> Result<Self> {
        GENE_TYPES
            .iter()
            .find(|t| **t == s)
            .map(|t| GeneType(*t))
            .ok_or_else(|| {
                SpongeError::InvalidParameters(format!(
                    "Gene_type {} is not an allowed value. Allowed: {}",
                    s,
                    GENE_TYPES.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_joined_in_order_without_trailing_delimiter() {
        let genes = list(&["TCF7L1", "SEMA4B", "CYP2E1"]);
        let params = QueryParams::new().with_list("gene_symbol", Some(genes.as_slice())).unwrap();
        assert_eq!(params.get("gene_symbol"), Some("TCF7L1,SEMA4B,CYP2E1"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_none_and_empty_are_omitted() {
        let no_terms: Vec<String> = Vec::new();
        let params = QueryParams::new()
            .with("disease_name", "kidney")
            .with_opt("disease_subtype_1", None)
            .with_list("ensg_number", None)
            .unwrap()
            .with_list("term", Some(no_terms.as_slice()))
            .unwrap();
        assert_eq!(params.as_pairs(), &[("disease_name".to_string(), "kidney".to_string())]);
        assert!(!params.contains("disease_subtype_1"));
    }

    #[test]
    fn test_delimiter_inside_element_rejected() {
        let err = QueryParams::new()
            .with_list("term", Some(list(&["GO:1", "a,b"]).as_slice()))
            .unwrap_err();
        assert!(matches!(err, SpongeError::InvalidParameters(_)));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new().with("a", "1").with("b", "2");
        params.set("a", "3");
        assert_eq!(
            params.as_pairs(),
            &[("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_flag_serialization() {
        let params = QueryParams::new().with_flag("between", false);
        assert_eq!(params.get("between"), Some("False"));
    }

    #[test]
    fn test_ensure_exclusive() {
        assert!(ensure_exclusive(&[("ensg_number", true), ("gene_symbol", false)]).is_ok());
        assert!(ensure_exclusive(&[("ensg_number", false), ("gene_symbol", false)]).is_ok());
        let err = ensure_exclusive(&[("ensg_number", true), ("gene_symbol", true), ("gene_id", false)])
            .unwrap_err();
        assert!(err.to_string().contains("ensg_number and gene_symbol"));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("transcript".parse::<ElementLevel>().unwrap(), ElementLevel::Transcript);
        assert!(matches!(
            "protein".parse::<ElementLevel>(),
            Err(SpongeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_gene_type_vocabulary() {
        assert_eq!("protein_coding".parse::<GeneType>().unwrap().as_str(), "protein_coding");
        assert!("vaultRNA".parse::<GeneType>().is_ok());
        assert!("Protein_Coding".parse::<GeneType>().is_err());
        assert!("lncRNA".parse::<GeneType>().is_err());
    }
}
