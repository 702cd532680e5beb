//! Taxonomy Index: the two fixed reference tables and lexical candidate retrieval.
//!
//! Built once at startup and shared read-only (`Arc<TaxonomyIndex>`) by every
//! classification. Loading is the one unrecoverable failure in the service:
//! a missing, empty, or malformed table aborts startup with `ConfigurationError`.

pub mod aliases;
pub mod handlers;
pub mod tokenize;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigurationError;
use crate::taxonomy::aliases::{AliasTable, ALIAS_WEIGHT};
use crate::taxonomy::tokenize::{phrases, tokenize};

/// Number of digits in every taxonomy code.
pub const CODE_DIGITS: usize = 5;

/// A matched two-word phrase counts this many times a single keyword.
const PHRASE_WEIGHT: f64 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    Industry,
    Occupation,
}

impl TaxonomyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::Industry => "industry",
            TaxonomyKind::Occupation => "occupation",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonomyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "industry" => Ok(TaxonomyKind::Industry),
            "occupation" => Ok(TaxonomyKind::Occupation),
            other => Err(format!(
                "unknown taxonomy '{other}' (expected 'industry' or 'occupation')"
            )),
        }
    }
}

/// One raw `(code, title)` row as it appears in a taxonomy data file.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyRow {
    pub code: String,
    pub title: String,
}

#[cfg(test)]
impl TaxonomyRow {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

/// A validated taxonomy entry. Immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyCode {
    pub code: String,
    pub title: String,
    #[serde(skip)]
    keywords: BTreeSet<String>,
    #[serde(skip)]
    phrases: BTreeSet<String>,
    #[serde(skip)]
    numeric: u32,
}

impl TaxonomyCode {
    fn parse(kind: TaxonomyKind, row: usize, raw: TaxonomyRow) -> Result<Self, ConfigurationError> {
        let code = raw.code.trim().to_string();
        let title = raw.title.trim().to_string();

        if !is_valid_code(&code) {
            return Err(ConfigurationError::MalformedCode { kind, row, code });
        }
        if title.is_empty() {
            return Err(ConfigurationError::MissingTitle { kind, row, code });
        }

        let tokens = tokenize(&title);
        let numeric = code
            .parse::<u32>()
            .map_err(|_| ConfigurationError::MalformedCode {
                kind,
                row,
                code: code.clone(),
            })?;

        Ok(Self {
            keywords: tokens.iter().cloned().collect(),
            phrases: phrases(&tokens).into_iter().collect(),
            code,
            title,
            numeric,
        })
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Leading `digits` digits of the code, clamped to 1..=5.
    pub fn prefix(&self, digits: usize) -> &str {
        &self.code[..digits.clamp(1, CODE_DIGITS)]
    }

    /// Every hierarchical prefix, shortest first: section through full code.
    pub fn prefixes(&self) -> Vec<&str> {
        (1..=CODE_DIGITS).map(|digits| self.prefix(digits)).collect()
    }

    /// Total keyword weight a perfect match would score against.
    fn match_weight(&self) -> f64 {
        self.keywords.len() as f64 + PHRASE_WEIGHT * self.phrases.len() as f64
    }
}

/// True for exactly five ASCII digits.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_DIGITS && code.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    Lexical,
    AiSelected,
}

/// A taxonomy entry proposed for a query, with its lexical evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCandidate {
    pub code: String,
    pub title: String,
    /// Weighted term overlap in 0.0 – 1.0.
    pub lexical_score: f64,
    /// Number of title keywords the query hit (directly or through an alias).
    pub keyword_overlap: usize,
    pub origin: CandidateOrigin,
}

// ────────────────────────────────────────────────────────────────────────────
// Query terms
// ────────────────────────────────────────────────────────────────────────────

/// Weighted query tokens plus the adjacent-token phrases of each text segment.
///
/// Segments are added with a weight in 0.0 – 1.0 so that, for example, a job
/// title can count for more than the free-text description that follows it.
#[derive(Debug, Clone, Default)]
pub struct QueryTerms {
    weights: HashMap<String, f64>,
    phrases: HashSet<String>,
}

impl QueryTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str, weight: f64) -> Self {
        self.add_text(text, weight);
        self
    }

    pub fn add_text(&mut self, text: &str, weight: f64) {
        let weight = weight.clamp(0.0, 1.0);
        let tokens = tokenize(text);
        self.phrases.extend(phrases(&tokens));
        for token in tokens {
            let slot = self.weights.entry(token).or_insert(0.0);
            *slot = slot.max(weight);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tables
// ────────────────────────────────────────────────────────────────────────────

/// One validated taxonomy, ordered by numeric code.
#[derive(Debug, Clone)]
pub struct TaxonomyTable {
    kind: TaxonomyKind,
    entries: Vec<TaxonomyCode>,
    by_code: HashMap<String, usize>,
}

impl TaxonomyTable {
    /// Validates rows into a table. Rows whose code and title are both blank are skipped.
    pub fn from_rows(
        kind: TaxonomyKind,
        rows: impl IntoIterator<Item = TaxonomyRow>,
    ) -> Result<Self, ConfigurationError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (idx, raw) in rows.into_iter().enumerate() {
            let row = idx + 1;
            if raw.code.trim().is_empty() && raw.title.trim().is_empty() {
                continue;
            }
            let entry = TaxonomyCode::parse(kind, row, raw)?;
            if !seen.insert(entry.code.clone()) {
                return Err(ConfigurationError::DuplicateCode {
                    kind,
                    row,
                    code: entry.code,
                });
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(ConfigurationError::EmptyTable { kind });
        }

        entries.sort_by_key(|e| e.numeric);
        let by_code = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.clone(), i))
            .collect();

        Ok(Self {
            kind,
            entries,
            by_code,
        })
    }

    /// Loads a `code,title` CSV file (header row required).
    pub fn load_csv(kind: TaxonomyKind, path: &Path) -> Result<Self, ConfigurationError> {
        if !path.is_file() {
            return Err(ConfigurationError::MissingTable {
                kind,
                path: path.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| ConfigurationError::Read { kind, source })?;

        let rows = reader
            .deserialize::<TaxonomyRow>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ConfigurationError::Read { kind, source })?;

        let table = Self::from_rows(kind, rows)?;
        info!(
            "Loaded {} {} codes from {}",
            table.len(),
            kind,
            path.display()
        );
        Ok(table)
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn get(&self, code: &str) -> Option<&TaxonomyCode> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyCode> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Index
// ────────────────────────────────────────────────────────────────────────────

/// Both taxonomies plus the alias table. Read-only after construction.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    industry: TaxonomyTable,
    occupation: TaxonomyTable,
    aliases: AliasTable,
}

impl TaxonomyIndex {
    pub fn new(
        industry: TaxonomyTable,
        occupation: TaxonomyTable,
        aliases: AliasTable,
    ) -> Result<Self, ConfigurationError> {
        for (table, expected) in [
            (&industry, TaxonomyKind::Industry),
            (&occupation, TaxonomyKind::Occupation),
        ] {
            if table.kind() != expected {
                return Err(ConfigurationError::KindMismatch {
                    expected,
                    found: table.kind(),
                });
            }
        }

        Ok(Self {
            industry,
            occupation,
            aliases,
        })
    }

    /// Loads both CSV tables and the built-in alias table.
    pub fn load(industry_path: &Path, occupation_path: &Path) -> Result<Self, ConfigurationError> {
        let industry = TaxonomyTable::load_csv(TaxonomyKind::Industry, industry_path)?;
        let occupation = TaxonomyTable::load_csv(TaxonomyKind::Occupation, occupation_path)?;
        Self::new(industry, occupation, AliasTable::builtin())
    }

    pub fn table(&self, kind: TaxonomyKind) -> &TaxonomyTable {
        match kind {
            TaxonomyKind::Industry => &self.industry,
            TaxonomyKind::Occupation => &self.occupation,
        }
    }

    pub fn lookup(&self, kind: TaxonomyKind, code: &str) -> Option<&TaxonomyCode> {
        self.table(kind).get(code)
    }

    /// Top-`top_k` entries of `kind` for the query, by descending lexical score.
    ///
    /// Ties go to the larger keyword overlap, then to the lowest numeric code,
    /// so identical queries always produce identical candidate lists.
    /// Entries with no keyword overlap are never returned.
    pub fn candidates(
        &self,
        kind: TaxonomyKind,
        query: &QueryTerms,
        top_k: usize,
    ) -> Vec<ClassificationCandidate> {
        if query.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let expanded = self.expand_query(query);

        let mut scored: Vec<(&TaxonomyCode, f64, usize)> = self
            .table(kind)
            .iter()
            .filter_map(|entry| {
                score_entry(entry, &expanded, &query.phrases).map(|(s, o)| (entry, s, o))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| b.2.cmp(&a.2))
                .then_with(|| a.0.numeric.cmp(&b.0.numeric))
        });

        scored
            .into_iter()
            .take(top_k)
            .map(|(entry, lexical_score, keyword_overlap)| ClassificationCandidate {
                code: entry.code.clone(),
                title: entry.title.clone(),
                lexical_score,
                keyword_overlap,
                origin: CandidateOrigin::Lexical,
            })
            .collect()
    }

    /// Direct query weights plus alias expansions at reduced weight.
    fn expand_query(&self, query: &QueryTerms) -> HashMap<String, f64> {
        let mut expanded = query.weights.clone();
        for (token, weight) in &query.weights {
            for alias in self.aliases.expand(token) {
                let slot = expanded.entry(alias.clone()).or_insert(0.0);
                *slot = slot.max(weight * ALIAS_WEIGHT);
            }
        }
        expanded
    }
}

/// Lexical score and keyword overlap, or `None` when nothing matched.
fn score_entry(
    entry: &TaxonomyCode,
    weights: &HashMap<String, f64>,
    query_phrases: &HashSet<String>,
) -> Option<(f64, usize)> {
    let total = entry.match_weight();
    if total == 0.0 {
        return None;
    }

    let mut matched = 0.0;
    let mut overlap = 0;
    for keyword in &entry.keywords {
        if let Some(weight) = weights.get(keyword) {
            matched += weight;
            overlap += 1;
        }
    }
    if overlap == 0 {
        return None;
    }

    let phrase_hits = entry
        .phrases
        .iter()
        .filter(|p| query_phrases.contains(*p))
        .count();
    matched += PHRASE_WEIGHT * phrase_hits as f64;

    Some(((matched / total).clamp(0.0, 1.0), overlap))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Small but realistic slice of both taxonomies, shared with the classifier tests.
    pub(crate) fn sample_index() -> TaxonomyIndex {
        let industry = TaxonomyTable::from_rows(
            TaxonomyKind::Industry,
            vec![
                TaxonomyRow::new("10711", "Manufacture of bread and cakes"),
                TaxonomyRow::new("26111", "Manufacture of semiconductor wafers"),
                TaxonomyRow::new("47110", "Retail sale in supermarkets"),
                TaxonomyRow::new("56111", "Restaurants"),
                TaxonomyRow::new("62011", "Development of software and applications"),
                TaxonomyRow::new("62021", "Information technology consultancy"),
                TaxonomyRow::new("63111", "Data processing and hosting"),
                TaxonomyRow::new("64191", "Commercial banking activities"),
                TaxonomyRow::new("64192", "Merchant banks"),
                TaxonomyRow::new("65121", "General insurance"),
                TaxonomyRow::new("70201", "Management consultancy services"),
                TaxonomyRow::new("86101", "General hospitals"),
            ],
        )
        .unwrap();

        let occupation = TaxonomyTable::from_rows(
            TaxonomyKind::Occupation,
            vec![
                TaxonomyRow::new("12111", "Finance manager"),
                TaxonomyRow::new("12122", "Human resource manager"),
                TaxonomyRow::new("21441", "Mechanical engineer"),
                TaxonomyRow::new("22210", "Registered nurse"),
                TaxonomyRow::new("24111", "Accountant"),
                TaxonomyRow::new("24131", "Financial analyst"),
                TaxonomyRow::new("25121", "Software developer"),
                TaxonomyRow::new("25141", "Applications programmer"),
                TaxonomyRow::new("51201", "Cook"),
                TaxonomyRow::new("52201", "Shop sales assistant"),
            ],
        )
        .unwrap();

        TaxonomyIndex::new(industry, occupation, AliasTable::builtin()).unwrap()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_code_prefixes_are_hierarchical() {
        let index = sample_index();
        let entry = index.lookup(TaxonomyKind::Industry, "64191").unwrap();
        assert_eq!(entry.prefix(1), "6");
        assert_eq!(entry.prefixes(), vec!["6", "64", "641", "6419", "64191"]);
        assert_eq!(entry.prefix(9), "64191");
    }

    #[test]
    fn test_keywords_derived_from_title() {
        let index = sample_index();
        let entry = index.lookup(TaxonomyKind::Industry, "64191").unwrap();
        let keywords: Vec<&str> = entry.keywords().iter().map(String::as_str).collect();
        assert_eq!(keywords, vec!["bank", "commercial"]);
    }

    #[test]
    fn test_malformed_code_is_configuration_error() {
        for bad in ["6419", "641911", "64a91", " "] {
            let result = TaxonomyTable::from_rows(
                TaxonomyKind::Industry,
                vec![TaxonomyRow::new(bad, "Banks")],
            );
            assert!(
                matches!(result, Err(ConfigurationError::MalformedCode { .. })),
                "code {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_table_is_configuration_error() {
        let result = TaxonomyTable::from_rows(TaxonomyKind::Occupation, vec![]);
        assert!(matches!(result, Err(ConfigurationError::EmptyTable { .. })));

        let blank_only = TaxonomyTable::from_rows(
            TaxonomyKind::Occupation,
            vec![TaxonomyRow::new("", ""), TaxonomyRow::new("  ", " ")],
        );
        assert!(matches!(blank_only, Err(ConfigurationError::EmptyTable { .. })));
    }

    #[test]
    fn test_duplicate_code_is_configuration_error() {
        let result = TaxonomyTable::from_rows(
            TaxonomyKind::Industry,
            vec![
                TaxonomyRow::new("64191", "Banks"),
                TaxonomyRow::new("64191", "Banks again"),
            ],
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateCode { row: 2, .. })
        ));
    }

    #[test]
    fn test_missing_title_is_configuration_error() {
        let result = TaxonomyTable::from_rows(
            TaxonomyKind::Industry,
            vec![TaxonomyRow::new("64191", "  ")],
        );
        assert!(matches!(result, Err(ConfigurationError::MissingTitle { .. })));
    }

    #[test]
    fn test_index_rejects_swapped_tables() {
        let industry = TaxonomyTable::from_rows(
            TaxonomyKind::Industry,
            vec![TaxonomyRow::new("64191", "Banks")],
        )
        .unwrap();
        let result = TaxonomyIndex::new(industry.clone(), industry, AliasTable::default());
        assert!(matches!(result, Err(ConfigurationError::KindMismatch { .. })));
    }

    #[test]
    fn test_load_csv_reads_header_and_trims() {
        let file = write_csv("code,title\n64191, Commercial banking activities \n\n25121,Software developer\n");
        let table = TaxonomyTable::load_csv(TaxonomyKind::Industry, file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("64191").unwrap().title,
            "Commercial banking activities"
        );
        // Ordered by numeric code regardless of file order
        assert_eq!(table.iter().next().unwrap().code, "25121");
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = TaxonomyTable::load_csv(
            TaxonomyKind::Industry,
            Path::new("/definitely/not/here.csv"),
        );
        assert!(matches!(result, Err(ConfigurationError::MissingTable { .. })));
    }

    #[test]
    fn test_load_csv_header_only_is_empty() {
        let file = write_csv("code,title\n");
        let result = TaxonomyTable::load_csv(TaxonomyKind::Occupation, file.path());
        assert!(matches!(result, Err(ConfigurationError::EmptyTable { .. })));
    }

    #[test]
    fn test_load_csv_malformed_code() {
        let file = write_csv("code,title\n2512,Software developer\n");
        let result = TaxonomyTable::load_csv(TaxonomyKind::Occupation, file.path());
        assert!(matches!(result, Err(ConfigurationError::MalformedCode { .. })));
    }

    #[test]
    fn test_candidates_ranked_by_score() {
        let index = sample_index();
        let query = QueryTerms::new().with_text("DBS provides commercial banking services", 1.0);
        let candidates = index.candidates(TaxonomyKind::Industry, &query, 15);

        assert_eq!(candidates[0].code, "64191");
        assert!(candidates[0].lexical_score > candidates[1].lexical_score);
        assert!(candidates.iter().all(|c| c.origin == CandidateOrigin::Lexical));
    }

    #[test]
    fn test_phrase_match_beats_single_token() {
        let index = sample_index();
        // "merchant banks" as a phrase; "commercial" absent
        let query = QueryTerms::new().with_text("merchant banks and bank branches", 1.0);
        let candidates = index.candidates(TaxonomyKind::Industry, &query, 15);
        assert_eq!(candidates[0].code, "64192");
        assert!((candidates[0].lexical_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_break_by_overlap_then_lowest_code() {
        let table = TaxonomyTable::from_rows(
            TaxonomyKind::Occupation,
            vec![
                TaxonomyRow::new("30000", "Welder"),
                TaxonomyRow::new("20000", "Welder"),
                TaxonomyRow::new("10000", "Welder"),
            ],
        )
        .unwrap();
        let index = TaxonomyIndex::new(
            TaxonomyTable::from_rows(
                TaxonomyKind::Industry,
                vec![TaxonomyRow::new("64191", "Banks")],
            )
            .unwrap(),
            table,
            AliasTable::default(),
        )
        .unwrap();

        let query = QueryTerms::new().with_text("welder", 1.0);
        let codes: Vec<String> = index
            .candidates(TaxonomyKind::Occupation, &query, 15)
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["10000", "20000", "30000"]);
    }

    #[test]
    fn test_candidates_are_unique_bounded_and_scored_in_range() {
        let index = sample_index();
        let query = QueryTerms::new()
            .with_text("software applications data hosting banking insurance", 1.0);
        let candidates = index.candidates(TaxonomyKind::Industry, &query, 3);

        assert_eq!(candidates.len(), 3);
        let codes: HashSet<&str> = candidates.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), candidates.len());
        assert!(candidates
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.lexical_score)));
    }

    #[test]
    fn test_alias_hits_score_lower_than_direct_hits() {
        let index = sample_index();
        // "programmer" aliases to "developer"/"software"
        let alias_query = QueryTerms::new().with_text("programmer", 1.0);
        let direct_query = QueryTerms::new().with_text("software developer", 1.0);

        let via_alias = index.candidates(TaxonomyKind::Occupation, &alias_query, 15);
        let direct = index.candidates(TaxonomyKind::Occupation, &direct_query, 15);

        let alias_score = via_alias
            .iter()
            .find(|c| c.code == "25121")
            .map(|c| c.lexical_score)
            .unwrap();
        assert!(alias_score > 0.0);
        assert!(alias_score < direct[0].lexical_score);
    }

    #[test]
    fn test_no_overlap_returns_empty() {
        let index = sample_index();
        let query = QueryTerms::new().with_text("zebra xylophone", 1.0);
        assert!(index
            .candidates(TaxonomyKind::Industry, &query, 15)
            .is_empty());
        assert!(index
            .candidates(TaxonomyKind::Industry, &QueryTerms::new(), 15)
            .is_empty());
    }

    #[test]
    fn test_candidates_are_deterministic() {
        let index = sample_index();
        let query = QueryTerms::new()
            .with_text("Software Engineer", 1.0)
            .with_text("builds cloud applications for banks", 0.5);
        let first = index.candidates(TaxonomyKind::Occupation, &query, 15);
        for _ in 0..10 {
            assert_eq!(index.candidates(TaxonomyKind::Occupation, &query, 15), first);
        }
    }

    #[test]
    fn test_segment_weight_caps_at_one() {
        let mut query = QueryTerms::new();
        query.add_text("bank", 4.0);
        query.add_text("bank", 0.2);
        assert_eq!(query.weights.len(), 1);
        assert!((query.weights["bank"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shipped_data_files_load() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let index = TaxonomyIndex::load(
            &data.join("industry_taxonomy.csv"),
            &data.join("occupation_taxonomy.csv"),
        )
        .unwrap();

        assert!(index.table(TaxonomyKind::Industry).len() > 100);
        assert!(index.table(TaxonomyKind::Occupation).len() > 100);

        let query = QueryTerms::new().with_text("Software Engineer", 1.0);
        let top = &index.candidates(TaxonomyKind::Occupation, &query, 15)[0];
        assert!(top.title.to_lowercase().contains("software"));
    }

    #[test]
    fn test_taxonomy_kind_parses() {
        assert_eq!("Industry".parse::<TaxonomyKind>(), Ok(TaxonomyKind::Industry));
        assert_eq!(
            " occupation ".parse::<TaxonomyKind>(),
            Ok(TaxonomyKind::Occupation)
        );
        assert!("sector".parse::<TaxonomyKind>().is_err());
    }
}
