//! Alias table: related vocabulary that free text uses but taxonomy titles don't.
//!
//! Entries are written as plain words and normalized through `tokenize` when
//! the table is built, so they always agree with the index's keyword form.
//! A query token matching an alias scores at `ALIAS_WEIGHT` of a direct hit.

use std::collections::{BTreeSet, HashMap};

use crate::taxonomy::tokenize::tokenize;

/// Fraction of a direct-hit weight credited to a token reached through an alias.
pub const ALIAS_WEIGHT: f64 = 0.5;

/// word → related words. Directed: "fintech" expands to "financial", not the reverse.
const ALIASES: &[(&str, &[&str])] = &[
    // technology
    ("software", &["computer", "programming", "application"]),
    ("developer", &["programmer", "software"]),
    ("programmer", &["developer", "software"]),
    ("engineer", &["developer"]),
    ("app", &["application", "software"]),
    ("cloud", &["computing", "hosting", "data"]),
    ("saas", &["software", "publishing"]),
    ("tech", &["technology", "information"]),
    ("digital", &["information", "technology"]),
    ("cybersecurity", &["security", "computer"]),
    ("data", &["information", "processing"]),
    ("ai", &["computer", "software"]),
    ("web", &["internet", "portal"]),
    ("ecommerce", &["retail", "internet"]),
    ("fintech", &["financial", "technology"]),
    // finance
    ("bank", &["financial", "monetary"]),
    ("finance", &["financial", "bank", "investment"]),
    ("financial", &["finance", "bank"]),
    ("wealth", &["fund", "investment"]),
    ("accounting", &["accountant", "bookkeeping", "auditing"]),
    ("accountant", &["accounting", "auditor"]),
    ("insurer", &["insurance"]),
    ("broker", &["brokerage", "securities"]),
    // people and organisations
    ("hr", &["human", "resource"]),
    ("recruiter", &["recruitment", "employment", "placement"]),
    ("recruitment", &["employment", "placement"]),
    ("manager", &["management", "director"]),
    ("head", &["manager", "director"]),
    ("lead", &["manager", "supervisor"]),
    ("executive", &["officer", "manager"]),
    ("consultant", &["consultancy", "advisory"]),
    ("consulting", &["consultancy", "advisory"]),
    ("advisor", &["consultant", "advisory"]),
    ("analyst", &["analysis", "specialist"]),
    ("marketing", &["advertising", "sales"]),
    ("sales", &["trade", "retail"]),
    // services
    ("hospital", &["health", "medical"]),
    ("clinic", &["medical", "health"]),
    ("healthcare", &["health", "medical", "hospital"]),
    ("doctor", &["medical", "physician", "practitioner"]),
    ("pharma", &["pharmaceutical"]),
    ("biotech", &["biotechnology", "research"]),
    ("school", &["education"]),
    ("university", &["education", "tertiary"]),
    ("teacher", &["teaching", "education"]),
    ("tutor", &["tuition", "education"]),
    ("lecturer", &["teaching", "tertiary"]),
    ("lawyer", &["legal", "law"]),
    ("law", &["legal"]),
    ("hotel", &["accommodation"]),
    ("restaurant", &["food", "beverage"]),
    ("cafe", &["food", "beverage"]),
    ("chef", &["cook", "food"]),
    ("logistics", &["freight", "transport", "warehousing"]),
    ("shipping", &["freight", "transport"]),
    ("courier", &["delivery", "postal"]),
    ("airline", &["air", "transport"]),
    ("telco", &["telecommunications"]),
    ("property", &["real", "estate"]),
    ("developer", &["development"]),
    ("factory", &["manufacturing", "production"]),
    ("semiconductor", &["electronic", "wafer"]),
    ("government", &["public", "administration"]),
    ("ministry", &["public", "administration", "government"]),
];

/// Normalized alias lookup built once alongside the taxonomy index.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    expansions: HashMap<String, BTreeSet<String>>,
}

impl AliasTable {
    pub fn builtin() -> Self {
        Self::from_entries(ALIASES)
    }

    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut expansions: HashMap<String, BTreeSet<String>> = HashMap::new();

        for (word, related) in entries {
            // An alias key that normalizes to nothing (a stopword) can never match a query token.
            let Some(key) = tokenize(word).into_iter().next() else {
                continue;
            };
            let targets = expansions.entry(key.clone()).or_default();
            for related_word in related.iter() {
                targets.extend(tokenize(related_word).into_iter().filter(|t| *t != key));
            }
        }

        expansions.retain(|_, targets| !targets.is_empty());
        Self { expansions }
    }

    /// Related normalized tokens for a normalized query token, in sorted order.
    pub fn expand<'a>(&'a self, token: &str) -> impl Iterator<Item = &'a String> + 'a {
        self.expansions
            .get(token)
            .into_iter()
            .flat_map(|targets| targets.iter())
    }
}
