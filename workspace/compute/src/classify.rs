//! Fixed-cost classification.
//!
//! Recurring, non-discretionary expenses (rent, insurance, utilities,
//! subscriptions, loans) are excluded from the budget-relevant figure.
//! The classification is keyword/substring matching against a category's
//! display name, case-insensitive; it is not a stored flag on the category
//! entity. One shared table is injected wherever classification happens so
//! call sites cannot drift apart.

/// Version of the built-in keyword table. Bumped whenever the list below
/// changes, so consumers can tell which table produced a figure.
pub const KEYWORD_TABLE_VERSION: u32 = 1;

/// Keywords marking an expense category as a fixed cost, with their German
/// equivalents. Matched as lowercase substrings of the category name.
const FIXED_COST_KEYWORDS: &[&str] = &[
    "rent",
    "miete",
    "insurance",
    "versicherung",
    "utilities",
    "nebenkosten",
    "strom",
    "subscription",
    "abo",
    "loan",
    "kredit",
    "darlehen",
    "mortgage",
    "hypothek",
];

/// Classifies expense categories as fixed costs by keyword matching.
#[derive(Debug, Clone)]
pub struct FixedCostClassifier {
    version: u32,
    keywords: Vec<String>,
}

impl FixedCostClassifier {
    /// Returns the classifier backed by the built-in keyword table.
    pub fn built_in() -> Self {
        Self::with_keywords(
            KEYWORD_TABLE_VERSION,
            FIXED_COST_KEYWORDS.iter().map(|k| k.to_string()),
        )
    }

    /// Builds a classifier from a custom keyword table.
    /// Keywords are stored lowercase; matching is case-insensitive.
    pub fn with_keywords(version: u32, keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            version,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// The version of the keyword table backing this classifier.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Tests whether a category display name marks a fixed cost.
    ///
    /// The name is lowercased and tested for containment of any keyword.
    /// Uncategorized transactions pass an empty name and never match.
    pub fn is_fixed_cost(&self, category_name: &str) -> bool {
        let name = category_name.to_lowercase();
        self.keywords.iter().any(|keyword| name.contains(keyword))
    }
}

impl Default for FixedCostClassifier {
    fn default() -> Self {
        Self::built_in()
    }
}
