//! Risk keyword classification.
//!
//! Matching is a case-insensitive substring search over the text that follows
//! the risk indicator label. Negated phrasing ("no suicidal thoughts") still
//! matches; a false alarm costs less than a missed crisis.

use std::collections::BTreeSet;

use super::report::RiskTag;

/// Keywords per tag, lowercase.
const RISK_KEYWORDS: &[(RiskTag, &[&str])] = &[
    (
        RiskTag::SuicidalIdeation,
        &["suicidal", "suicide", "kill myself", "end my life"],
    ),
    (RiskTag::SelfHarm, &["self-harm", "self harm", "hurt myself"]),
    (
        RiskTag::HarmToOthers,
        &[
            "harmful intent towards others",
            "harmful intent toward others",
            "harm to others",
            "harm others",
            "hurt others",
            "hurt someone",
        ],
    ),
];

/// Tags whose keywords occur in `scope`.
pub fn classify(scope: &str) -> BTreeSet<RiskTag> {
    let haystack = scope.to_lowercase();
    RISK_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map(|(tag, _)| *tag)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_no_keywords() {
        assert!(classify("No specific risk indicators detected").is_empty());
    }

    #[test]
    fn test_classify_each_tag() {
        assert_eq!(
            classify("Suicidal ideation mentioned"),
            [RiskTag::SuicidalIdeation].into_iter().collect()
        );
        assert_eq!(
            classify("Self-harm mentioned"),
            [RiskTag::SelfHarm].into_iter().collect()
        );
        assert_eq!(
            classify("Harmful intent towards others mentioned"),
            [RiskTag::HarmToOthers].into_iter().collect()
        );
    }

    #[test]
    fn test_classify_multiple_and_case_insensitive() {
        let tags = classify("User said they want to END MY LIFE and HURT MYSELF");
        assert!(tags.contains(&RiskTag::SuicidalIdeation));
        assert!(tags.contains(&RiskTag::SelfHarm));
        assert!(!tags.contains(&RiskTag::HarmToOthers));
    }
}
