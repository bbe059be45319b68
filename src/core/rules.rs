//! Slot rules: what each roster position accepts.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::AllocationError;
use crate::core::model::{CategoryTag, Signup};

/// Default roster size when no explicit count is configured.
pub const DEFAULT_SLOT_COUNT: usize = 25;

/// Eligibility predicate for one slot.
///
/// Missing or `null` fields deserialize to the most restrictive value, so a
/// malformed rule accepts no unlocked signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotRule {
    /// Slot accepts sponsor signups.
    #[serde(alias = "allowRich", deserialize_with = "null_as_default")]
    pub allow_sponsor: bool,
    /// Categories eligible through the normal path.
    #[serde(alias = "allowXinfaList", deserialize_with = "null_as_default")]
    pub allowed_categories: BTreeSet<CategoryTag>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Concise classification of a rule for display chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSummary {
    /// Sponsors only, no categories.
    SponsorOnly,
    /// Every category in the catalog, no sponsors.
    AnyCategory,
    /// Accepts nothing unlocked.
    Closed,
    /// A subset of categories, no sponsors.
    Categories(usize),
    /// Sponsors plus some categories.
    Mixed(usize),
}

impl SlotRule {
    /// Rule admitting only the listed categories.
    pub fn categories<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CategoryTag>,
    {
        Self {
            allow_sponsor: false,
            allowed_categories: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Rule admitting only sponsors.
    pub fn sponsor_only() -> Self {
        Self {
            allow_sponsor: true,
            allowed_categories: BTreeSet::new(),
        }
    }

    /// Also admit sponsors.
    #[must_use]
    pub fn with_sponsor(mut self) -> Self {
        self.allow_sponsor = true;
        self
    }

    /// Whether an unlocked signup may occupy this slot.
    pub fn admits(&self, signup: &Signup) -> bool {
        (signup.is_sponsor && self.allow_sponsor)
            || self.allowed_categories.contains(&signup.category)
    }

    /// Whether the rule accepts no unlocked signup at all.
    pub fn is_closed(&self) -> bool {
        !self.allow_sponsor && self.allowed_categories.is_empty()
    }

    /// Summarize against a catalog of `catalog_size` known categories.
    pub fn summary(&self, catalog_size: usize) -> RuleSummary {
        let n = self.allowed_categories.len();
        match (self.allow_sponsor, n) {
            (true, 0) => RuleSummary::SponsorOnly,
            (true, n) => RuleSummary::Mixed(n),
            (false, 0) => RuleSummary::Closed,
            (false, n) if catalog_size > 0 && n >= catalog_size => RuleSummary::AnyCategory,
            (false, n) => RuleSummary::Categories(n),
        }
    }
}

/// Ordered, fixed-length rules, one per slot.
///
/// A `null` entry decodes as a closed slot rather than rejecting the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<SlotRule>,
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rules = Vec::<Option<SlotRule>>::deserialize(deserializer)?;
        Ok(rules.into_iter().map(Option::unwrap_or_default).collect())
    }
}

impl RuleSet {
    /// Use the rules as given; the slot count is their length.
    pub const fn new(rules: Vec<SlotRule>) -> Self {
        Self { rules }
    }

    /// Pad to at least `slot_count` positions with closed rules.
    pub fn normalized(mut rules: Vec<SlotRule>, slot_count: usize) -> Self {
        if rules.len() < slot_count {
            rules.resize_with(slot_count, SlotRule::default);
        }
        Self { rules }
    }

    /// Blank roster of `slot_count` closed slots.
    pub fn closed(slot_count: usize) -> Self {
        Self::normalized(Vec::new(), slot_count)
    }

    /// Parse a JSON array of rules and pad to `slot_count`.
    ///
    /// A `null` document yields an all-closed roster.
    pub fn from_json_str(input: &str, slot_count: usize) -> Result<Self, AllocationError> {
        let parsed: Option<Self> =
            serde_json::from_str(input).map_err(|e| AllocationError::Parse(e.to_string()))?;
        let rules = parsed.map(|set| set.rules).unwrap_or_default();
        Ok(Self::normalized(rules, slot_count))
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the roster has no slots.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule at `slot`.
    pub fn get(&self, slot: usize) -> Option<&SlotRule> {
        self.rules.get(slot)
    }

    /// Replace the rule at `slot`; out-of-range indices are ignored.
    pub fn set(&mut self, slot: usize, rule: SlotRule) {
        if let Some(cell) = self.rules.get_mut(slot) {
            *cell = rule;
        }
    }

    /// Iterate rules in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, SlotRule> {
        self.rules.iter()
    }
}

impl FromIterator<SlotRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = SlotRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a SlotRule;
    type IntoIter = std::slice::Iter<'a, SlotRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_most_restrictive() {
        let rule: SlotRule = serde_json::from_str("{}").unwrap();
        assert!(rule.is_closed());
        assert!(!rule.admits(&Signup::new(1, "dps").sponsor()));
    }

    #[test]
    fn sponsor_path_requires_both_flags() {
        let rule = SlotRule::categories(["healer"]);
        assert!(!rule.admits(&Signup::new(1, "dps").sponsor()));
        assert!(rule.admits(&Signup::new(2, "healer").sponsor()));
        assert!(SlotRule::sponsor_only().admits(&Signup::new(3, "dps").sponsor()));
        assert!(!SlotRule::sponsor_only().admits(&Signup::new(4, "dps")));
    }

    #[test]
    fn normalized_pads_but_never_truncates() {
        let padded = RuleSet::normalized(vec![SlotRule::sponsor_only()], 3);
        assert_eq!(padded.len(), 3);
        assert!(padded.get(2).unwrap().is_closed());

        let long = RuleSet::normalized(vec![SlotRule::default(); 4], 2);
        assert_eq!(long.len(), 4);
    }

    #[test]
    fn parses_board_client_field_names() {
        let rules = RuleSet::from_json_str(
            r#"[{"allowRich": true, "allowXinfaList": ["tank"]}, {"allowedCategories": ["dps"]}]"#,
            DEFAULT_SLOT_COUNT,
        )
        .unwrap();
        assert_eq!(rules.len(), DEFAULT_SLOT_COUNT);
        assert_eq!(rules.get(0).unwrap().summary(10), RuleSummary::Mixed(1));
        assert_eq!(rules.get(1).unwrap().summary(10), RuleSummary::Categories(1));
    }

    #[test]
    fn null_entries_and_fields_decode_as_closed() {
        let rules = RuleSet::from_json_str(r#"[null, {"allowRich": true}]"#, 25).unwrap();
        assert_eq!(rules.len(), 25);
        assert!(rules.get(0).unwrap().is_closed());
        assert_eq!(rules.get(1).unwrap(), &SlotRule::sponsor_only());

        let rules = RuleSet::from_json_str(
            r#"[{"allowRich": false, "allowXinfaList": null}, {"allowRich": null}]"#,
            2,
        )
        .unwrap();
        assert!(rules.iter().all(SlotRule::is_closed));

        assert_eq!(RuleSet::from_json_str("null", 3).unwrap(), RuleSet::closed(3));
    }

    #[test]
    fn malformed_rules_report_parse_error() {
        let err = RuleSet::from_json_str("[{", 25).unwrap_err();
        assert!(matches!(err, AllocationError::Parse(_)));
    }

    #[test]
    fn summary_labels() {
        assert_eq!(SlotRule::sponsor_only().summary(3), RuleSummary::SponsorOnly);
        assert_eq!(SlotRule::default().summary(3), RuleSummary::Closed);
        assert_eq!(
            SlotRule::categories(["a", "b", "c"]).summary(3),
            RuleSummary::AnyCategory
        );
    }
}
