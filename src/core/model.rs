//! Signup records and the slot array they are placed into.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::AllocationError;

/// Role or specialization identifier declared by a signup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTag(pub String);

impl CategoryTag {
    /// Create a tag from any string-like value.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Borrow the tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier assigned by the owning application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupId(pub u64);

impl fmt::Display for SignupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a signup within one run: its position in the input queue.
///
/// Two signups with identical fields remain distinct because they occupy
/// different queue positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupRef(pub usize);

impl SignupRef {
    /// Queue position.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Slot cells, index-aligned with the rule set.
pub type SlotArray = Vec<Option<SignupRef>>;

/// One submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    /// External identifier.
    pub id: SignupId,
    /// Declared role/specialization.
    pub category: CategoryTag,
    /// Claims the sponsor path.
    pub is_sponsor: bool,
    /// Cancellation timestamp (ms since epoch); set means cancelled.
    pub cancelled_at: Option<u64>,
    /// Administrator-forced slot index.
    pub lock_slot: Option<usize>,
}

impl Signup {
    /// Create an unlocked, active signup.
    pub fn new(id: u64, category: impl Into<String>) -> Self {
        Self {
            id: SignupId(id),
            category: CategoryTag::new(category),
            is_sponsor: false,
            cancelled_at: None,
            lock_slot: None,
        }
    }

    /// Mark this signup as a sponsor.
    #[must_use]
    pub fn sponsor(mut self) -> Self {
        self.is_sponsor = true;
        self
    }

    /// Lock this signup to a slot.
    #[must_use]
    pub fn locked_to(mut self, slot: usize) -> Self {
        self.lock_slot = Some(slot);
        self
    }

    /// Mark this signup as cancelled at the given timestamp.
    #[must_use]
    pub fn cancel_at(mut self, at_ms: u64) -> Self {
        self.cancelled_at = Some(at_ms);
        self
    }

    /// Cancelled signups are inert for allocation.
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    /// Whether an administrator lock applies.
    pub const fn is_locked(&self) -> bool {
        self.lock_slot.is_some()
    }
}

/// Wire shape of a signup as supplied by the surrounding application.
///
/// Field aliases accept the board client's historical naming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRecord {
    /// External identifier.
    #[serde(alias = "signupId")]
    pub id: u64,
    /// Declared role/specialization.
    #[serde(alias = "characterXinfa")]
    pub category: String,
    /// Claims the sponsor path.
    #[serde(alias = "isRich")]
    pub is_sponsor: bool,
    /// Explicit cancellation flag.
    pub cancelled: bool,
    /// Cancellation timestamp.
    ///
    /// Accepts epoch milliseconds or the board client's ISO-8601 text; `null`
    /// and the empty string mean not cancelled.
    #[serde(
        alias = "cancelTime",
        alias = "cancel_time",
        deserialize_with = "cancel_mark"
    )]
    pub cancelled_at: Option<u64>,
    /// Lock flag.
    #[serde(alias = "isLock")]
    pub locked: bool,
    /// Lock target.
    #[serde(alias = "lockSlot")]
    pub lock_slot_index: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CancelMark {
    Millis(u64),
    Text(String),
}

/// Only presence matters for allocation, so text that is not a plain number
/// still cancels with a zero timestamp.
fn cancel_mark<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CancelMark>::deserialize(deserializer)? {
        None => None,
        Some(CancelMark::Millis(ms)) => Some(ms),
        Some(CancelMark::Text(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.parse().unwrap_or(0))
        }
    })
}

impl TryFrom<SignupRecord> for Signup {
    type Error = AllocationError;

    fn try_from(record: SignupRecord) -> Result<Self, Self::Error> {
        let id = SignupId(record.id);
        let lock_slot = match (record.locked, record.lock_slot_index) {
            (true, None) => return Err(AllocationError::LockWithoutSlot(id)),
            (true, Some(slot)) => Some(slot),
            (false, _) => None,
        };
        // A bare flag without a timestamp still cancels.
        let cancelled_at = record
            .cancelled_at
            .or_else(|| record.cancelled.then_some(0));
        Ok(Self {
            id,
            category: CategoryTag(record.category),
            is_sponsor: record.is_sponsor,
            cancelled_at,
            lock_slot,
        })
    }
}

/// Decode a JSON array of signup records into signups.
pub fn signups_from_json_str(input: &str) -> Result<Vec<Signup>, AllocationError> {
    let records: Vec<SignupRecord> =
        serde_json::from_str(input).map_err(|e| AllocationError::Parse(e.to_string()))?;
    records.into_iter().map(Signup::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_lock_flag_requires_index() {
        let record = SignupRecord {
            id: 7,
            locked: true,
            ..SignupRecord::default()
        };
        assert_eq!(
            Signup::try_from(record),
            Err(AllocationError::LockWithoutSlot(SignupId(7)))
        );
    }

    #[test]
    fn stale_lock_index_without_flag_is_ignored() {
        let record = SignupRecord {
            id: 1,
            lock_slot_index: Some(3),
            ..SignupRecord::default()
        };
        let signup = Signup::try_from(record).unwrap();
        assert!(!signup.is_locked());
    }

    #[test]
    fn cancellation_flag_or_timestamp_cancels() {
        let flagged = Signup::try_from(SignupRecord {
            cancelled: true,
            ..SignupRecord::default()
        })
        .unwrap();
        let stamped = Signup::try_from(SignupRecord {
            cancelled_at: Some(1_700_000_000_000),
            ..SignupRecord::default()
        })
        .unwrap();
        assert!(flagged.is_cancelled());
        assert!(stamped.is_cancelled());
    }

    #[test]
    fn decodes_board_client_aliases() {
        let json = r#"[
            {"signupId": 3, "characterXinfa": "healer", "isRich": true, "isLock": true, "lockSlot": 4},
            {"id": 4, "category": "dps", "cancelTime": 99}
        ]"#;
        let signups = signups_from_json_str(json).unwrap();
        assert_eq!(signups[0].id, SignupId(3));
        assert_eq!(signups[0].category.as_str(), "healer");
        assert!(signups[0].is_sponsor);
        assert_eq!(signups[0].lock_slot, Some(4));
        assert!(signups[1].is_cancelled());
    }

    #[test]
    fn cancel_time_accepts_iso_text_and_blank_values() {
        let json = r#"[
            {"id": 1, "category": "dps", "cancelTime": "2025-01-01T00:00:00Z"},
            {"id": 2, "category": "dps", "cancelTime": ""},
            {"id": 3, "category": "dps", "cancelTime": null},
            {"id": 4, "category": "dps", "cancel_time": "1700000000000"},
            {"id": 5, "category": "dps"}
        ]"#;
        let signups = signups_from_json_str(json).unwrap();
        assert!(signups[0].is_cancelled());
        assert!(!signups[1].is_cancelled());
        assert!(!signups[2].is_cancelled());
        assert_eq!(signups[3].cancelled_at, Some(1_700_000_000_000));
        assert!(!signups[4].is_cancelled());
    }
}
