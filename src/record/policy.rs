use serde::{Deserialize, Serialize};

/// The patient's current insurance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(rename = "insuranceName")]
    pub name: String,
    #[serde(rename = "expDate")]
    pub expiration_date: u64,
    #[serde(rename = "policyID")]
    pub policy_id: String,
}

impl Policy {
    pub fn new(name: impl Into<String>, expiration_date: u64, policy_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expiration_date,
            policy_id: policy_id.into(),
        }
    }

    /// Same policy id and same expiration date.
    pub fn same_coverage(&self, other: &Policy) -> bool {
        self.policy_id == other.policy_id && self.expiration_date == other.expiration_date
    }
}
