//! Published part contracts.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A part's published interface guarantee.
///
/// A contract travels next to a part definition and declares which anchors
/// and named anchor triples consumers may rely on. Composition validates an
/// imported part against its contract before trusting any named reference
/// into it; a part that drifts out of sync with its own contract fails
/// composition instead of silently mis-attaching.
///
/// # Example
///
/// ```
/// use rig_types::Contract;
///
/// let mut contract = Contract::new("0.1");
/// contract.required_anchors.push("hub_center".to_string());
/// contract.frame3_sets.insert(
///     "mounts.axle".to_string(),
///     vec!["hub_center".into(), "hub_rim".into(), "hub_top".into()],
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contract {
    /// Contract schema version.
    pub contract_version: String,

    /// Anchor ids the part promises to define.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_anchors: Vec<String>,

    /// Names that must appear in `frame3_sets`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_frame3_sets: Vec<String>,

    /// Named anchor triples, keyed by set name (conventionally
    /// `slots.<name>` / `mounts.<name>`, bare names also allowed).
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame3_sets: HashMap<String, Vec<String>>,
}

impl Contract {
    /// Create an empty contract.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            contract_version: version.into(),
            required_anchors: Vec::new(),
            required_frame3_sets: Vec::new(),
            frame3_sets: HashMap::new(),
        }
    }

    /// Look up a named triple, trying `"{role}s.{name}"` first and the bare
    /// name second.
    #[must_use]
    pub fn frame3_set(&self, role: &str, name: &str) -> Option<&[String]> {
        let qualified = format!("{role}s.{name}");
        self.frame3_sets
            .get(&qualified)
            .or_else(|| self.frame3_sets.get(name))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame3_set_lookup_prefers_qualified() {
        let mut contract = Contract::new("0.1");
        contract
            .frame3_sets
            .insert("slots.top".to_string(), vec!["a".into(), "b".into(), "c".into()]);
        contract
            .frame3_sets
            .insert("top".to_string(), vec!["x".into(), "y".into(), "z".into()]);

        let set = contract.frame3_set("slot", "top");
        assert_eq!(set, Some(&["a".to_string(), "b".into(), "c".into()][..]));
    }

    #[test]
    fn test_frame3_set_falls_back_to_bare_name() {
        let mut contract = Contract::new("0.1");
        contract
            .frame3_sets
            .insert("top".to_string(), vec!["x".into(), "y".into(), "z".into()]);

        assert!(contract.frame3_set("slot", "top").is_some());
        assert!(contract.frame3_set("slot", "missing").is_none());
    }
}
