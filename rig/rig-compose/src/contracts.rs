//! Contract validation.

use hashbrown::HashSet;
use rig_types::{Contract, Part};

use crate::error::ContractError;

/// Validate that a part satisfies its published contract.
///
/// Checks, in order:
///
/// 1. every `required_anchors` id exists in the part
/// 2. every `required_frame3_sets` name exists in `frame3_sets`
/// 3. every frame3 set lists exactly 3 distinct anchors, all defined by
///    the part
///
/// Sets are checked in sorted name order so the same violation always
/// surfaces first.
///
/// # Errors
///
/// A [`ContractError`] naming the first violated requirement.
pub fn validate_contract(part: &Part, contract: &Contract) -> Result<(), ContractError> {
    let anchor_ids: HashSet<&str> = part.anchors.iter().map(|a| a.id.as_str()).collect();

    for anchor in &contract.required_anchors {
        if !anchor_ids.contains(anchor.as_str()) {
            return Err(ContractError::RequiredAnchorMissing {
                anchor: anchor.clone(),
            });
        }
    }

    for set in &contract.required_frame3_sets {
        if !contract.frame3_sets.contains_key(set) {
            return Err(ContractError::RequiredSetMissing { set: set.clone() });
        }
    }

    let mut set_names: Vec<&String> = contract.frame3_sets.keys().collect();
    set_names.sort_unstable();

    for name in set_names {
        let refs = &contract.frame3_sets[name];
        let distinct: HashSet<&str> = refs.iter().map(String::as_str).collect();
        if refs.len() != 3 || distinct.len() != 3 {
            return Err(ContractError::SetArity {
                set: name.clone(),
                count: distinct.len(),
            });
        }
        for reference in refs {
            if !anchor_ids.contains(reference.as_str()) {
                return Err(ContractError::SetAnchorUnknown {
                    set: name.clone(),
                    anchor: reference.clone(),
                });
            }
        }
    }

    Ok(())
}
