//! JSON profile loading.
//!
//! The document is an array of profiles:
//!
//! ```json
//! [ { "name": "anna", "motives": ["buy cheap"], "fears": [],
//!     "preferences": ["milk"], "shopping_list": ["milk", "bread"],
//!     "budget_allocation": { "Dairy": 0.7 }, "arrival_time": "09:15" } ]
//! ```
//!
//! Only structure is checked: a profile needs a name and its budget shares
//! must be finite and non-negative.

use std::io::Read;
use std::path::Path;

use crate::{AgentError, AgentProfile, AgentResult};

/// Read profiles from a JSON file.
pub fn load_profiles_json(path: &Path) -> AgentResult<Vec<AgentProfile>> {
    let file = std::fs::File::open(path)?;
    load_profiles_reader(std::io::BufReader::new(file))
}

/// Read profiles from any JSON byte stream.
pub fn load_profiles_reader<R: Read>(reader: R) -> AgentResult<Vec<AgentProfile>> {
    let profiles: Vec<AgentProfile> = serde_json::from_reader(reader)?;
    for (index, profile) in profiles.iter().enumerate() {
        check_profile(index, profile)?;
    }
    Ok(profiles)
}

fn check_profile(index: usize, profile: &AgentProfile) -> AgentResult<()> {
    if profile.name.trim().is_empty() {
        return Err(AgentError::InvalidProfile { index, reason: "empty name".into() });
    }
    for (category, share) in &profile.budget_allocation {
        if !share.is_finite() || *share < 0.0 {
            return Err(AgentError::InvalidProfile {
                index,
                reason: format!("budget share {share} for {category:?} is not a non-negative number"),
            });
        }
    }
    Ok(())
}
