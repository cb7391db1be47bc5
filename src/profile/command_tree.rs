// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The command tree: a nested code lookup table.
//!
//! A device's code table is a tree of string keys whose depth depends on the
//! capabilities the device declares. A branch level corresponds to one
//! dimension (operation mode, preset, fan, swing, temperature) and a leaf is
//! the raw code blob to transmit. The literal key `"-"` is a wildcard: any
//! value at that dimension maps to the single entry underneath it.
//!
//! Key order is preserved as stored in the profile, which makes the
//! closest-match temperature tie-break ("first declared key wins")
//! deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The wildcard key meaning "any value at this dimension".
pub const WILDCARD: &str = "-";

/// One node of a device's command tree.
///
/// # Examples
///
/// ```
/// use irclimate_lib::profile::CommandNode;
///
/// let node: CommandNode = serde_json::from_str(
///     r#"{"cool": {"20": "CODE_COOL_20", "22": "CODE_COOL_22"}}"#,
/// )
/// .unwrap();
///
/// let cool = node.get("cool").unwrap();
/// assert_eq!(cool.get("20").and_then(CommandNode::as_code), Some("CODE_COOL_20"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandNode {
    /// A transmittable code blob.
    Code(String),
    /// A nested lookup level, in declaration order.
    Branch(IndexMap<String, CommandNode>),
}

impl CommandNode {
    /// Returns the code if this node is a leaf.
    #[must_use]
    pub fn as_code(&self) -> Option<&str> {
        match self {
            Self::Code(code) => Some(code),
            Self::Branch(_) => None,
        }
    }

    /// Returns the key map if this node is a branch.
    #[must_use]
    pub fn as_branch(&self) -> Option<&IndexMap<String, CommandNode>> {
        match self {
            Self::Code(_) => None,
            Self::Branch(children) => Some(children),
        }
    }

    /// Looks up a child by key. Returns `None` on a leaf.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CommandNode> {
        self.as_branch().and_then(|children| children.get(key))
    }

    /// Returns `true` if this node is a leaf code.
    #[must_use]
    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

/// Resolves one discrete dimension (preset, fan or swing) of a branch.
///
/// The search is an explicit ordered candidate list, tried one key at a
/// time against the branch:
///
/// 1. the wildcard key `"-"`,
/// 2. the requested value itself,
/// 3. every declared value of the dimension, in profile order, as a
///    best-effort fallback.
///
/// The first candidate present in the branch wins; its key is the resolved
/// dimension value (which may differ from the request when falling back)
/// and its child is the new tree position. Returns `None` when no candidate
/// matches or when `node` is a leaf and cannot be traversed further.
#[must_use]
pub fn resolve_choice<'a>(
    node: &'a CommandNode,
    requested: &str,
    declared: &[String],
) -> Option<(&'a str, &'a CommandNode)> {
    let branch = node.as_branch()?;
    let candidates = [WILDCARD, requested]
        .into_iter()
        .chain(declared.iter().map(String::as_str));
    for key in candidates {
        if let Some((_, stored, child)) = branch.get_full(key) {
            return Some((stored.as_str(), child));
        }
    }
    None
}

/// Finds the temperature key closest to `target` among a branch's keys.
///
/// Keys are interpreted as numeric device-native temperatures; keys that do
/// not parse as numbers are skipped. The entry with the minimum absolute
/// distance to `target` wins, ties going to the first key in stored order.
/// Returns the matched native temperature and its node, or `None` when the
/// branch has no numeric keys.
#[must_use]
pub fn closest_temperature<'a>(
    branch: &'a IndexMap<String, CommandNode>,
    target: f64,
) -> Option<(f64, &'a CommandNode)> {
    let mut best: Option<(f64, &CommandNode)> = None;
    let mut best_distance = f64::INFINITY;
    for (key, child) in branch {
        let Ok(temperature) = key.parse::<f64>() else {
            continue;
        };
        let distance = (temperature - target).abs();
        if distance < best_distance {
            best_distance = distance;
            best = Some((temperature, child));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(json: &str) -> CommandNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_codes_and_branches() {
        let node = branch(r#"{"off": "OFF_CODE", "cool": {"20": "C20"}}"#);
        assert_eq!(node.get("off").and_then(CommandNode::as_code), Some("OFF_CODE"));
        assert!(node.get("cool").unwrap().as_branch().is_some());
        assert!(node.get("heat").is_none());
    }

    #[test]
    fn preserves_key_order() {
        let node = branch(r#"{"b": "1", "a": "2", "c": "3"}"#);
        let keys: Vec<&String> = node.as_branch().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn resolve_choice_prefers_wildcard() {
        let node = branch(r#"{"low": "L", "-": "ANY"}"#);
        let declared = vec!["low".to_string(), "high".to_string()];
        let (key, child) = resolve_choice(&node, "low", &declared).unwrap();
        assert_eq!(key, WILDCARD);
        assert_eq!(child.as_code(), Some("ANY"));
    }

    #[test]
    fn resolve_choice_exact_match() {
        let node = branch(r#"{"low": "L", "high": "H"}"#);
        let declared = vec!["low".to_string(), "high".to_string()];
        let (key, child) = resolve_choice(&node, "high", &declared).unwrap();
        assert_eq!(key, "high");
        assert_eq!(child.as_code(), Some("H"));
    }

    #[test]
    fn resolve_choice_falls_back_in_declared_order() {
        let node = branch(r#"{"high": "H"}"#);
        let declared = vec!["low".to_string(), "mid".to_string(), "high".to_string()];
        // "quiet" is not in the tree; the declared list is scanned in order
        let (key, child) = resolve_choice(&node, "quiet", &declared).unwrap();
        assert_eq!(key, "high");
        assert_eq!(child.as_code(), Some("H"));
    }

    #[test]
    fn resolve_choice_fails_on_no_candidate() {
        let node = branch(r#"{"turbo": "T"}"#);
        let declared = vec!["low".to_string(), "high".to_string()];
        assert!(resolve_choice(&node, "quiet", &declared).is_none());
    }

    #[test]
    fn resolve_choice_fails_on_leaf() {
        let node = CommandNode::Code("RAW".to_string());
        assert!(resolve_choice(&node, "low", &[]).is_none());
    }

    #[test]
    fn closest_temperature_picks_minimum_distance() {
        let node = branch(r#"{"16": "A", "18": "B", "20": "C", "22": "D"}"#);
        let (t, child) = closest_temperature(node.as_branch().unwrap(), 19.4).unwrap();
        assert_eq!(t, 20.0);
        assert_eq!(child.as_code(), Some("C"));
    }

    #[test]
    fn closest_temperature_tie_goes_to_first_stored_key() {
        let node = branch(r#"{"18": "B", "20": "C"}"#);
        let (t, child) = closest_temperature(node.as_branch().unwrap(), 19.0).unwrap();
        assert_eq!(t, 18.0);
        assert_eq!(child.as_code(), Some("B"));

        // Reversed declaration order flips the tie
        let node = branch(r#"{"20": "C", "18": "B"}"#);
        let (t, _) = closest_temperature(node.as_branch().unwrap(), 19.0).unwrap();
        assert_eq!(t, 20.0);
    }

    #[test]
    fn closest_temperature_skips_non_numeric_keys() {
        let node = branch(r#"{"-": "ANY", "21": "X"}"#);
        let (t, child) = closest_temperature(node.as_branch().unwrap(), 30.0).unwrap();
        assert_eq!(t, 21.0);
        assert_eq!(child.as_code(), Some("X"));
    }

    #[test]
    fn closest_temperature_empty_when_no_numeric_keys() {
        let node = branch(r#"{"abc": "X"}"#);
        assert!(closest_temperature(node.as_branch().unwrap(), 20.0).is_none());
    }
}
