//! Partitioning of scanned elements across destinations.
//!
//! Imports and variables are copied into every destination. Functions and
//! classes are numbered from 1 in scan order and each lands in exactly one
//! destination: the one that claimed its number first, or the default
//! destination (the first label) when nobody claimed it.

use crate::models::{
    AssignmentIssue, DestinationGroup, Element, IssueReason, Selection, SplitWarning,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Parse a raw selection such as `"2, 4, 7"` or `"[2,4]"`.
///
/// Every run of digits is an index; runs too large for `usize` become
/// `usize::MAX` so they are still rejected as out of range. Whitespace/comma
/// separated tokens that contain no digit at all are recorded as ignored.
pub fn parse_selection(raw: &str) -> Selection {
    let indices = DIGIT_RUNS
        .find_iter(raw)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
        .collect();

    let ignored = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim_matches(|c| c == '[' || c == ']'))
        .filter(|t| !t.is_empty() && !t.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect();

    Selection { indices, ignored }
}

/// Result of [`assign`]
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// One group per distinct destination, in destination order
    pub groups: Vec<DestinationGroup>,
    pub issues: Vec<AssignmentIssue>,
    pub warnings: Vec<SplitWarning>,
}

impl Assignment {
    pub fn default_group(&self) -> Option<&DestinationGroup> {
        self.groups.iter().find(|g| g.is_default)
    }

    pub fn group(&self, label: &str) -> Option<&DestinationGroup> {
        self.groups.iter().find(|g| g.label == label)
    }
}

/// Distribute `elements` over `destinations`.
///
/// `destinations[0]` is the default. `selections` maps a destination label to
/// the indices it requests; selections for the default or for unknown labels
/// are ignored.
pub fn assign(
    elements: &[Element],
    destinations: &[String],
    selections: &HashMap<String, Selection>,
) -> Assignment {
    let mut assignment = Assignment::default();

    let mut seen = HashSet::new();
    for (i, label) in destinations.iter().enumerate() {
        if !seen.insert(label.as_str()) {
            warn!(label = %label, "duplicate destination dropped");
            assignment
                .warnings
                .push(SplitWarning::DuplicateDestination { label: label.clone() });
            continue;
        }
        assignment.groups.push(DestinationGroup::new(label.clone(), i == 0));
    }

    let shared: Vec<&Element> = elements.iter().filter(|e| !e.kind.is_movable()).collect();
    let movable: Vec<&Element> = elements.iter().filter(|e| e.kind.is_movable()).collect();

    for group in &mut assignment.groups {
        group.elements.extend(shared.iter().map(|e| (*e).clone()));
    }

    // index -> label of the destination that claimed it
    let mut claimed: HashMap<usize, String> = HashMap::new();

    for group in assignment.groups.iter_mut().filter(|g| !g.is_default) {
        let Some(selection) = selections.get(&group.label) else {
            continue;
        };
        if selection.indices.is_empty() {
            if !selection.ignored.is_empty() {
                warn!(destination = %group.label, "no valid numbers found");
                assignment.issues.push(AssignmentIssue {
                    destination: group.label.clone(),
                    index: None,
                    reason: IssueReason::NoNumbers,
                });
            }
            continue;
        }

        for &index in &selection.indices {
            if index == 0 || index > movable.len() {
                warn!(destination = %group.label, index, "element is out of range");
                assignment.issues.push(AssignmentIssue {
                    destination: group.label.clone(),
                    index: Some(index),
                    reason: IssueReason::OutOfRange { max: movable.len() },
                });
                continue;
            }
            if let Some(owner) = claimed.get(&index) {
                if owner != &group.label {
                    warn!(destination = %group.label, index, owner = %owner, "element already assigned");
                    assignment.issues.push(AssignmentIssue {
                        destination: group.label.clone(),
                        index: Some(index),
                        reason: IssueReason::AlreadyClaimed { by: owner.clone() },
                    });
                }
                continue;
            }
            group.elements.push(movable[index - 1].clone());
            claimed.insert(index, group.label.clone());
            debug!(destination = %group.label, index, "added element");
        }
    }

    if let Some(default) = assignment.groups.iter_mut().find(|g| g.is_default) {
        for (i, element) in movable.iter().enumerate() {
            let index = i + 1;
            if !claimed.contains_key(&index) {
                default.elements.push((*element).clone());
                debug!(destination = %default.label, index, "added element to default");
            }
        }
    }

    assignment
}
