//! Merge step of the association pipeline
//!
//! Pure functions: keep the subtree results whose path is an endpoint, then
//! order them by path without duplicates.

use mapper_types::{EndpointSet, ObjectPath, SubtreeEntry};

/// Subtree paths that are also endpoints, ascending and deduplicated.
///
/// Membership is tested against the set, so the cost is linear in the
/// subtree size rather than the product of both sizes.
#[must_use]
pub fn intersect_paths(subtree: Vec<ObjectPath>, endpoints: &EndpointSet) -> Vec<ObjectPath> {
    let mut matched: Vec<ObjectPath> = subtree
        .into_iter()
        .filter(|path| endpoints.contains(path))
        .collect();
    matched.sort_unstable();
    matched.dedup();
    matched
}

/// Subtree entries whose path is an endpoint, ordered by path.
///
/// When the listing repeats a path the first entry is kept.
#[must_use]
pub fn intersect_entries(subtree: Vec<SubtreeEntry>, endpoints: &EndpointSet) -> Vec<SubtreeEntry> {
    let mut matched: Vec<SubtreeEntry> = subtree
        .into_iter()
        .filter(|entry| endpoints.contains(&entry.path))
        .collect();
    // stable, so the first of equal paths stays first
    matched.sort_by(|a, b| a.path.cmp(&b.path));
    matched.dedup_by(|later, earlier| later.path == earlier.path);
    matched
}
