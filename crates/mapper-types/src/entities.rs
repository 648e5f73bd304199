//! # Mapper Entities
//!
//! Shapes of the data the object mapper returns.
//!
//! ## Clusters
//!
//! - **Objects**: `ServiceMap`, `SubtreeEntry`
//! - **Associations**: `EndpointSet`
//! - **Queries**: `QueryDepth`

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::names::{InterfaceName, ServiceName};
use crate::path::ObjectPath;

/// Services hosting one object, and the interfaces each implements there.
pub type ServiceMap = BTreeMap<ServiceName, Vec<InterfaceName>>;

/// One object of a subtree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtreeEntry {
    /// Path of the object.
    pub path: ObjectPath,
    /// Services implementing the object.
    pub services: ServiceMap,
}

impl SubtreeEntry {
    pub fn new(path: ObjectPath, services: ServiceMap) -> Self {
        Self { path, services }
    }

    /// All interfaces across every hosting service.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceName> {
        self.services.values().flatten()
    }
}

/// Deduplicated set of paths named by an association's `endpoints`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointSet(BTreeSet<ObjectPath>);

impl EndpointSet {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn contains(&self, path: &ObjectPath) -> bool {
        self.0.contains(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate endpoints in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectPath> {
        self.0.iter()
    }

    pub fn insert(&mut self, path: ObjectPath) -> bool {
        self.0.insert(path)
    }
}

impl FromIterator<ObjectPath> for EndpointSet {
    fn from_iter<T: IntoIterator<Item = ObjectPath>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EndpointSet {
    type Item = ObjectPath;
    type IntoIter = std::collections::btree_set::IntoIter<ObjectPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// How far below the root a subtree query descends.
///
/// `0` means unlimited; `N > 0` limits the listing to objects at most `N`
/// segment levels below the root. The convention belongs to the mapper and
/// is passed through unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDepth(u32);

impl QueryDepth {
    /// No depth limit.
    pub const UNLIMITED: Self = Self(0);

    #[must_use]
    pub const fn levels(levels: u32) -> Self {
        Self(levels)
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.0 == 0
    }

    /// The level limit, or `None` when unlimited.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        if self.is_unlimited() {
            None
        } else {
            Some(self.0)
        }
    }

    /// True when an object `levels` below the root is within range.
    #[must_use]
    pub fn admits(&self, levels: usize) -> bool {
        match self.limit() {
            None => true,
            Some(limit) => levels <= limit as usize,
        }
    }

    /// Value sent as the `int32` depth argument.
    #[must_use]
    pub fn to_wire(&self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Interpret a received `int32` depth; negatives mean unlimited.
    #[must_use]
    pub fn from_wire(depth: i32) -> Self {
        Self(u32::try_from(depth).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ObjectPath {
        ObjectPath::new(s).unwrap()
    }

    #[test]
    fn test_endpoint_set_deduplicates() {
        let set: EndpointSet = vec![path("/inv/b"), path("/inv/a"), path("/inv/b")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        let ordered: Vec<&str> = set.iter().map(ObjectPath::as_str).collect();
        assert_eq!(ordered, vec!["/inv/a", "/inv/b"]);
    }

    #[test]
    fn test_query_depth_convention() {
        assert!(QueryDepth::UNLIMITED.is_unlimited());
        assert_eq!(QueryDepth::UNLIMITED.limit(), None);
        assert!(QueryDepth::UNLIMITED.admits(1_000));

        let two = QueryDepth::levels(2);
        assert_eq!(two.limit(), Some(2));
        assert!(two.admits(1));
        assert!(two.admits(2));
        assert!(!two.admits(3));
    }

    #[test]
    fn test_query_depth_wire_values() {
        assert_eq!(QueryDepth::levels(0).to_wire(), 0);
        assert_eq!(QueryDepth::levels(5).to_wire(), 5);
        assert_eq!(QueryDepth::levels(u32::MAX).to_wire(), i32::MAX);
        assert_eq!(QueryDepth::from_wire(3), QueryDepth::levels(3));
        assert_eq!(QueryDepth::from_wire(-1), QueryDepth::UNLIMITED);
    }

    #[test]
    fn test_subtree_entry_interfaces() {
        let mut services = ServiceMap::new();
        services.insert(
            ServiceName::from("xyz.openbmc_project.Inventory.Manager"),
            vec![InterfaceName::from("xyz.openbmc_project.Inventory.Item")],
        );
        services.insert(
            ServiceName::from("xyz.openbmc_project.FanSensor"),
            vec![InterfaceName::from("xyz.openbmc_project.Sensor.Value")],
        );
        let entry = SubtreeEntry::new(path("/inv/fan0"), services);
        assert_eq!(entry.interfaces().count(), 2);
    }
}
