//! # Bus Names
//!
//! Opaque service and interface names, and the interface filter used to
//! narrow mapper queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the process hosting one or more objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

/// Name of a capability exposed by an object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceName(String);

macro_rules! opaque_name {
    ($name:ident) => {
        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_name!(ServiceName);
opaque_name!(InterfaceName);

/// Ordered list of interfaces a query is restricted to.
///
/// An empty filter places no restriction, per bus convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceFilter(Vec<InterfaceName>);

impl InterfaceFilter {
    /// A filter that matches every object.
    #[must_use]
    pub fn any() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, N>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<InterfaceName>,
    {
        Self(interfaces.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceName> {
        self.0.iter()
    }

    /// True when an object implementing `interfaces` passes the filter.
    ///
    /// An empty filter passes everything; otherwise at least one filter
    /// entry must be implemented.
    pub fn matches<'a, I>(&self, interfaces: I) -> bool
    where
        I: IntoIterator<Item = &'a InterfaceName>,
    {
        if self.0.is_empty() {
            return true;
        }
        interfaces
            .into_iter()
            .any(|interface| self.0.contains(interface))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<InterfaceName> {
        self.0
    }
}

impl<N: Into<InterfaceName>> FromIterator<N> for InterfaceFilter {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self::new(iter)
    }
}
