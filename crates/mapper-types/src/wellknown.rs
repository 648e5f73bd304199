//! # Well-Known Bus Names
//!
//! Bit-exact identities of the object-mapper service and the members it
//! exposes. These are owned by the external mapper and must not change.

/// Bus name of the object-mapper service.
pub const MAPPER_SERVICE: &str = "xyz.openbmc_project.ObjectMapper";

/// Object path the mapper's query methods live on.
pub const MAPPER_PATH: &str = "/xyz/openbmc_project/object_mapper";

/// Interface carrying the mapper's query methods.
pub const MAPPER_INTERFACE: &str = "xyz.openbmc_project.ObjectMapper";

/// `GetObject(s path, as interfaces) -> a{sas}`
pub const GET_OBJECT: &str = "GetObject";

/// `GetSubTree(s path, i depth, as interfaces) -> a{sa{sas}}`
pub const GET_SUBTREE: &str = "GetSubTree";

/// `GetSubTreePaths(s path, i depth, as interfaces) -> as`
pub const GET_SUBTREE_PATHS: &str = "GetSubTreePaths";

/// Interface of association objects hosted by the mapper.
pub const ASSOCIATION_INTERFACE: &str = "xyz.openbmc_project.Association";

/// Property listing the paths an association points at.
pub const ENDPOINTS_PROPERTY: &str = "endpoints";

/// Standard properties interface.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// `Get(s interface, s property) -> v`
pub const PROPERTIES_GET: &str = "Get";

/// Remote error names that mean "the target does not exist".
pub const NOT_FOUND_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.UnknownObject",
    "org.freedesktop.DBus.Error.UnknownInterface",
    "org.freedesktop.DBus.Error.UnknownProperty",
    "org.freedesktop.DBus.Error.UnknownMethod",
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.FileNotFound",
    "xyz.openbmc_project.Common.Error.ResourceNotFound",
];

/// Error name the bus daemon uses when no process owns the destination.
pub const SERVICE_UNKNOWN_ERROR: &str = "org.freedesktop.DBus.Error.ServiceUnknown";

/// Error name used when a method call carries arguments of the wrong shape.
pub const INVALID_ARGS_ERROR: &str = "org.freedesktop.DBus.Error.InvalidArgs";

/// Error name the mapper uses when a queried path is unknown.
pub const RESOURCE_NOT_FOUND_ERROR: &str = "xyz.openbmc_project.Common.Error.ResourceNotFound";
