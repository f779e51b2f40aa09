use super::{Error, ErrorKind};
use std::{fmt::Display, path::Path};

pub const RESOURCE_NOT_FOUND: &str = "resource not found";
pub const TOO_MANY_INCLUSIONS: &str = "too many inclusions";
pub const UNSERIALIZABLE_VALUE: &str = "unserializable value";
pub const IO_FAILURE: &str = "io failure";
pub const WRITE_FAILURE: &str = "write failure";

/// Return an [`Error`] describing a resource that the loader could not find.
pub fn error_not_found(path: &str) -> Error {
    Error::build(RESOURCE_NOT_FOUND)
        .with_kind(ErrorKind::ResourceNotFound)
        .with_help(format!("no resource named `{path}` could be loaded"))
}

/// Return an [`Error`] explaining that the inclusion depth limit was exceeded.
///
/// This almost always means that an included resource includes itself,
/// directly or through another resource.
pub fn error_depth(limit: usize) -> Error {
    Error::build(TOO_MANY_INCLUSIONS)
        .with_kind(ErrorKind::TooManyInclusions)
        .with_help(format!(
            "inclusions were nested more than {limit} levels deep, \
            does a resource include itself?"
        ))
}

/// Return an [`Error`] describing a failure to read the resource at the given path.
pub fn error_io<T>(path: &Path, reason: T) -> Error
where
    T: Display,
{
    Error::build(IO_FAILURE)
        .with_kind(ErrorKind::Io)
        .with_help(format!("failed to read `{}`: {reason}", path.display()))
}

/// Return an [`Error`] describing a value that could not be serialized
/// into a `Store`.
pub fn error_serialize<T>(key: &str, reason: T) -> Error
where
    T: Display,
{
    Error::build(UNSERIALIZABLE_VALUE)
        .with_kind(ErrorKind::Serialize)
        .with_help(format!("value for `{key}` could not be serialized: {reason}"))
}

/// Return an [`Error`] explaining that the write operation failed.
pub fn error_write<T>(reason: T) -> Error
where
    T: Display,
{
    Error::build(WRITE_FAILURE)
        .with_kind(ErrorKind::Write)
        .with_help(format!("failed to write compiled output: {reason}"))
}
