//! Error types for `fibre_inject`.

use crate::component::HookError;
use crate::element::ElementInfo;
use crate::record::{AccessError, Target};
use crate::resolver::Query;
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// The elements matched by an ambiguous query, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates(pub Vec<ElementInfo>);

impl Deref for Candidates {
  type Target = [ElementInfo];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl fmt::Display for Candidates {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, candidate) in self.0.iter().enumerate() {
      if index > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{}", candidate)?;
    }
    Ok(())
  }
}

/// The main error type for `fibre_inject`.
#[derive(Debug, Error)]
pub enum Error {
  #[error("context does not support an absent element (name: '{name}')")]
  NilElement { name: String },

  #[error("cannot add '{name}' element, another element exists with same name and type: {existing}")]
  DuplicateRegistration { name: String, existing: ElementInfo },

  #[error("failed to initialize {element}, potential dependency loop")]
  DependencyCycle { element: ElementInfo },

  #[error("missing '{field}' dependency ({target}) of {element}")]
  MissingDependency {
    element: ElementInfo,
    field: &'static str,
    target: Target,
  },

  #[error("too many elements for {query}: {candidates}")]
  AmbiguousDependency { query: Query, candidates: Candidates },

  #[error("failed to set '{field}' dependency of {element}: {source}")]
  FieldAssignment {
    element: ElementInfo,
    field: &'static str,
    #[source]
    source: AccessError,
  },

  #[error("failed to initialize {element} after dependencies injection: {source}")]
  Hook {
    element: ElementInfo,
    #[source]
    source: HookError,
  },

  #[error("cannot find element with {query}")]
  LookupNotFound { query: Query },

  #[error("failed to initialize '{field}' dependency of {element}: {source}")]
  Dependency {
    element: ElementInfo,
    field: &'static str,
    #[source]
    source: Box<Error>,
  },

  #[error("failed to start context, error during '{name}' element initialization: {source}")]
  Start {
    name: String,
    #[source]
    source: Box<Error>,
  },

  #[error("cannot return '{name}' element, failed to initialize: {source}")]
  Lookup {
    name: String,
    #[source]
    source: Box<Error>,
  },

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

/// Classification of an [`Error`] by its root cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  NilElement,
  DuplicateRegistration,
  DependencyCycle,
  MissingDependency,
  AmbiguousDependency,
  FieldAssignment,
  Hook,
  LookupNotFound,
  Config,
}

impl Error {
  /// The innermost error, looking through context wrappers.
  pub fn root_cause(&self) -> &Error {
    match self {
      Error::Dependency { source, .. } | Error::Start { source, .. } | Error::Lookup { source, .. } => {
        source.root_cause()
      }
      other => other,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::Dependency { source, .. } | Error::Start { source, .. } | Error::Lookup { source, .. } => {
        source.kind()
      }
      Error::NilElement { .. } => ErrorKind::NilElement,
      Error::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
      Error::DependencyCycle { .. } => ErrorKind::DependencyCycle,
      Error::MissingDependency { .. } => ErrorKind::MissingDependency,
      Error::AmbiguousDependency { .. } => ErrorKind::AmbiguousDependency,
      Error::FieldAssignment { .. } => ErrorKind::FieldAssignment,
      Error::Hook { .. } => ErrorKind::Hook,
      Error::LookupNotFound { .. } => ErrorKind::LookupNotFound,
      Error::ConfigRead(_) | Error::ConfigParse(_) => ErrorKind::Config,
    }
  }
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
