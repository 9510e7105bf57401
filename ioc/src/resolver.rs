//! Finds the unique element matching a name, a type, or both.

use crate::descriptor::TypeKey;
use crate::element::ElementId;
use crate::error::{Candidates, Error, Result};
use crate::registry::Registry;
use std::fmt;

/// What a lookup asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
  Type(TypeKey),
  Name(String),
  NameAndType(String, TypeKey),
}

impl fmt::Display for Query {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Query::Type(key) => write!(f, "'{}' type", key),
      Query::Name(name) => write!(f, "'{}' name", name),
      Query::NameAndType(name, key) => write!(f, "'{}' name and '{}' type", name, key),
    }
  }
}

/// Returns the single element matching `query`, `None` when nothing
/// matches, and an ambiguity error naming every candidate otherwise.
pub(crate) fn resolve(registry: &Registry, query: &Query) -> Result<Option<ElementId>> {
  let found = match query {
    Query::Type(key) => registry.elements_by_type(key.id()),
    Query::Name(name) => registry.elements_by_name(name),
    Query::NameAndType(name, key) => registry.elements_by_name_and_type(name, key.id()),
  };
  match found.as_slice() {
    [] => Ok(None),
    [single] => Ok(Some(*single)),
    many => Err(Error::AmbiguousDependency {
      query: query.clone(),
      candidates: Candidates(many.iter().map(|id| registry.info(*id)).collect()),
    }),
  }
}
