//! Registered elements and their lifecycle status.

use crate::component::Value;
use std::fmt;

/// Lifecycle state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
  Uninitialized,
  /// Dependencies are being injected; seeing this again means a cycle.
  InProgress,
  Initialized,
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Status::Uninitialized => "Uninitialized",
      Status::InProgress => "InProgress",
      Status::Initialized => "Initialized",
    };
    f.write_str(label)
  }
}

/// Index of an element in its registry. Elements are never removed, so ids
/// stay valid for the lifetime of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ElementId(pub(crate) usize);

pub(crate) struct Element {
  pub(crate) name: String,
  pub(crate) status: Status,
  pub(crate) value: Value,
}

impl Element {
  pub(crate) fn new(name: String, value: Value) -> Self {
    Self {
      name,
      status: Status::Uninitialized,
      value,
    }
  }

  pub(crate) fn info(&self) -> ElementInfo {
    ElementInfo {
      type_name: self.value.type_name(),
      name: self.name.clone(),
      status: self.status,
    }
  }
}

/// A snapshot of an element, used in diagnostics and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
  pub type_name: &'static str,
  pub name: String,
  pub status: Status,
}

impl fmt::Display for ElementInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[type={}, name='{}', status={}]",
      self.type_name, self.name, self.status
    )
  }
}
