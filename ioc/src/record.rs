//! Injection markers and the field accessor used by the lifecycle.

use crate::component::Value;
use crate::descriptor::TypeKey;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// How a marked field finds its dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  /// The single element compatible with the field's declared type.
  ByType(TypeKey),
  /// The single element registered under this exact name.
  ByName(String),
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Target::ByType(key) => write!(f, "by type: {}", key),
      Target::ByName(name) => write!(f, "by name: {}", name),
    }
  }
}

/// Injection marker attached to one field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
  field: &'static str,
  target: Target,
}

impl Marker {
  /// Builds a marker from its tag. A blank tag resolves by `requested` type,
  /// anything else by the trimmed name.
  pub fn new(field: &'static str, tag: &str, requested: TypeKey) -> Self {
    let tag = tag.trim();
    let target = if tag.is_empty() {
      Target::ByType(requested)
    } else {
      Target::ByName(tag.to_owned())
    };
    Self { field, target }
  }

  pub fn field(&self) -> &'static str {
    self.field
  }

  pub fn target(&self) -> &Target {
    &self.target
  }
}

/// The marker table of a record type, built once per type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
  markers: Vec<Marker>,
}

impl Schema {
  pub fn new(markers: Vec<Marker>) -> Self {
    Self { markers }
  }

  pub fn markers(&self) -> &[Marker] {
    &self.markers
  }

  pub fn marker(&self, field: &str) -> Option<&Marker> {
    self.markers.iter().find(|marker| marker.field == field)
  }
}

/// Failure reported by a [`Record`] accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
  #[error("attribute '{field}' is not found on {record}")]
  FieldNotFound { record: &'static str, field: String },

  #[error("attribute '{field}' of {record} cannot be set (read only or not visible)")]
  NotWritable { record: &'static str, field: String },

  #[error("attribute '{field}' of {record} cannot be read")]
  Unreadable { record: &'static str, field: String },

  #[error("attribute '{field}' of {record}: value type '{found}' can not be assigned to '{expected}'")]
  TypeMismatch {
    record: &'static str,
    field: String,
    expected: &'static str,
    found: &'static str,
  },
}

/// A record whose fields the context can read and write by name.
///
/// All field access from the lifecycle goes through this trait.
pub trait Record {
  fn schema(&self) -> &Schema;

  /// Returns the boxed `Rc<T>` currently held by `field`, if any.
  fn get_attribute(&self, field: &str) -> Result<Option<Box<dyn Any>>, AccessError>;

  /// Assigns `value` to `field`; `None` clears it.
  fn set_attribute(&self, field: &str, value: Option<&Value>) -> Result<(), AccessError>;
}

/// A type mismatch detected by an [`Attribute`], before it is tied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
  pub expected: &'static str,
  pub found: &'static str,
}

impl Mismatch {
  pub fn at(self, record: &'static str, field: &str) -> AccessError {
    AccessError::TypeMismatch {
      record,
      field: field.to_owned(),
      expected: self.expected,
      found: self.found,
    }
  }
}

/// A field type the context can inject into.
pub trait Attribute {
  /// The type resolved for this field when its marker carries no name.
  fn requested() -> TypeKey
  where
    Self: Sized;

  fn read(&self) -> Option<Box<dyn Any>>;

  fn assign(&self, value: Option<&Value>) -> Result<(), Mismatch>;
}

/// An injection slot for a shared `T`.
///
/// Slots use interior mutability so the context can fill them through a
/// shared reference to the owning record.
pub struct Inject<T: ?Sized> {
  slot: RefCell<Option<Rc<T>>>,
}

impl<T: ?Sized> Inject<T> {
  pub fn new() -> Self {
    Self {
      slot: RefCell::new(None),
    }
  }

  pub fn get(&self) -> Option<Rc<T>> {
    self.slot.borrow().clone()
  }

  pub fn is_set(&self) -> bool {
    self.slot.borrow().is_some()
  }
}

impl<T: ?Sized> Default for Inject<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = if self.is_set() { "set" } else { "empty" };
    write!(f, "Inject({}: {})", std::any::type_name::<T>(), state)
  }
}

impl<T: ?Sized + Any> Attribute for Inject<T> {
  fn requested() -> TypeKey {
    TypeKey::of::<T>()
  }

  fn read(&self) -> Option<Box<dyn Any>> {
    self.get().map(|shared| Box::new(shared) as Box<dyn Any>)
  }

  fn assign(&self, value: Option<&Value>) -> Result<(), Mismatch> {
    let shared = match value {
      None => None,
      Some(value) => Some(value.downcast::<T>().ok_or(Mismatch {
        expected: std::any::type_name::<T>(),
        found: value.type_name(),
      })?),
    };
    *self.slot.borrow_mut() = shared;
    Ok(())
  }
}

/// Resolves the [`Attribute::requested`] key of a field from an accessor
/// closure, so macro-generated schemas never have to spell out field types.
#[doc(hidden)]
pub fn field_key<S, A, F>(_accessor: F) -> TypeKey
where
  A: Attribute,
  F: Fn(&S) -> &A,
{
  A::requested()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_tags_resolve_by_type() {
    let marker = Marker::new("store", "  ", TypeKey::of::<String>());
    assert_eq!(marker.target(), &Target::ByType(TypeKey::of::<String>()));

    let marker = Marker::new("store", " primary ", TypeKey::of::<String>());
    assert_eq!(marker.target(), &Target::ByName("primary".to_string()));
  }

  #[test]
  fn slot_assign_and_clear() {
    let slot: Inject<i32> = Inject::new();
    let value = Value::new(7_i32);
    slot.assign(Some(&value)).expect("assign");
    assert_eq!(slot.get().as_deref(), Some(&7));

    slot.assign(None).expect("clear");
    assert!(!slot.is_set());
  }

  #[test]
  fn slot_rejects_foreign_types() {
    let slot: Inject<i32> = Inject::new();
    let value = Value::new(String::from("seven"));
    let mismatch = slot.assign(Some(&value)).unwrap_err();
    assert_eq!(mismatch.expected, "i32");
    assert_eq!(mismatch.found, "alloc::string::String");
    assert!(!slot.is_set());
  }
}
