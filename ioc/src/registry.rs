//! Insertion-ordered storage of elements.

use crate::component::Value;
use crate::element::{Element, ElementId, ElementInfo};
use crate::error::{Error, Result};
use std::any::TypeId;
use tracing::trace;

#[derive(Default)]
pub(crate) struct Registry {
  elements: Vec<Element>,
}

impl Registry {
  /// Registers `value` under `name`.
  ///
  /// Rejects an absent value, and a name already taken by an element whose
  /// type is compatible with the new value's type.
  pub(crate) fn insert(&mut self, name: String, value: Option<Value>) -> Result<ElementId> {
    let value = value.ok_or_else(|| Error::NilElement { name: name.clone() })?;
    let requested = value.descriptor().key().id();
    if let Some(existing) = self.elements_by_name_and_type(&name, requested).first() {
      return Err(Error::DuplicateRegistration {
        name,
        existing: self.get(*existing).info(),
      });
    }

    let id = ElementId(self.elements.len());
    trace!(name = %name, type_name = value.type_name(), "registering element");
    self.elements.push(Element::new(name, value));
    Ok(id)
  }

  pub(crate) fn get(&self, id: ElementId) -> &Element {
    &self.elements[id.0]
  }

  pub(crate) fn get_mut(&mut self, id: ElementId) -> &mut Element {
    &mut self.elements[id.0]
  }

  pub(crate) fn len(&self) -> usize {
    self.elements.len()
  }

  pub(crate) fn info(&self, id: ElementId) -> ElementInfo {
    self.get(id).info()
  }

  pub(crate) fn infos(&self) -> Vec<ElementInfo> {
    self.elements.iter().map(Element::info).collect()
  }

  pub(crate) fn elements_by_name(&self, name: &str) -> Vec<ElementId> {
    self.scan(|element| element.name == name)
  }

  pub(crate) fn elements_by_type(&self, requested: TypeId) -> Vec<ElementId> {
    self.scan(|element| element.value.descriptor().is_compatible_with(requested))
  }

  pub(crate) fn elements_by_name_and_type(&self, name: &str, requested: TypeId) -> Vec<ElementId> {
    self
      .elements_by_name(name)
      .into_iter()
      .filter(|id| {
        self
          .get(*id)
          .value
          .descriptor()
          .is_compatible_with(requested)
      })
      .collect()
  }

  fn scan(&self, mut matches: impl FnMut(&Element) -> bool) -> Vec<ElementId> {
    self
      .elements
      .iter()
      .enumerate()
      .filter(|(_, element)| matches(element))
      .map(|(index, _)| ElementId(index))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorKind;
  use std::rc::Rc;

  #[test]
  fn same_name_different_type_is_allowed() {
    let mut registry = Registry::default();
    registry
      .insert("value".into(), Some(Value::new(1_i32)))
      .expect("first");
    registry
      .insert("value".into(), Some(Value::new(1_u64)))
      .expect("second");
    assert_eq!(registry.elements_by_name("value").len(), 2);
  }

  #[test]
  fn duplicate_name_and_type_is_rejected() {
    let mut registry = Registry::default();
    registry
      .insert("value".into(), Some(Value::new(1_i32)))
      .expect("first");
    let err = registry
      .insert("value".into(), Some(Value::new(2_i32)))
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn stored_pointer_collides_with_later_pointee_but_not_reverse() {
    let mut registry = Registry::default();
    registry
      .insert("shared".into(), Some(Value::new(Rc::new(5_i32))))
      .expect("pointer");
    let err = registry
      .insert("shared".into(), Some(Value::new(5_i32)))
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);

    let mut registry = Registry::default();
    registry
      .insert("plain".into(), Some(Value::new(5_i32)))
      .expect("plain");
    registry
      .insert("plain".into(), Some(Value::new(Rc::new(5_i32))))
      .expect("pointer after plain");
  }

  #[test]
  fn absent_values_are_rejected() {
    let mut registry = Registry::default();
    let err = registry.insert("nothing".into(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NilElement);
  }

  #[test]
  fn type_scan_keeps_registration_order() {
    let mut registry = Registry::default();
    registry.insert("b".into(), Some(Value::new(2_i32))).unwrap();
    registry.insert("s".into(), Some(Value::new("x"))).unwrap();
    registry.insert("a".into(), Some(Value::new(1_i32))).unwrap();
    let found = registry.elements_by_type(TypeId::of::<i32>());
    assert_eq!(found, vec![ElementId(0), ElementId(2)]);
  }
}
