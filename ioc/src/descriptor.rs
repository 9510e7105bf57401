//! Type identity and compatibility queries for registered values.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

/// The identity of a Rust type paired with its readable name.
///
/// Works for unsized types as well, so `TypeKey::of::<dyn Greeter>()` names a
/// capability that components may declare.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

// Turns a type-erased stored value into a boxed `Rc<Requested>`.
type View = Box<dyn Fn(Rc<dyn Any>) -> Option<Box<dyn Any>>>;

struct Capability {
  key: TypeKey,
  cast: View,
}

struct Pointee {
  descriptor: Box<TypeDescriptor>,
  deref: fn(&dyn Any) -> Option<Rc<dyn Any>>,
}

/// Describes the stored type of a registered value.
///
/// Besides the type's own identity, a descriptor knows which capabilities
/// (trait objects) the type can be viewed as, and for shared pointers
/// (`Rc<U>`) the descriptor of the pointee.
pub struct TypeDescriptor {
  key: TypeKey,
  exact: fn(Rc<dyn Any>) -> Option<Box<dyn Any>>,
  capabilities: Vec<Capability>,
  pointee: Option<Pointee>,
}

fn share<T: Any>(value: Rc<dyn Any>) -> Option<Box<dyn Any>> {
  value
    .downcast::<T>()
    .ok()
    .map(|shared| Box::new(shared) as Box<dyn Any>)
}

fn deref_shared<U: Any>(value: &dyn Any) -> Option<Rc<dyn Any>> {
  value
    .downcast_ref::<Rc<U>>()
    .map(|inner| Rc::clone(inner) as Rc<dyn Any>)
}

impl TypeDescriptor {
  /// A descriptor with no capabilities and no pointee.
  pub fn of<T: Any>() -> Self {
    Describe::<T>::new().build()
  }

  pub fn key(&self) -> TypeKey {
    self.key
  }

  pub fn name(&self) -> &'static str {
    self.key.name
  }

  /// Keys of every capability this type declares, in declaration order.
  pub fn capabilities(&self) -> impl Iterator<Item = TypeKey> + '_ {
    self.capabilities.iter().map(|capability| capability.key)
  }

  pub fn pointee(&self) -> Option<&TypeDescriptor> {
    self.pointee.as_ref().map(|pointee| pointee.descriptor.as_ref())
  }

  /// Exact identity, or a declared capability.
  pub fn is_assignable_to(&self, requested: TypeId) -> bool {
    self.key.id == requested
      || self
        .capabilities
        .iter()
        .any(|capability| capability.key.id == requested)
  }

  /// Assignable, or a pointer whose pointee is assignable.
  ///
  /// Only one level of indirection is unwrapped, and only on the stored
  /// side: a stored `Rc<U>` satisfies a request for `U`, a stored `U` never
  /// satisfies a request for `Rc<U>`.
  pub fn is_compatible_with(&self, requested: TypeId) -> bool {
    self.is_assignable_to(requested)
      || self
        .pointee()
        .is_some_and(|pointee| pointee.is_assignable_to(requested))
  }

  /// Produces a boxed `Rc<Requested>` from `value`, which must hold the type
  /// this descriptor describes.
  pub(crate) fn view(&self, value: &Rc<dyn Any>, requested: TypeId) -> Option<Box<dyn Any>> {
    if let Some(view) = self.view_assignable(value, requested) {
      return Some(view);
    }
    let pointee = self.pointee.as_ref()?;
    let inner = (pointee.deref)(&**value)?;
    pointee.descriptor.view_assignable(&inner, requested)
  }

  fn view_assignable(&self, value: &Rc<dyn Any>, requested: TypeId) -> Option<Box<dyn Any>> {
    if self.key.id == requested {
      return (self.exact)(Rc::clone(value));
    }
    self
      .capabilities
      .iter()
      .find(|capability| capability.key.id == requested)
      .and_then(|capability| (capability.cast)(Rc::clone(value)))
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("type", &self.key.name)
      .field(
        "capabilities",
        &self.capabilities().map(|key| key.name).collect::<Vec<_>>(),
      )
      .field("pointee", &self.pointee().map(TypeDescriptor::name))
      .finish()
  }
}

/// Builder for the [`TypeDescriptor`] of `T`.
///
/// ```
/// use fibre_inject::{Describe, TypeDescriptor};
/// use std::rc::Rc;
///
/// trait Greeter {
///   fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// let descriptor: TypeDescriptor = Describe::<English>::new()
///   .implements::<dyn Greeter>(|english: Rc<English>| -> Rc<dyn Greeter> { english })
///   .build();
/// assert!(descriptor.is_assignable_to(std::any::TypeId::of::<dyn Greeter>()));
/// ```
pub struct Describe<T> {
  descriptor: TypeDescriptor,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any> Describe<T> {
  pub fn new() -> Self {
    Self {
      descriptor: TypeDescriptor {
        key: TypeKey::of::<T>(),
        exact: share::<T>,
        capabilities: Vec::new(),
        pointee: None,
      },
      _marker: PhantomData,
    }
  }

  /// Declares that `T` can be injected wherever `I` is requested.
  pub fn implements<I: ?Sized + Any>(mut self, upcast: fn(Rc<T>) -> Rc<I>) -> Self {
    let cast: View = Box::new(move |value: Rc<dyn Any>| {
      value
        .downcast::<T>()
        .ok()
        .map(|shared| Box::new(upcast(shared)) as Box<dyn Any>)
    });
    self.descriptor.capabilities.push(Capability {
      key: TypeKey::of::<I>(),
      cast,
    });
    self
  }

  pub fn build(self) -> TypeDescriptor {
    self.descriptor
  }
}

impl<T: Any> Default for Describe<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<U: Any> Describe<Rc<U>> {
  /// Attaches the descriptor of the pointed-to `U`.
  pub fn pointee(mut self, descriptor: TypeDescriptor) -> Self {
    self.descriptor.pointee = Some(Pointee {
      descriptor: Box::new(descriptor),
      deref: deref_shared::<U>,
    });
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Shape {
    fn sides(&self) -> u32;
  }

  struct Square;

  impl Shape for Square {
    fn sides(&self) -> u32 {
      4
    }
  }

  fn square_descriptor() -> TypeDescriptor {
    Describe::<Square>::new()
      .implements::<dyn Shape>(|square: Rc<Square>| -> Rc<dyn Shape> { square })
      .build()
  }

  #[test]
  fn exact_and_capability_are_assignable() {
    let descriptor = square_descriptor();
    assert!(descriptor.is_assignable_to(TypeId::of::<Square>()));
    assert!(descriptor.is_assignable_to(TypeId::of::<dyn Shape>()));
    assert!(!descriptor.is_assignable_to(TypeId::of::<u32>()));
  }

  #[test]
  fn capability_view_yields_trait_object() {
    let descriptor = square_descriptor();
    let stored: Rc<dyn Any> = Rc::new(Square);
    let view = descriptor
      .view(&stored, TypeId::of::<dyn Shape>())
      .expect("capability view");
    let shape = view.downcast::<Rc<dyn Shape>>().expect("rc of dyn Shape");
    assert_eq!(shape.sides(), 4);
  }

  #[test]
  fn pointer_compatibility_is_one_level_and_one_way() {
    let shared = Describe::<Rc<Square>>::new()
      .pointee(square_descriptor())
      .build();
    assert!(shared.is_compatible_with(TypeId::of::<Square>()));
    assert!(shared.is_compatible_with(TypeId::of::<dyn Shape>()));

    let plain = square_descriptor();
    assert!(!plain.is_compatible_with(TypeId::of::<Rc<Square>>()));

    let nested = Describe::<Rc<Rc<Square>>>::new().pointee(shared).build();
    assert!(nested.is_compatible_with(TypeId::of::<Rc<Square>>()));
    assert!(!nested.is_compatible_with(TypeId::of::<Square>()));
  }

  #[test]
  fn pointee_view_shares_the_inner_allocation() {
    let shared = Describe::<Rc<Square>>::new()
      .pointee(square_descriptor())
      .build();
    let inner = Rc::new(Square);
    let stored: Rc<dyn Any> = Rc::new(Rc::clone(&inner));
    let view = shared
      .view(&stored, TypeId::of::<Square>())
      .expect("pointee view");
    let square = view.downcast::<Rc<Square>>().expect("rc of Square");
    assert!(Rc::ptr_eq(&square, &inner));
  }
}
