//! The contract between a Rust value and the context.

use crate::descriptor::{Describe, TypeDescriptor};
use crate::record::Record;
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// Error type returned by a failing [`Initializable::after_inject`] hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A value that can be registered in a [`Context`](crate::Context).
///
/// Every capability query defaults to "absent". Most types implement this
/// through the [`component!`](crate::component) macro rather than by hand.
pub trait Component: Any {
  /// Describes the stored type: identity, capabilities and pointee.
  fn describe() -> TypeDescriptor
  where
    Self: Sized,
  {
    TypeDescriptor::of::<Self>()
  }

  /// Field accessor for records carrying injection markers.
  fn as_record(&self) -> Option<&dyn Record> {
    None
  }

  fn as_initializable(&self) -> Option<&dyn Initializable> {
    None
  }

  fn as_releasable(&self) -> Option<&dyn Releasable> {
    None
  }
}

/// Post-injection hook, run once all of a component's fields are populated.
pub trait Initializable {
  fn after_inject(&self) -> Result<(), HookError>;
}

/// Teardown hook, run when the context stops, before injected fields are cleared.
pub trait Releasable {
  fn release(&self);
}

// A shared pointer is a component whose capabilities are those of its
// pointee, and whose descriptor unwraps to the pointee's descriptor.
impl<U: Component> Component for Rc<U> {
  fn describe() -> TypeDescriptor {
    Describe::<Rc<U>>::new().pointee(U::describe()).build()
  }

  fn as_record(&self) -> Option<&dyn Record> {
    (**self).as_record()
  }

  fn as_initializable(&self) -> Option<&dyn Initializable> {
    (**self).as_initializable()
  }

  fn as_releasable(&self) -> Option<&dyn Releasable> {
    (**self).as_releasable()
  }
}

macro_rules! plain_components {
  ($($ty:ty),* $(,)?) => {
    $( impl Component for $ty {} )*
  };
}

plain_components!(
  bool,
  char,
  i8,
  i16,
  i32,
  i64,
  i128,
  isize,
  u8,
  u16,
  u32,
  u64,
  u128,
  usize,
  f32,
  f64,
  String,
  &'static str,
);

/// A type-erased handle on a registered value.
///
/// Cloning a `Value` clones the underlying `Rc`, never the value itself.
#[derive(Clone)]
pub struct Value {
  descriptor: Rc<TypeDescriptor>,
  object: Rc<dyn Component>,
  any: Rc<dyn Any>,
}

impl Value {
  pub(crate) fn new<T: Component>(value: T) -> Self {
    let shared = Rc::new(value);
    let object: Rc<dyn Component> = shared.clone();
    Self {
      descriptor: Rc::new(T::describe()),
      object,
      any: shared,
    }
  }

  pub fn descriptor(&self) -> &TypeDescriptor {
    &self.descriptor
  }

  pub fn type_name(&self) -> &'static str {
    self.descriptor.name()
  }

  /// Views the value as `T`, following the same rules the resolver uses:
  /// exact type, declared capability, or the pointee of a stored `Rc`.
  pub fn downcast<T: ?Sized + Any>(&self) -> Option<Rc<T>> {
    self
      .descriptor
      .view(&self.any, TypeId::of::<T>())?
      .downcast::<Rc<T>>()
      .ok()
      .map(|shared| *shared)
  }

  /// Whether both handles point at the same registered value.
  pub fn ptr_eq(&self, other: &Value) -> bool {
    std::ptr::eq(
      Rc::as_ptr(&self.any) as *const (),
      Rc::as_ptr(&other.any) as *const (),
    )
  }

  pub(crate) fn object(&self) -> &dyn Component {
    self.object.as_ref()
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Value")
      .field("type", &self.type_name())
      .finish_non_exhaustive()
  }
}
