//! The default context of the current thread.

use crate::context::Context;
use std::cell::RefCell;

thread_local! {
  // Created on first access and dropped, with its elements torn down, when
  // the thread exits.
  static GLOBAL_CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

/// Runs `f` with the default context of the current thread.
///
/// Code that needs isolation, such as tests, should build its own
/// [`Context`] instead.
///
/// # Panics
///
/// Panics if called again from inside `f`, including from a component hook
/// run by the context while `f` holds it.
///
/// # Examples
///
/// ```
/// use fibre_inject::with_global;
///
/// with_global(|context| {
///   context
///     .add_with_name(String::from("Hello from global!"), "greeting")
///     .unwrap();
///   context.start().unwrap();
/// });
///
/// let greeting = with_global(|context| context.get_by_type::<String>()).unwrap();
/// assert_eq!(*greeting, "Hello from global!");
/// ```
pub fn with_global<R>(f: impl FnOnce(&mut Context) -> R) -> R {
  GLOBAL_CONTEXT.with(|context| f(&mut context.borrow_mut()))
}
