//! # Fibre Inject
//!
//! A single-threaded dependency-injection context for Rust, built around field
//! injection into pre-existing instances.
//!
//! Components are registered into a [`Context`], by name or under a default
//! name derived from their type. On [`Context::start`] the context walks every
//! component's injection markers, resolves each dependency by name or by type,
//! initializes dependencies first (depth-first, detecting cycles), fills the
//! marked fields and finally runs the optional post-injection hook.
//! [`Context::stop`] runs teardown hooks and clears injected fields in exact
//! reverse initialization order.
//!
//! ## Core Concepts
//!
//! - **Context**: the registry of elements and the lifecycle engine.
//! - **Component**: anything that can be registered. Primitive values,
//!   `String`, `&'static str` and `Rc<T>` of any component already are; your
//!   own types are declared with the [`component!`] macro.
//! - **Inject**: an injection slot. A record's `Inject<T>` fields are filled
//!   by the context and cleared again on stop.
//! - **Capabilities**: a component can declare the trait objects it may be
//!   injected as (`component!(Impl as dyn Trait;)`).
//! - **Global Context**: a per-thread default context, reached through
//!   [`with_global`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{component, Context, HookError, Initializable, Inject};
//! use std::cell::Cell;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! #[derive(Default)]
//! struct UserService {
//!   db: Inject<Database>,
//!   ready: Cell<bool>,
//! }
//!
//! impl Initializable for UserService {
//!   fn after_inject(&self) -> Result<(), HookError> {
//!     self.ready.set(self.db.is_set());
//!     Ok(())
//!   }
//! }
//!
//! component!(Database;);
//! component! {
//!   UserService;
//!   inject { db };
//!   hooks { after_inject };
//! }
//!
//! let mut context = Context::new();
//! context.add(Database { url: "postgres://localhost/app".into() }).unwrap();
//! context.add(UserService::default()).unwrap();
//! context.start().unwrap();
//!
//! let users = context.get_by_type::<UserService>().unwrap();
//! assert!(users.ready.get());
//! assert_eq!(users.db.get().unwrap().url, "postgres://localhost/app");
//!
//! context.stop();
//! assert!(!users.db.is_set());
//! ```

mod component;
mod config;
mod context;
mod descriptor;
mod element;
mod error;
mod global;
mod lifecycle;
mod macros;
mod record;
mod registry;
mod resolver;

pub use component::{Component, HookError, Initializable, Releasable, Value};
pub use config::{ContextConfig, Naming};
pub use context::Context;
pub use descriptor::{Describe, TypeDescriptor, TypeKey};
pub use element::{ElementInfo, Status};
pub use error::{Candidates, Error, ErrorKind, Result};
pub use global::with_global;
pub use record::{AccessError, Attribute, Inject, Marker, Mismatch, Record, Schema, Target};
pub use resolver::Query;

#[doc(hidden)]
pub mod __private {
  pub use crate::record::field_key;
  pub use once_cell::sync::Lazy;
}
