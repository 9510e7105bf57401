//! The main `Context` struct and its associated methods.

use crate::component::{Component, Value};
use crate::config::ContextConfig;
use crate::descriptor::TypeKey;
use crate::element::{ElementId, ElementInfo, Status};
use crate::error::{Error, Result};
use crate::lifecycle::Lifecycle;
use crate::registry::Registry;
use crate::resolver::{self, Query};
use std::any::Any;
use std::rc::Rc;
use tracing::{debug, info};

/// The dependency-injection context.
///
/// Holds registered elements, injects their marked fields on [`start`](Self::start)
/// and tears them down in reverse order on [`stop`](Self::stop). A context is
/// single-threaded: it is neither `Send` nor `Sync`.
#[derive(Default)]
pub struct Context {
  registry: Registry,
  // Elements in the order they finished initializing.
  completed: Vec<ElementId>,
  started: bool,
  config: ContextConfig,
}

impl Context {
  /// Creates a new, empty `Context`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContextConfig) -> Self {
    let mut context = Self::default();
    context.config = config;
    context
  }

  pub fn config(&self) -> &ContextConfig {
    &self.config
  }

  pub fn is_started(&self) -> bool {
    self.started
  }

  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.len() == 0
  }

  // --- PRIVATE HELPERS ---

  fn lifecycle(&mut self) -> Lifecycle<'_> {
    Lifecycle::new(&mut self.registry, &mut self.completed)
  }

  fn register(&mut self, name: String, value: Option<Value>) -> Result<()> {
    let id = self.registry.insert(name, value)?;
    if self.started {
      self.lifecycle().initialize(id)?;
    }
    Ok(())
  }

  fn lookup(&mut self, query: Query) -> Result<Value> {
    let id = resolver::resolve(&self.registry, &query)?
      .ok_or(Error::LookupNotFound { query })?;
    if self.started && self.registry.get(id).status == Status::Uninitialized {
      let initialized = self.lifecycle().initialize(id);
      initialized.map_err(|source| Error::Lookup {
        name: self.registry.get(id).name.clone(),
        source: Box::new(source),
      })?;
    }
    Ok(self.registry.get(id).value.clone())
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers `value` under its default name (see [`Naming`](crate::Naming)).
  ///
  /// If the context is already started the element is initialized at once,
  /// and any initialization failure is returned.
  pub fn add<T: Component>(&mut self, value: T) -> Result<()> {
    let name = self.config.naming.default_name::<T>();
    self.register(name, Some(Value::new(value)))
  }

  pub fn add_with_name<T: Component>(&mut self, value: T, name: impl Into<String>) -> Result<()> {
    self.register(name.into(), Some(Value::new(value)))
  }

  /// Registers a value that may be absent; `None` fails with
  /// [`Error::NilElement`].
  pub fn add_optional<T: Component>(&mut self, value: Option<T>) -> Result<()> {
    let name = self.config.naming.default_name::<T>();
    self.register(name, value.map(Value::new))
  }

  pub fn add_optional_with_name<T: Component>(
    &mut self,
    value: Option<T>,
    name: impl Into<String>,
  ) -> Result<()> {
    self.register(name.into(), value.map(Value::new))
  }

  // --- Lifecycle ---

  /// Initializes every registered element in registration order.
  ///
  /// On the first failure, everything initialized so far is torn down and
  /// the context stays stopped.
  pub fn start(&mut self) -> Result<()> {
    for index in 0..self.registry.len() {
      let id = ElementId(index);
      let initialized = self.lifecycle().initialize(id);
      if let Err(source) = initialized {
        let name = self.registry.get(id).name.clone();
        self.stop();
        return Err(Error::Start {
          name,
          source: Box::new(source),
        });
      }
    }
    self.started = true;
    info!(elements = self.registry.len(), "context started");
    Ok(())
  }

  /// Finalizes initialized elements in reverse initialization order.
  /// Elements stay registered, so the context can be started again.
  pub fn stop(&mut self) {
    let completed = std::mem::take(&mut self.completed);
    let mut lifecycle = self.lifecycle();
    for id in completed.iter().rev() {
      lifecycle.finalize(*id);
    }
    self.started = false;
    debug!(finalized = completed.len(), "context stopped");
  }

  // --- Resolution ---

  /// Returns the single element compatible with `T`.
  pub fn get_by_type<T: ?Sized + Any>(&mut self) -> Result<Rc<T>> {
    let key = TypeKey::of::<T>();
    let value = self.lookup(Query::Type(key))?;
    value
      .downcast::<T>()
      .ok_or(Error::LookupNotFound {
        query: Query::Type(key),
      })
  }

  /// Returns the single element registered as `name`, whatever its type.
  pub fn get_by_name(&mut self, name: &str) -> Result<Value> {
    self.lookup(Query::Name(name.to_owned()))
  }

  /// Returns the single element registered as `name` and compatible with `T`.
  pub fn get_by_name_and_type<T: ?Sized + Any>(&mut self, name: &str) -> Result<Rc<T>> {
    let query = Query::NameAndType(name.to_owned(), TypeKey::of::<T>());
    let value = self.lookup(query.clone())?;
    value.downcast::<T>().ok_or(Error::LookupNotFound { query })
  }

  // --- Diagnostics ---

  /// Every element, in registration order.
  pub fn elements(&self) -> Vec<ElementInfo> {
    self.registry.infos()
  }

  /// Initialized elements, in the order they finished initializing.
  pub fn initialization_order(&self) -> Vec<ElementInfo> {
    self
      .completed
      .iter()
      .map(|id| self.registry.info(*id))
      .collect()
  }
}

impl Drop for Context {
  fn drop(&mut self) {
    if self.started {
      self.stop();
    }
  }
}
