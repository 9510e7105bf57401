//! Initialization and teardown of elements.
//!
//! Initialization is a depth-first walk of the dependency graph: an element
//! marks itself `InProgress`, initializes each dependency it resolves, then
//! injects it. Meeting an `InProgress` element again means the walk has come
//! back around a cycle.

use crate::element::{ElementId, Status};
use crate::error::{Error, Result};
use crate::record::{Marker, Record, Target};
use crate::registry::Registry;
use crate::resolver::{self, Query};
use tracing::{debug, trace, warn};

pub(crate) struct Lifecycle<'a> {
  registry: &'a mut Registry,
  completed: &'a mut Vec<ElementId>,
}

impl<'a> Lifecycle<'a> {
  pub(crate) fn new(registry: &'a mut Registry, completed: &'a mut Vec<ElementId>) -> Self {
    Self {
      registry,
      completed,
    }
  }

  pub(crate) fn initialize(&mut self, id: ElementId) -> Result<()> {
    match self.registry.get(id).status {
      Status::Initialized => Ok(()),
      Status::InProgress => {
        let element = self.registry.info(id);
        warn!(element = %element, "dependency cycle detected");
        Err(Error::DependencyCycle { element })
      }
      Status::Uninitialized => {
        let result = self.run(id);
        if result.is_err() {
          self.finalize(id);
          self.completed.retain(|completed| *completed != id);
        }
        result
      }
    }
  }

  fn run(&mut self, id: ElementId) -> Result<()> {
    self.registry.get_mut(id).status = Status::InProgress;
    let value = self.registry.get(id).value.clone();
    debug!(element = %self.registry.info(id), "initializing element");

    if let Some(record) = value.object().as_record() {
      for marker in record.schema().markers() {
        self.inject(id, record, marker)?;
      }
    }

    self.completed.push(id);
    self.registry.get_mut(id).status = Status::Initialized;

    if let Some(hook) = value.object().as_initializable() {
      hook.after_inject().map_err(|source| Error::Hook {
        element: self.registry.info(id),
        source,
      })?;
    }
    debug!(element = %self.registry.info(id), "element initialized");
    Ok(())
  }

  fn inject(&mut self, id: ElementId, record: &dyn Record, marker: &Marker) -> Result<()> {
    let field = marker.field();
    let query = match marker.target() {
      Target::ByType(key) => Query::Type(*key),
      Target::ByName(name) => Query::Name(name.clone()),
    };

    let dependency = resolver::resolve(&*self.registry, &query)
      .map_err(|source| Error::Dependency {
        element: self.registry.info(id),
        field,
        source: Box::new(source),
      })?
      .ok_or_else(|| Error::MissingDependency {
        element: self.registry.info(id),
        field,
        target: marker.target().clone(),
      })?;

    if self.registry.get(dependency).status != Status::Initialized {
      self
        .initialize(dependency)
        .map_err(|source| Error::Dependency {
          element: self.registry.info(id),
          field,
          source: Box::new(source),
        })?;
    }

    let injected = self.registry.get(dependency).value.clone();
    record
      .set_attribute(field, Some(&injected))
      .map_err(|source| Error::FieldAssignment {
        element: self.registry.info(id),
        field,
        source,
      })?;
    trace!(
      element = %self.registry.info(id),
      field,
      dependency = %self.registry.info(dependency),
      "dependency injected"
    );
    Ok(())
  }

  /// Best-effort teardown: runs the release hook of an initialized element,
  /// clears every marked field and resets the status. Never fails.
  pub(crate) fn finalize(&mut self, id: ElementId) {
    let element = self.registry.get(id);
    let value = element.value.clone();
    if element.status == Status::Initialized {
      if let Some(hook) = value.object().as_releasable() {
        hook.release();
      }
    }

    if let Some(record) = value.object().as_record() {
      for marker in record.schema().markers() {
        if let Err(err) = record.set_attribute(marker.field(), None) {
          debug!(
            element = %self.registry.info(id),
            field = marker.field(),
            error = %err,
            "ignoring teardown failure"
          );
        }
      }
    }

    self.registry.get_mut(id).status = Status::Uninitialized;
    debug!(element = %self.registry.info(id), "element finalized");
  }
}
