//! Context configuration, loadable from YAML.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How an element registered without an explicit name is named.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Naming {
  /// The full type path, e.g. `alloc::rc::Rc<my_app::Database>`.
  #[default]
  TypePath,
  /// The type path with module prefixes removed, e.g. `Rc<Database>`.
  TypeName,
}

impl Naming {
  pub fn default_name<T: ?Sized>(&self) -> String {
    let full = std::any::type_name::<T>();
    match self {
      Naming::TypePath => full.to_owned(),
      Naming::TypeName => short_type_name(full),
    }
  }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
  #[serde(default)]
  pub naming: Naming,
}

impl ContextConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_path(path: &Path) -> Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
  }
}

fn short_type_name(full: &str) -> String {
  fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
  }

  let mut short = String::with_capacity(full.len());
  let mut path = String::new();
  for ch in full.chars() {
    if ch.is_alphanumeric() || ch == '_' || ch == ':' {
      path.push(ch);
    } else {
      short.push_str(last_segment(&path));
      path.clear();
      short.push(ch);
    }
  }
  short.push_str(last_segment(&path));
  short
}
