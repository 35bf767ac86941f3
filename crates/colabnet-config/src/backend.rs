use crate::paths::{ColabnetPaths, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

// Escritura con toml_edit para no perder los comentarios del usuario.
use toml_edit::{DocumentMut, Item};

/// Acceso a `colabnet.toml` por secciones (`[crawler]`, `[storage]`, ...).
pub trait ConfigBackend {
  /// `Ok(None)` si el archivo o la sección no existen.
  fn load_section_opt<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>, ConfigError>;

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    self.load_section_opt(section)?.ok_or_else(|| ConfigError::Other(format!("missing section [{section}]")))
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    Ok(self.load_section_opt(section)?.unwrap_or_default())
  }
}

pub struct TomlConfigBackend {
  paths: ColabnetPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: ColabnetPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &ColabnetPaths {
    &self.paths
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section_opt<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    let root: toml::Table = toml::from_str(&content)?;

    let Some(table) = root.get(section) else {
      return Ok(None);
    };

    let t: T = table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}] in {}: {e}", path.display())))?;

    Ok(Some(t))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` (serde) y reparsearla como tabla.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_doc = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?;
    let section_item = Item::Table(section_doc.as_table().clone());

    // 3) Reemplazar solo esa sección; el resto del documento queda intacto.
    doc[section] = section_item;

    colabnet_fs::atomic_write_str(&path, &doc.to_string())?;

    Ok(())
  }
}
