use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Escribe `contents` en `path` de forma atómica: primero a un `.tmp` hermano
/// y luego `rename`. Un lector nunca ve el archivo a medio escribir.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  ensure_parent_dir(path)?;
  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

/// Crea el directorio padre de `path` si no existe.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
    _ => Ok(()),
  }
}
