//! Espejo local de colecciones
//!
//! Cache best-effort en archivos JSON, una colección por archivo. No es
//! un motor de sincronización: la próxima lectura exitosa del backend
//! sobreescribe lo que haya acá.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Leer una colección del espejo; None si no existe o está corrupta
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = fs::read(self.path_for(key)).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Espejo local '{}' corrupto, se descarta: {}", key, e);
                None
            }
        }
    }

    /// Sobreescribir una colección del espejo
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(key), bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        store.put("autos", &vec![1i64, 2, 3]).unwrap();
        let leido: Vec<i64> = store.get("autos").unwrap();
        assert_eq!(leido, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_inexistente() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        assert!(store.get::<Vec<i64>>("nada").is_none());
    }

    #[test]
    fn test_put_sobreescribe() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        store.put("autos", &vec![1i64]).unwrap();
        store.put("autos", &vec![9i64, 8]).unwrap();

        let leido: Vec<i64> = store.get("autos").unwrap();
        assert_eq!(leido, vec![9, 8]);
    }

    #[test]
    fn test_archivo_corrupto_se_descarta() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        std::fs::write(dir.path().join("autos.json"), b"{ no es json").unwrap();
        assert!(store.get::<Vec<i64>>("autos").is_none());
    }
}
