use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::{ShaderLanguage, ShaderSource};

/// Shader sources keyed by name, loaded at most once.
///
/// Owned by whoever bootstraps the program and passed by reference; there is
/// no process-wide source state.
#[derive(Debug, Default)]
pub struct ShaderSourceCache {
    sources: HashMap<String, Arc<ShaderSource>>,
}

impl ShaderSourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached pair for `name`, reading both files on first use.
    ///
    /// The language comes from the vertex file's extension; both files must agree.
    pub fn load(
        &mut self,
        name: &str,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Arc<ShaderSource>> {
        if let Some(src) = self.sources.get(name) {
            return Ok(Arc::clone(src));
        }

        let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());

        let language = ShaderLanguage::from_path(vertex_path).with_context(|| {
            format!("unrecognised shader extension: {}", vertex_path.display())
        })?;
        anyhow::ensure!(
            ShaderLanguage::from_path(fragment_path) == Some(language),
            "shader pair `{name}` mixes languages: {} / {}",
            vertex_path.display(),
            fragment_path.display()
        );

        let vertex = std::fs::read_to_string(vertex_path)
            .with_context(|| format!("failed to read {}", vertex_path.display()))?;
        let fragment = std::fs::read_to_string(fragment_path)
            .with_context(|| format!("failed to read {}", fragment_path.display()))?;

        log::debug!("loaded shader pair `{name}` ({language:?})");
        Ok(self.insert(name, ShaderSource::new(language, vertex, fragment)))
    }

    /// Inserts (or replaces) a source pair.
    pub fn insert(&mut self, name: impl Into<String>, source: ShaderSource) -> Arc<ShaderSource> {
        let source = Arc::new(source);
        self.sources.insert(name.into(), Arc::clone(&source));
        source
    }

    pub fn get(&self, name: &str) -> Option<Arc<ShaderSource>> {
        self.sources.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let vs = dir.path().join("tri.vert");
        let fs = dir.path().join("tri.frag");
        std::fs::write(&vs, "void main() {}").unwrap();
        std::fs::write(&fs, "void main() {}").unwrap();

        let mut cache = ShaderSourceCache::new();
        let first = cache.load("tri", &vs, &fs).unwrap();
        assert_eq!(first.language, ShaderLanguage::Glsl);

        // Cached: the files are no longer consulted.
        std::fs::remove_file(&vs).unwrap();
        let second = cache.load("tri", &vs, &fs).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn load_rejects_mixed_languages() {
        let dir = tempfile::tempdir().unwrap();
        let vs = dir.path().join("a.wgsl");
        let fs = dir.path().join("a.frag");
        std::fs::write(&vs, "").unwrap();
        std::fs::write(&fs, "").unwrap();

        let mut cache = ShaderSourceCache::new();
        assert!(cache.load("a", &vs, &fs).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ShaderSourceCache::new();
        let err = cache
            .load("x", dir.path().join("x.wgsl"), dir.path().join("y.wgsl"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn insert_replaces_entry() {
        let mut cache = ShaderSourceCache::new();
        cache.insert("s", ShaderSource::wgsl("a", "b"));
        cache.insert("s", ShaderSource::wgsl("c", "d"));
        assert_eq!(cache.get("s").unwrap().vertex, "c");
        assert!(cache.get("missing").is_none());
    }
}
