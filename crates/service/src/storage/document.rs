use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use uuid::Uuid;

use crate::errors::ServiceError;

/// A top-level JSON object stored as one file.
pub type Document = Map<String, Value>;

/// Primitive read/write of whole documents under a data root.
///
/// Every read goes to disk. Writes replace the file through a sibling temp
/// file and a rename, so a reader sees either the old or the new document.
/// There is no locking between callers.
#[derive(Clone, Debug)]
pub struct DocumentAccessor {
    root: PathBuf,
    /// Paths under the root that are never served as documents (the audit log).
    reserved: Vec<PathBuf>,
}

impl DocumentAccessor {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), reserved: Vec::new() }
    }

    /// Refuse to resolve any name that lands on `path`.
    pub fn reserve<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.reserved.push(lexical(path.as_ref()));
        self
    }

    /// Map a document name onto the data root, rejecting anything that could
    /// escape it.
    pub fn resolve(&self, file: &str) -> Result<PathBuf, ServiceError> {
        let rel = Path::new(file);
        if file.trim().is_empty() {
            return Err(ServiceError::Validation("file name must not be empty".into()));
        }
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(ServiceError::Validation(format!("illegal file name {file}")));
        }
        let path = self.root.join(rel);
        if self.reserved.contains(&lexical(&path)) {
            return Err(ServiceError::Validation(format!("reserved file name {file}")));
        }
        Ok(path)
    }

    pub async fn read(&self, file: &str) -> Result<Document, ServiceError> {
        let path = self.resolve(file)?;
        let bytes = fs::read(&path).await.map_err(|e| ServiceError::from_io(file, e))?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(other) => Err(ServiceError::malformed(file, format!("expected object, found {}", json_type(&other)))),
            Err(e) => Err(ServiceError::malformed(file, e)),
        }
    }

    pub async fn write(&self, file: &str, doc: &Document) -> Result<(), ServiceError> {
        let path = self.resolve(file)?;
        let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::malformed(file, e))?;
        let tmp = temp_sibling(&path);
        if let Err(e) = fs::write(&tmp, &data).await {
            return Err(ServiceError::io(file, e));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io(file, e));
        }
        Ok(())
    }
}

/// `path` without `.` components, so `./data/log.txt` and `data/log.txt` compare equal.
fn lexical(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;
    use serde_json::json;

    #[tokio::test]
    async fn write_then_read_keeps_order_and_indent() -> Result<(), anyhow::Error> {
        let dir = TempDir::new("accessor").await?;
        let acc = DocumentAccessor::new(dir.path());

        let mut doc = Document::new();
        doc.insert("zeta".into(), json!(1));
        doc.insert("alpha".into(), json!({"nested": true}));
        acc.write("doc.json", &doc).await?;

        let raw = fs::read_to_string(dir.path().join("doc.json")).await?;
        assert!(raw.starts_with("{\n  \"zeta\": 1,"));

        let back = acc.read("doc.json").await?;
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(back, doc);

        // no temp files left behind
        let mut entries = fs::read_dir(dir.path()).await?;
        let mut names = Vec::new();
        while let Some(e) = entries.next_entry().await? {
            names.push(e.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["doc.json".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn read_classifies_failures() -> Result<(), anyhow::Error> {
        let dir = TempDir::new("accessor_err").await?;
        let acc = DocumentAccessor::new(dir.path());

        assert_eq!(acc.read("missing.json").await, Err(ServiceError::NotFound("missing.json".into())));

        fs::write(dir.path().join("broken.json"), b"{not json").await?;
        assert!(matches!(acc.read("broken.json").await, Err(ServiceError::MalformedDocument { .. })));

        fs::write(dir.path().join("empty.json"), b"").await?;
        assert!(matches!(acc.read("empty.json").await, Err(ServiceError::MalformedDocument { .. })));

        fs::write(dir.path().join("array.json"), b"[1,2]").await?;
        match acc.read("array.json").await {
            Err(ServiceError::MalformedDocument { reason, .. }) => assert!(reason.contains("array")),
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn resolve_rejects_escaping_names() {
        let acc = DocumentAccessor::new("/data");
        assert_eq!(acc.resolve("a.json").unwrap(), PathBuf::from("/data/a.json"));
        assert_eq!(acc.resolve("sub/a.json").unwrap(), PathBuf::from("/data/sub/a.json"));
        for bad in ["", "  ", "../a.json", "/etc/passwd", "sub/../../a.json", "./a.json"] {
            assert!(matches!(acc.resolve(bad), Err(ServiceError::Validation(_))), "{bad}");
        }
    }

    #[test]
    fn resolve_rejects_the_reserved_log() {
        let acc = DocumentAccessor::new("./data").reserve("data/log.txt");
        for name in ["log.txt", "sub/../log.txt"] {
            assert!(matches!(acc.resolve(name), Err(ServiceError::Validation(_))), "{name}");
        }
        assert!(acc.resolve("log.txt.json").is_ok());
        assert!(acc.resolve("sub/log.txt").is_ok());
    }

    #[tokio::test]
    async fn write_into_missing_dir_is_io_failure() {
        let acc = DocumentAccessor::new("/nonexistent-dir-for-docstore");
        let err = acc.write("a.json", &Document::new()).await.unwrap_err();
        assert_eq!(err.kind(), "io");
    }
}
