use tokio::{fs, fs::OpenOptions};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::document::{temp_sibling, Document};
use crate::store::DocumentStore;

impl DocumentStore {
    /// Create a new document file. Fails if the file already exists.
    ///
    /// Without `initial` the file is created empty (zero bytes), which reads
    /// as malformed until something is written to it. Initial content is
    /// written to a temp sibling first and then linked into place, so the name
    /// only ever appears with its full content. Success is announced on
    /// stdout; only failures reach the audit log.
    pub async fn create_file(&self, file: &str, initial: Option<&Document>) -> Result<(), ServiceError> {
        let result = async {
            let path = self.docs.resolve(file)?;
            match initial {
                None => {
                    OpenOptions::new()
                        .write(true)
                        .create_new(true)
                        .open(&path)
                        .await
                        .map_err(|e| ServiceError::from_io(file, e))?;
                }
                Some(doc) => {
                    let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::malformed(file, e))?;
                    let tmp = temp_sibling(&path);
                    let linked = match fs::write(&tmp, &data).await {
                        Ok(()) => fs::hard_link(&tmp, &path).await,
                        Err(e) => Err(e),
                    };
                    let _ = fs::remove_file(&tmp).await;
                    linked.map_err(|e| ServiceError::from_io(file, e))?;
                }
            }
            Ok::<(), ServiceError>(())
        }
        .await;
        if result.is_ok() {
            info!(%file, with_content = initial.is_some(), "file created");
            println!("{file} created");
        }
        self.finish("create_file", result).await
    }

    /// Remove a document file. Success is announced on stdout.
    pub async fn delete_file(&self, file: &str) -> Result<(), ServiceError> {
        let result = async {
            let path = self.docs.resolve(file)?;
            fs::remove_file(&path).await.map_err(|e| ServiceError::from_io(file, e))
        }
        .await;
        if result.is_ok() {
            info!(%file, "file removed");
            println!("{file} removed");
        }
        self.finish("delete_file", result).await
    }
}
