//! Where the bearer token lives between invocations.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use carebridge_core::result::AppResult;

/// Client-side storage for the bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// The stored token, `None` when signed out.
    async fn load(&self) -> AppResult<Option<String>>;

    /// Replace the stored token.
    async fn save(&self, token: &str) -> AppResult<()>;

    /// Forget the stored token.
    async fn clear(&self) -> AppResult<()>;
}

/// Token kept in a plain file, the CLI's equivalent of browser local storage.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    /// Path of the token file.
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, token.trim()).await?;
        debug!(path = %self.path.display(), "Stored bearer token");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token held only in memory, for tokens passed on the command line.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    /// Current token.
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> AppResult<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
