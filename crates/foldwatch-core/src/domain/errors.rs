//! Errors - ローダーのエラー型
//!
//! ローダー自身はリトライしません。エラーは `?` で呼び出し元（ホストのスケジューラ）へ伝播します。

/// PopulateError is what a population callback returns when it fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PopulateError {
    message: String,
}

impl PopulateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// LoaderError はローダー実行時のエラー
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("scope root #{0} not found")]
    RootNotFound(String),

    #[error("document has no body to scope the loader to")]
    MissingBody,

    /// The callback failed. The element counts as dispatched; elements after it
    /// in the same pass stay pending.
    #[error("populate failed for {element}: {source}")]
    Populate {
        element: String,
        #[source]
        source: PopulateError,
    },
}
