use std::path::Path;

use async_trait::async_trait;

use crate::entities::Transaction;
use crate::errors::LoadError;

/// Source of a transaction snapshot.
///
/// Implementations reject the whole batch on the first bad row; a partially
/// loaded snapshot is never returned.
#[async_trait]
pub trait TransactionLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<Vec<Transaction>, LoadError>;
}
