use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::Invoice;
use crate::domain::error::DomainError;

/// Storage port for invoices. The service computes numbers and money
/// fields; the repository persists them as given.
#[async_trait]
pub trait InvoicesRepository: Send + Sync {
    async fn insert(&self, invoice: Invoice) -> Result<Invoice, DomainError>;

    /// Newest invoice date first.
    async fn list(&self) -> Result<Vec<Invoice>, DomainError>;

    async fn get(&self, id: Uuid) -> Result<Option<Invoice>, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Highest invoice number with the given prefix, if any. Numbers are
    /// zero-padded, so lexicographic order matches numeric order.
    async fn max_number_with_prefix(&self, prefix: &str) -> Result<Option<String>, DomainError>;
}
