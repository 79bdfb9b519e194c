//! Repository for `Company` documents.

use super::{fetch, find_all};
use crate::error::StoreError;
use crate::models::company::{Company, CreateCompany};
use crate::models::encode;
use crate::store::{DocumentStore, Filter};

/// Provides read and create operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company keyed by its website. Conflicts if it exists.
    pub async fn create(
        store: &dyn DocumentStore,
        input: CreateCompany,
    ) -> Result<Company, StoreError> {
        let company = Company::from(input);
        store.insert(&company.id, &encode(&company)?).await?;
        tracing::info!(company_id = %company.id, "Company created");
        Ok(company)
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        company_id: &str,
    ) -> Result<Option<Company>, StoreError> {
        fetch::<Company>(store, company_id).await
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Company>, StoreError> {
        find_all::<Company>(store, Filter::All).await
    }
}
