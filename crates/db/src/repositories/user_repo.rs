//! Repository for `User` documents.

use super::{fetch, find_all};
use crate::error::StoreError;
use crate::models::encode;
use crate::models::user::{CreateUser, User};
use crate::store::{DocumentStore, Filter};

/// Provides read and create operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user keyed by its username.
    ///
    /// Fails with [`StoreError::Conflict`] if the username is taken; the
    /// check is the store's own atomic insert.
    pub async fn create(store: &dyn DocumentStore, input: CreateUser) -> Result<User, StoreError> {
        let user = User::from(input);
        store.insert(&user.id, &encode(&user)?).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Find a user by key (its username).
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Option<User>, StoreError> {
        fetch::<User>(store, user_id).await
    }

    /// List every user in creation order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<User>, StoreError> {
        find_all::<User>(store, Filter::All).await
    }
}
