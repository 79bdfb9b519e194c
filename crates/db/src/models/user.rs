//! User document model and DTOs.

use serde::{Deserialize, Serialize};
use taskboard_core::kind::DocKind;
use taskboard_core::types::DocKey;

use super::Document;

/// A stored user, keyed by its username.
///
/// `password` holds the Argon2id PHC hash. It is part of the stored document
/// and is returned by user reads and login as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: DocKey,
    #[serde(rename = "_type")]
    pub kind: DocKind,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Document for User {
    const KIND: DocKind = DocKind::User;

    fn key(&self) -> &str {
        &self.id
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        Self {
            id: input.username.clone(),
            kind: DocKind::User,
            username: input.username,
            password: input.password_hash,
            name: input.name,
            address: input.address,
            company: input.company,
            email: input.email,
            phone: input.phone,
        }
    }
}
