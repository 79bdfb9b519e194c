//! Company document model and DTOs.

use serde::{Deserialize, Serialize};
use taskboard_core::kind::DocKind;
use taskboard_core::types::DocKey;

use super::Document;

/// A stored company, keyed by its website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: DocKey,
    #[serde(rename = "_type")]
    pub kind: DocKind,
    pub name: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Document for Company {
    const KIND: DocKind = DocKind::Company;

    fn key(&self) -> &str {
        &self.id
    }
}

/// DTO for creating a new company.
#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub website: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<CreateCompany> for Company {
    fn from(input: CreateCompany) -> Self {
        Self {
            id: input.website.clone(),
            kind: DocKind::Company,
            name: input.name,
            website: input.website,
            address: input.address,
            phone: input.phone,
        }
    }
}
