use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company document in the "companies" collection (read-only here,
/// maintained by the placement-cell admin tooling).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub logo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

/// Company as rendered in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        CompanyResponse {
            id: company.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: company.name,
            description: company.description,
            website: company.website,
            location: company.location,
            logo_url: company.logo_url,
        }
    }
}
