use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::Company;
use crate::utils::error::AppError;

const COLLECTION: &str = "companies";

/// Lists companies in stored order.
pub async fn list_companies(db: &MongoDB) -> Result<Vec<Company>, AppError> {
    let collection = db.collection::<Company>(COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut companies = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(company) => companies.push(company),
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        }
    }

    Ok(companies)
}

/// Fetches one company by id.
pub async fn get_company(db: &MongoDB, id: &str) -> Result<Company, AppError> {
    let object_id = ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("Invalid company id".to_string()))?;

    let collection = db.collection::<Company>(COLLECTION);

    collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_company_rejects_malformed_id() {
        let db = MongoDB::connect_lazy("mongodb://localhost:27017/placement-test")
            .await
            .unwrap();

        let err = get_company(&db, "not-hex").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
