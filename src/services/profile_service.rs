use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};

use crate::database::{is_duplicate_key, MongoDB};
use crate::models::{CreateProfileRequest, StudentProfile, UpdateProfileRequest};
use crate::utils::error::AppError;

const COLLECTION: &str = "studentprofiles";

// ==================== Student Profile ====================

/// Fetches the caller's profile.
pub async fn get_profile(db: &MongoDB, user_id: &ObjectId) -> Result<StudentProfile, AppError> {
    let collection = db.collection::<StudentProfile>(COLLECTION);

    collection
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Student has not created a profile yet.".to_string()))
}

fn missing_fields() -> AppError {
    AppError::ValidationError("Missing required fields".to_string())
}

fn non_empty(field: &Option<String>) -> Result<String, AppError> {
    field
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .ok_or_else(missing_fields)
}

/// Creates the caller's profile. One per account.
pub async fn create_profile(
    db: &MongoDB,
    user_id: &ObjectId,
    request: &CreateProfileRequest,
) -> Result<StudentProfile, AppError> {
    // 1. Required fields are checked by presence, so values like year 0
    //    or an empty-but-present payload fail loudly instead of silently
    let enrollment_no = non_empty(&request.enrollment_no)?;
    let branch = non_empty(&request.branch)?;
    let year = request.year.ok_or_else(missing_fields)?;
    let cgpa = request.cgpa.ok_or_else(missing_fields)?;
    let resume_url = non_empty(&request.resume_url)?;
    let skills = request
        .skills
        .as_ref()
        .filter(|s| !s.is_empty())
        .cloned()
        .ok_or_else(missing_fields)?;

    let collection = db.collection::<StudentProfile>(COLLECTION);

    // 2. Friendly pre-check; the unique index on userId is what actually
    //    guarantees one profile per account
    let existing = collection
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "Student profile already exists".to_string(),
        ));
    }

    let now = DateTime::now();
    let mut profile = StudentProfile {
        id: None,
        user_id: *user_id,
        email: request.email.clone(),
        enrollment_no,
        branch,
        year,
        cgpa,
        resume_url,
        skills,
        is_placed: false,
        created_at: now,
        updated_at: now,
    };

    // 3. Insert; a racing create loses here with a duplicate-key error
    match collection.insert_one(&profile).await {
        Ok(inserted) => {
            profile.id = inserted.inserted_id.as_object_id();
            log::info!("📝 Profile created for user {}", user_id.to_hex());
            Ok(profile)
        }
        Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(
            "Student profile already exists".to_string(),
        )),
        Err(e) => Err(AppError::DatabaseError(e.to_string())),
    }
}

/// Builds the merge update: only fields present in the payload overwrite,
/// and an explicit `email: null` clears the stored value.
fn build_update_doc(request: &UpdateProfileRequest) -> Document {
    let mut set = doc! {};

    if let Some(email) = &request.email {
        match email {
            Some(value) => {
                set.insert("email", value.clone());
            }
            None => {
                set.insert("email", Bson::Null);
            }
        }
    }
    if let Some(enrollment_no) = &request.enrollment_no {
        set.insert("enrollmentNo", enrollment_no.clone());
    }
    if let Some(branch) = &request.branch {
        set.insert("branch", branch.clone());
    }
    if let Some(year) = request.year {
        set.insert("year", year);
    }
    if let Some(cgpa) = request.cgpa {
        set.insert("cgpa", cgpa);
    }
    if let Some(resume_url) = &request.resume_url {
        set.insert("resumeUrl", resume_url.clone());
    }
    if let Some(skills) = &request.skills {
        set.insert("skills", skills.clone());
    }
    if let Some(is_placed) = request.is_placed {
        set.insert("isPlaced", is_placed);
    }

    set.insert("updatedAt", DateTime::now());
    set
}

/// Merges a partial update into the caller's profile and returns the
/// merged document.
pub async fn update_profile(
    db: &MongoDB,
    user_id: &ObjectId,
    request: &UpdateProfileRequest,
) -> Result<StudentProfile, AppError> {
    let collection = db.collection::<StudentProfile>(COLLECTION);

    // 1. The profile must exist before anything is merged
    collection
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    // 2. Apply only the fields the payload carries
    let set = build_update_doc(request);

    collection
        .update_one(doc! { "userId": user_id }, doc! { "$set": set })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    // 3. Return the merged document
    let updated = collection
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    log::info!("🔧 Profile updated for user {}", user_id.to_hex());
    Ok(updated)
}
