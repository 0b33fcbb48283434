//! Signup, login and the approval workflow.
//!
//! A user starts pending (`approved = false`). Approval flips the flag and is idempotent;
//! rejection deletes the row. There is no way back from approved.

use super::password::{hash_password, verify_password};
use super::validation::RequestValidator;
use crate::config::AdminSeed;
use crate::error::AppError;
use crate::extractors::json::{lenient_text, present_text};
use crate::models::{NewUser, Role, UserField, UserProfile};
use crate::store::Store;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    #[serde(deserialize_with = "present_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub userid: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub password: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub contact: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "present_text")]
    pub userid: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateFieldRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub field: Option<String>,
    /// Stored as given; numbers are kept as their decimal text.
    #[serde(deserialize_with = "lenient_text")]
    pub value: Option<String>,
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".into())
}

pub struct UserService;

impl UserService {
    /// Create a pending user. Duplicate userid surfaces as a conflict from the store.
    pub async fn signup(store: &dyn Store, req: SignupRequest) -> Result<i64, AppError> {
        RequestValidator::validate_signup(
            req.name.as_deref(),
            req.userid.as_deref(),
            req.password.as_deref(),
            req.email.as_deref(),
            req.contact.as_deref(),
        )?;
        let password = hash_password(req.password.as_deref().unwrap_or_default())?;
        let id = store
            .insert_user(NewUser {
                name: req.name,
                userid: req.userid.unwrap_or_default(),
                password,
                email: req.email,
                contact: req.contact,
                approved: false,
                role: Role::User,
            })
            .await?;
        tracing::info!(user_id = id, "signup pending approval");
        Ok(id)
    }

    pub async fn login(store: &dyn Store, req: LoginRequest) -> Result<UserProfile, AppError> {
        let (userid, password) = match (req.userid.as_deref(), req.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => {
                return Err(AppError::Validation(
                    "User ID and password are required".into(),
                ))
            }
        };
        let user = store
            .find_user_by_userid(userid)
            .await?
            .filter(|u| verify_password(password, &u.password))
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;
        if !user.approved {
            return Err(AppError::Forbidden("Await admin approval".into()));
        }
        Ok(user.profile())
    }

    pub async fn list_pending(store: &dyn Store) -> Result<Vec<UserProfile>, AppError> {
        let users = store.list_pending_users().await?;
        Ok(users.iter().map(|u| u.summary()).collect())
    }

    pub async fn approve(store: &dyn Store, id: Option<i64>) -> Result<(), AppError> {
        let id = id.ok_or_else(user_not_found)?;
        if !store.approve_user(id).await? {
            return Err(user_not_found());
        }
        tracing::info!(user_id = id, "user approved");
        Ok(())
    }

    pub async fn reject(store: &dyn Store, id: Option<i64>) -> Result<(), AppError> {
        let id = id.ok_or_else(user_not_found)?;
        if !store.delete_user(id).await? {
            return Err(user_not_found());
        }
        tracing::info!(user_id = id, "user rejected");
        Ok(())
    }

    /// Change one profile field. Only name, email and contact are accepted, and values are
    /// stored as given: the signup format rules are not re-applied here.
    pub async fn update_field(
        store: &dyn Store,
        id: Option<i64>,
        req: UpdateFieldRequest,
    ) -> Result<UserField, AppError> {
        let field = req
            .field
            .as_deref()
            .and_then(UserField::parse)
            .ok_or_else(|| AppError::BadRequest("Invalid field".into()))?;
        let id = id.ok_or_else(user_not_found)?;
        if !store
            .update_user_field(id, field, req.value.as_deref())
            .await?
        {
            return Err(user_not_found());
        }
        Ok(field)
    }

    pub async fn by_userid(store: &dyn Store, userid: &str) -> Result<UserProfile, AppError> {
        store
            .find_user_by_userid(userid)
            .await?
            .map(|u| u.summary())
            .ok_or_else(user_not_found)
    }

    /// Insert the bootstrap admin unless some admin already exists. Returns whether one was created.
    pub async fn seed_admin(store: &dyn Store, seed: &AdminSeed) -> Result<bool, AppError> {
        if store.admin_exists().await? {
            tracing::info!("admin user already exists");
            return Ok(false);
        }
        store
            .insert_user(NewUser {
                name: Some(seed.name.clone()),
                userid: seed.userid.clone(),
                password: hash_password(&seed.password)?,
                email: None,
                contact: None,
                approved: true,
                role: Role::Admin,
            })
            .await?;
        tracing::info!(userid = %seed.userid, "default admin created");
        Ok(true)
    }
}
