//! Console user management actions.
//!
//! The pages behind these are only reachable by `SUPER_ADMIN` (see
//! [`crate::access`]); the backend enforces the same rule.

use tracing::{debug, info};

use farol_core::inputs::{CreateUserInput, UpdateUserInput};

use super::{record_path, WriteResponse};
use crate::api::ApiClient;
use crate::error::ActionError;
use crate::models::{UserList, UserRecord};
use crate::session::Session;

pub async fn create_user(
    api: &ApiClient,
    session: &Session,
    input: &CreateUserInput,
) -> Result<WriteResponse, ActionError> {
    debug!(email = %input.email, role = ?input.role, "create_user action");

    let user = input.validate()?;
    let response = api.post("users", session, &user).await?;

    info!(email = %user.email, "User created");
    Ok(response)
}

pub async fn update_user(
    api: &ApiClient,
    session: &Session,
    id: &str,
    input: &UpdateUserInput,
) -> Result<WriteResponse, ActionError> {
    debug!(user_id = %id, "update_user action");

    let path = record_path("users", "Usuário", id)?;
    let changes = input.validate()?;
    let response = api.patch(&path, session, &changes).await?;

    info!(user_id = %id, password_changed = changes.password.is_some(), "User updated");
    Ok(response)
}

pub async fn delete_user(api: &ApiClient, session: &Session, id: &str) -> Result<(), ActionError> {
    debug!(user_id = %id, "delete_user action");

    let path = record_path("users", "Usuário", id)?;
    api.delete(&path, session).await?;

    info!(user_id = %id, "User deleted");
    Ok(())
}

pub async fn list_users(api: &ApiClient, session: &Session) -> Result<Vec<UserRecord>, ActionError> {
    debug!("list_users action");

    let response = api.get::<UserList>("users", session).await?;
    Ok(response.data.unwrap_or_default().users)
}
