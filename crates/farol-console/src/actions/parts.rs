//! Inventory actions.
//!
//! The order dialog takes its stock snapshot from [`list_parts`].

use tracing::{debug, info};

use farol_core::inputs::{CreatePartInput, UpdatePartInput};
use farol_core::Part;

use super::{record_path, WriteResponse};
use crate::api::ApiClient;
use crate::error::ActionError;
use crate::models::PartList;
use crate::session::Session;

pub async fn create_part(
    api: &ApiClient,
    session: &Session,
    input: &CreatePartInput,
) -> Result<WriteResponse, ActionError> {
    debug!(name = %input.name, quantity = input.quantity, "create_part action");

    let part = input.validate()?;
    let response = api.post("parts", session, &part).await?;

    info!(name = %part.name, unit_price = %part.unit_price, "Part created");
    Ok(response)
}

pub async fn update_part(
    api: &ApiClient,
    session: &Session,
    id: &str,
    input: &UpdatePartInput,
) -> Result<WriteResponse, ActionError> {
    debug!(part_id = %id, "update_part action");

    let path = record_path("parts", "Peça", id)?;
    let changes = input.validate()?;
    let response = api.patch(&path, session, &changes).await?;

    info!(part_id = %id, "Part updated");
    Ok(response)
}

pub async fn delete_part(api: &ApiClient, session: &Session, id: &str) -> Result<(), ActionError> {
    debug!(part_id = %id, "delete_part action");

    let path = record_path("parts", "Peça", id)?;
    api.delete(&path, session).await?;

    info!(part_id = %id, "Part deleted");
    Ok(())
}

pub async fn list_parts(api: &ApiClient, session: &Session) -> Result<Vec<Part>, ActionError> {
    debug!("list_parts action");

    let response = api.get::<PartList>("parts", session).await?;
    Ok(response.data.unwrap_or_default().parts)
}
