//! Client registration actions.

use tracing::{debug, info};

use farol_core::inputs::{CreateClientInput, UpdateClientInput};

use super::{record_path, WriteResponse};
use crate::api::ApiClient;
use crate::error::ActionError;
use crate::models::{ClientList, ClientRecord};
use crate::session::Session;

pub async fn create_client(
    api: &ApiClient,
    session: &Session,
    input: &CreateClientInput,
) -> Result<WriteResponse, ActionError> {
    debug!(name = %input.name, "create_client action");

    let client = input.validate()?;
    let response = api.post("clients", session, &client).await?;

    info!(kind = %client.cpf_cnpj.kind(), "Client created");
    Ok(response)
}

pub async fn update_client(
    api: &ApiClient,
    session: &Session,
    id: &str,
    input: &UpdateClientInput,
) -> Result<WriteResponse, ActionError> {
    debug!(client_id = %id, "update_client action");

    let path = record_path("clients", "Cliente", id)?;
    let changes = input.validate()?;
    let response = api.patch(&path, session, &changes).await?;

    info!(client_id = %id, "Client updated");
    Ok(response)
}

pub async fn delete_client(api: &ApiClient, session: &Session, id: &str) -> Result<(), ActionError> {
    debug!(client_id = %id, "delete_client action");

    let path = record_path("clients", "Cliente", id)?;
    api.delete(&path, session).await?;

    info!(client_id = %id, "Client deleted");
    Ok(())
}

/// All clients with their vehicles. A success without data is an empty list.
pub async fn list_clients(api: &ApiClient, session: &Session) -> Result<Vec<ClientRecord>, ActionError> {
    debug!("list_clients action");

    let response = api.get::<ClientList>("clients", session).await?;
    Ok(response.data.unwrap_or_default().clients)
}
