//! Vehicle registration actions.

use tracing::{debug, info};

use farol_core::inputs::{CreateVehicleInput, UpdateVehicleInput};

use super::{record_path, WriteResponse};
use crate::api::ApiClient;
use crate::error::ActionError;
use crate::models::{VehicleList, VehicleRecord};
use crate::session::Session;

pub async fn create_vehicle(
    api: &ApiClient,
    session: &Session,
    input: &CreateVehicleInput,
) -> Result<WriteResponse, ActionError> {
    debug!(plate = %input.plate, client_id = %input.client_id, "create_vehicle action");

    let vehicle = input.validate()?;
    let response = api.post("vehicles", session, &vehicle).await?;

    info!(plate = %vehicle.plate, "Vehicle created");
    Ok(response)
}

pub async fn update_vehicle(
    api: &ApiClient,
    session: &Session,
    id: &str,
    input: &UpdateVehicleInput,
) -> Result<WriteResponse, ActionError> {
    debug!(vehicle_id = %id, "update_vehicle action");

    let path = record_path("vehicles", "Veículo", id)?;
    let changes = input.validate()?;
    let response = api.patch(&path, session, &changes).await?;

    info!(vehicle_id = %id, "Vehicle updated");
    Ok(response)
}

pub async fn delete_vehicle(api: &ApiClient, session: &Session, id: &str) -> Result<(), ActionError> {
    debug!(vehicle_id = %id, "delete_vehicle action");

    let path = record_path("vehicles", "Veículo", id)?;
    api.delete(&path, session).await?;

    info!(vehicle_id = %id, "Vehicle deleted");
    Ok(())
}

pub async fn list_vehicles(api: &ApiClient, session: &Session) -> Result<Vec<VehicleRecord>, ActionError> {
    debug!("list_vehicles action");

    let response = api.get::<VehicleList>("vehicles", session).await?;
    Ok(response.data.unwrap_or_default().vehicles)
}
