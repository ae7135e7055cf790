use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{Appointment, NewAppointment};
use crate::store::Store;

pub const NOT_FOUND_MESSAGE: &str = "Appointment not found";

pub async fn create_appointment(store: &Store, new: NewAppointment) -> Result<Appointment> {
    let appointment = store.create(new).await?;
    info!("Created appointment {} ({})", appointment.id, appointment.title);
    Ok(appointment)
}

pub async fn list_appointments(store: &Store) -> Result<Vec<Appointment>> {
    let appointments = store.list().await?;
    debug!("Listed {} appointments", appointments.len());
    Ok(appointments)
}

/// Fails with `AppError::NotFound` when no appointment has the given id.
pub async fn delete_appointment(store: &Store, id: &str) -> Result<()> {
    if !store.delete_by_id(id).await? {
        debug!("No appointment {} to delete", id);
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }
    info!("Deleted appointment {}", id);
    Ok(())
}
