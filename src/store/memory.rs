use std::sync::{Arc, Mutex};

use mongodb::bson::oid::ObjectId;

use crate::error::{AppError, Result};
use crate::models::{Appointment, NewAppointment};

/// Process-local store keeping records in insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, new: NewAppointment) -> Result<Appointment> {
        let appointment = new.validate()?.with_id(ObjectId::new().to_hex());
        self.lock()?.push(appointment.clone());
        Ok(appointment)
    }

    pub fn list(&self) -> Result<Vec<Appointment>> {
        Ok(self.lock()?.clone())
    }

    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut appointments = self.lock()?;
        match appointments.iter().position(|a| a.id == id) {
            Some(index) => {
                appointments.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Leaves the mutex poisoned so every later operation fails.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let appointments = Arc::clone(&self.appointments);
        let _ = std::thread::spawn(move || {
            let _guard = appointments.lock();
            panic!("poisoning appointment store");
        })
        .join();
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Appointment>>> {
        self.appointments
            .lock()
            .map_err(|_| AppError::Internal("appointment store lock poisoned".to_string()))
    }
}
