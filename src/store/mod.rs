//! Appointment persistence. The HTTP layer only sees `Store`; how a
//! backend names its identifier field stays inside the backend.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::config::StoreKind;
use crate::error::Result;
use crate::models::{Appointment, NewAppointment};

#[derive(Clone)]
pub enum Store {
    Mongo(MongoStore),
    Memory(MemoryStore),
}

impl Store {
    pub async fn connect(kind: &StoreKind) -> Result<Self> {
        match kind {
            StoreKind::Mongo { uri, db_name } => Ok(Store::Mongo(MongoStore::connect(uri, db_name).await?)),
            StoreKind::Memory => {
                tracing::warn!("using in-memory appointment store, records will not survive a restart");
                Ok(Store::Memory(MemoryStore::new()))
            }
        }
    }

    pub async fn create(&self, new: NewAppointment) -> Result<Appointment> {
        match self {
            Store::Mongo(store) => store.create(new).await,
            Store::Memory(store) => store.create(new),
        }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>> {
        match self {
            Store::Mongo(store) => store.list().await,
            Store::Memory(store) => store.list(),
        }
    }

    /// Returns whether a record was removed.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        match self {
            Store::Mongo(store) => store.delete_by_id(id).await,
            Store::Memory(store) => store.delete_by_id(id),
        }
    }

    pub async fn shutdown(self) {
        if let Store::Mongo(store) = self {
            store.shutdown().await;
        }
    }
}
