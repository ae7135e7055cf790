use chrono::{DateTime, NaiveTime};
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{Appointment, NewAppointment, ValidAppointment};

const COLLECTION_NAME: &str = "appointments";

/// Document layout in the `appointments` collection. Dates are stored as
/// BSON datetimes at UTC midnight.
#[derive(Debug, Serialize, Deserialize)]
struct AppointmentDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    date: bson::DateTime,
    time: String,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

impl AppointmentDocument {
    fn from_valid(id: ObjectId, valid: &ValidAppointment) -> Self {
        let midnight = valid.date.and_time(NaiveTime::MIN).and_utc();
        Self {
            id,
            title: valid.title.clone(),
            description: valid.description.clone(),
            date: bson::DateTime::from_millis(midnight.timestamp_millis()),
            time: valid.time.clone(),
            created_at: bson::DateTime::from_millis(valid.created_at.timestamp_millis()),
        }
    }

    fn into_appointment(self) -> Result<Appointment> {
        let date = chrono_from_bson(self.date)?.date_naive();
        Ok(Appointment {
            id: self.id.to_hex(),
            title: self.title,
            description: self.description,
            date,
            time: self.time,
            created_at: chrono_from_bson(self.created_at)?,
        })
    }
}

fn chrono_from_bson(value: bson::DateTime) -> Result<DateTime<chrono::Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| AppError::Internal(format!("stored timestamp out of range: {}", value)))
}

#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connects and pings the server so a bad connection string fails
    /// at startup rather than on the first request.
    pub async fn connect(uri: &str, fallback_db: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_db));
        db.run_command(doc! { "ping": 1 }).await?;
        info!("MongoDB connected, using database {}", db.name());
        Ok(Self { client, db })
    }

    pub async fn create(&self, new: NewAppointment) -> Result<Appointment> {
        let valid = new.validate()?;
        let document = AppointmentDocument::from_valid(ObjectId::new(), &valid);
        self.collection().insert_one(&document).await?;
        Ok(valid.with_id(document.id.to_hex()))
    }

    pub async fn list(&self) -> Result<Vec<Appointment>> {
        let mut cursor = self.collection().find(doc! {}).await?;
        let mut appointments = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            appointments.push(document.into_appointment()?);
        }
        Ok(appointments)
    }

    /// An id that is not a valid ObjectId cannot name a stored record, so
    /// it is reported as absent.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self.collection().delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB connection closed");
    }

    fn collection(&self) -> Collection<AppointmentDocument> {
        self.db.collection(COLLECTION_NAME)
    }
}
