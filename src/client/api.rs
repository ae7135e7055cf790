use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::models::{Appointment, NewAppointment};

/// The three appointment operations the client state depends on.
#[allow(async_fn_in_trait)]
pub trait AppointmentApi {
    async fn list(&self) -> Result<Vec<Appointment>>;
    async fn create(&self, new: &NewAppointment) -> Result<Appointment>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// HTTP client for the appointments backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    appointments_url: Url,
}

impl ApiClient {
    pub fn new(backend_uri: &Url) -> Result<Self> {
        let mut base = backend_uri.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let appointments_url = base
            .join("appointments")
            .with_context(|| format!("Invalid backend uri {}", backend_uri))?;

        Ok(Self {
            http: Client::new(),
            appointments_url,
        })
    }

    pub fn appointments_url(&self) -> &Url {
        &self.appointments_url
    }

    fn appointment_url(&self, id: &str) -> Result<Url> {
        let mut url = self.appointments_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Backend uri cannot be a base: {}", self.appointments_url))?
            .push(id);
        Ok(url)
    }
}

impl AppointmentApi for ApiClient {
    async fn list(&self) -> Result<Vec<Appointment>> {
        let appointments = self
            .http
            .get(self.appointments_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(appointments)
    }

    async fn create(&self, new: &NewAppointment) -> Result<Appointment> {
        let appointment = self
            .http
            .post(self.appointments_url.clone())
            .json(new)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(appointment)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .delete(self.appointment_url(id)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
