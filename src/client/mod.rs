//! Client side of the appointment board: an HTTP API client, the state
//! controller holding the in-memory list, and a text view of it.

pub mod api;
pub mod command;
pub mod controller;
pub mod reorder;
pub mod view;

pub use api::{ApiClient, AppointmentApi};
pub use controller::Controller;
pub use reorder::reorder;
