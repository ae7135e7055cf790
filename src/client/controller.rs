use tracing::{debug, error};

use crate::client::api::AppointmentApi;
use crate::client::reorder::reorder;
use crate::client::view::{self, DragSession, Draft, Field, ViewState};
use crate::models::Appointment;

/// Holds the client's single in-memory snapshot of the appointment list
/// and keeps it in step with the backend after each mutation.
///
/// Failures are logged and leave the previous state in place.
pub struct Controller<A> {
    api: A,
    appointments: Vec<Appointment>,
    view: ViewState,
}

impl<A: AppointmentApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            appointments: Vec::new(),
            view: ViewState::default(),
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replaces the list with the backend's. Any local ordering is lost.
    pub async fn mount(&mut self) {
        match self.api.list().await {
            Ok(appointments) => {
                debug!("Fetched {} appointments", appointments.len());
                self.appointments = appointments;
            }
            Err(e) => error!("Error fetching appointments: {:#}", e),
        }
    }

    pub fn open_dialog(&mut self) {
        if self.view.dialog.is_none() {
            self.view.dialog = Some(Draft::default());
        }
    }

    /// Returns `false` when the dialog is closed.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.view.dialog.as_mut() {
            Some(draft) => {
                draft.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.view.dialog = None;
    }

    /// Submits the dialog's draft. On success the new record is appended
    /// and the dialog closes; on failure the dialog keeps its values.
    pub async fn add(&mut self) {
        let Some(draft) = &self.view.dialog else {
            error!("Add requested with no open dialog");
            return;
        };

        let request = draft.to_request();

        match self.api.create(&request).await {
            Ok(appointment) => {
                self.appointments.push(appointment);
                self.view.dialog = None;
            }
            Err(e) => error!("Error adding appointment: {:#}", e),
        }
    }

    pub async fn delete(&mut self, id: &str) {
        if id.is_empty() {
            error!("Invalid appointment ID");
            return;
        }

        match self.api.delete(id).await {
            Ok(()) => self.appointments.retain(|a| a.id != id),
            Err(e) => error!("Error deleting appointment {}: {:#}", id, e),
        }
    }

    /// Deletes the appointment shown at `index`.
    pub async fn delete_at(&mut self, index: usize) {
        match self.appointments.get(index).map(|a| a.id.clone()) {
            Some(id) => self.delete(&id).await,
            None => error!("No appointment at position {}", index),
        }
    }

    /// Local-only reorder; nothing is sent to the backend.
    pub fn move_appointment(&mut self, from: usize, to: usize) {
        let appointments = std::mem::take(&mut self.appointments);
        self.appointments = reorder(appointments, from, to);
    }

    pub fn toggle_summary(&mut self) {
        self.view.summary = !self.view.summary;
    }

    /// Starts dragging the row at `index`. Only board mode rows drag.
    pub fn begin_drag(&self, index: usize) -> Option<DragSession> {
        if self.view.summary || index >= self.appointments.len() {
            return None;
        }
        Some(DragSession { index })
    }

    pub fn drag_hover(&mut self, drag: &mut DragSession, target: usize) {
        if target >= self.appointments.len() {
            return;
        }
        if let Some((from, to)) = drag.hover(target) {
            self.move_appointment(from, to);
        }
    }

    pub fn render(&self) -> Vec<String> {
        view::render(&self.appointments, &self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAppointment;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeApi {
        stored: RefCell<Vec<Appointment>>,
        calls: RefCell<Vec<String>>,
        failing: Cell<bool>,
        next_id: Cell<u32>,
    }

    impl FakeApi {
        fn with(titles: &[&str]) -> Self {
            let api = Self::default();
            for title in titles {
                api.insert(NewAppointment::new(*title, "desc", "2024-05-01", "10:00"))
                    .unwrap();
            }
            api
        }

        fn insert(&self, new: NewAppointment) -> anyhow::Result<Appointment> {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let appointment = new.validate()?.with_id(format!("id-{}", id));
            self.stored.borrow_mut().push(appointment.clone());
            Ok(appointment)
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn check(&self, call: String) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(call);
            if self.failing.get() {
                anyhow::bail!("backend unreachable");
            }
            Ok(())
        }
    }

    impl AppointmentApi for FakeApi {
        async fn list(&self) -> anyhow::Result<Vec<Appointment>> {
            self.check("list".to_string())?;
            Ok(self.stored.borrow().clone())
        }

        async fn create(&self, new: &NewAppointment) -> anyhow::Result<Appointment> {
            self.check("create".to_string())?;
            self.insert(new.clone())
        }

        async fn delete(&self, id: &str) -> anyhow::Result<()> {
            self.check(format!("delete {}", id))?;
            let mut stored = self.stored.borrow_mut();
            let before = stored.len();
            stored.retain(|a| a.id != id);
            if stored.len() == before {
                anyhow::bail!("404 Not Found");
            }
            Ok(())
        }
    }

    fn titles<A: AppointmentApi>(controller: &Controller<A>) -> Vec<String> {
        controller.appointments().iter().map(|a| a.title.clone()).collect()
    }

    #[tokio::test]
    async fn mount_loads_list() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B"]));
        controller.mount().await;
        assert_eq!(titles(&controller), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn failed_mount_leaves_list_empty() {
        let api = FakeApi::with(&["A"]);
        api.failing.set(true);
        let mut controller = Controller::new(api);
        controller.mount().await;
        assert!(controller.appointments().is_empty());
    }

    #[tokio::test]
    async fn reorder_issues_no_request_and_is_lost_on_remount() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B", "C"]));
        controller.mount().await;

        controller.move_appointment(0, 2);
        assert_eq!(titles(&controller), vec!["B", "C", "A"]);
        assert_eq!(controller.api().calls(), vec!["list"]);

        controller.mount().await;
        assert_eq!(titles(&controller), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn add_appends_and_closes_dialog() {
        let mut controller = Controller::new(FakeApi::default());
        controller.open_dialog();
        controller.set_field(Field::Title, "Dentist");
        controller.set_field(Field::Description, "Checkup");
        controller.set_field(Field::Date, "2024-05-01");
        controller.set_field(Field::Time, "09:00");
        controller.add().await;

        assert_eq!(titles(&controller), vec!["Dentist"]);
        assert_eq!(controller.view().dialog, None);
    }

    #[tokio::test]
    async fn failed_add_keeps_dialog_and_fields() {
        let mut controller = Controller::new(FakeApi::default());
        controller.open_dialog();
        controller.set_field(Field::Title, "Dentist");
        controller.add().await;

        assert!(controller.appointments().is_empty());
        let draft = controller.view().dialog.as_ref().unwrap();
        assert_eq!(draft.title, "Dentist");
    }

    #[tokio::test]
    async fn cancel_discards_draft() {
        let mut controller = Controller::new(FakeApi::default());
        controller.open_dialog();
        controller.set_field(Field::Title, "Dentist");
        controller.cancel_dialog();
        assert_eq!(controller.view().dialog, None);
        assert!(!controller.set_field(Field::Title, "ignored"));

        controller.open_dialog();
        assert_eq!(controller.view().dialog, Some(Draft::default()));
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_by_id() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B"]));
        controller.mount().await;
        controller.delete("id-1").await;
        assert_eq!(titles(&controller), vec!["B"]);
    }

    #[tokio::test]
    async fn failed_delete_keeps_list() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B"]));
        controller.mount().await;
        controller.delete("id-9").await;
        assert_eq!(titles(&controller), vec!["A", "B"]);

        controller.delete("").await;
        assert_eq!(controller.api().calls(), vec!["list", "delete id-9"]);
    }

    #[tokio::test]
    async fn drag_moves_row_through_hovers() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B", "C"]));
        controller.mount().await;

        let mut drag = controller.begin_drag(0).unwrap();
        controller.drag_hover(&mut drag, 1);
        assert_eq!(titles(&controller), vec!["B", "A", "C"]);
        controller.drag_hover(&mut drag, 2);
        assert_eq!(titles(&controller), vec!["B", "C", "A"]);

        controller.toggle_summary();
        assert!(controller.begin_drag(0).is_none());
    }

    #[tokio::test]
    async fn delete_at_uses_displayed_position() {
        let mut controller = Controller::new(FakeApi::with(&["A", "B", "C"]));
        controller.mount().await;
        controller.move_appointment(2, 0);
        controller.delete_at(0).await;
        assert_eq!(titles(&controller), vec!["A", "B"]);
        assert_eq!(controller.api().calls(), vec!["list", "delete id-3"]);
    }
}
