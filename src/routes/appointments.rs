use crate::error::{AppError, MessageBody};
use crate::handlers::appointments::{create_appointment, delete_appointment, list_appointments};
use crate::models::NewAppointment;
use crate::store::Store;
use actix_web::{HttpResponse, Responder, delete, get, post, web};

#[post("")]
async fn create(store: web::Data<Store>, body: web::Json<NewAppointment>) -> impl Responder {
    match create_appointment(&store, body.into_inner()).await {
        Ok(appointment) => HttpResponse::Created().json(appointment),
        Err(e) => e.into_response("Error creating appointment"),
    }
}

#[get("")]
async fn list(store: web::Data<Store>) -> impl Responder {
    match list_appointments(&store).await {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(e) => e.into_response("Error fetching appointments"),
    }
}

#[delete("/{id}")]
async fn remove(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match delete_appointment(&store, &id).await {
        Ok(()) => HttpResponse::Ok().json(MessageBody::new("Appointment deleted successfully")),
        Err(e) => e.into_response("Error deleting appointment"),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .service(create)
    .service(list)
    .service(remove);
}
