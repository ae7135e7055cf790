use crate::store::Store;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

/// Reports which store backend is serving requests.
#[get("")]
async fn status(store: web::Data<Store>) -> impl Responder {
    let backend = match store.get_ref() {
        Store::Mongo(_) => "mongo",
        Store::Memory(_) => "memory",
    };
    HttpResponse::Ok().json(json!({ "status": "ok", "store": backend }))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use serde_json::Value;

    #[actix_web::test]
    async fn ping_pongs() {
        let app = test::init_service(App::new().configure(crate::routes::init)).await;
        let resp = test::call_service(&app, TestRequest::get().uri("/health/ping").to_request()).await;
        assert_eq!(StatusCode::OK, resp.status());
        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..], b"pong");
    }

    #[actix_web::test]
    async fn status_names_backend() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Store::Memory(MemoryStore::new())))
                .configure(crate::routes::init),
        )
        .await;
        let body: Value =
            test::call_and_read_body_json(&app, TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(body["store"], "memory");
    }
}
