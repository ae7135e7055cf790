use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};

use crate::routes;
use crate::store::Store;

/// Builds the HTTP server over an already bound listener.
pub fn build(store: Store, listener: TcpListener) -> std::io::Result<Server> {
    let store = web::Data::new(store);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::init)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
