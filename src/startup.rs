use std::net::TcpListener;

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};

use crate::{routes, services::Store};

/// Registers the read-only routes. Expects a `Data<Store>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::dashboard)
        .service(routes::health_check)
        .service(web::scope("/api").service(routes::crawled_data));
}

pub fn run(listener: TcpListener, store: Store) -> Result<Server, std::io::Error> {
    let store = Data::new(store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure)
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
