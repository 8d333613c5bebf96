use std::net::TcpListener;
use std::time::Duration;

use actix_web::{dev::Server, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings, VenueSettings},
    routes::{get_availability, health_check, reservation, tables},
    utils::DbPool
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server,
    pub pool: DbPool
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Application, anyhow::Error>{
        let pool = get_connection_pool(&settings.database);

        let listener = TcpListener::bind((
            settings.application.host.as_str(),
            settings.application.port
        ))?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool.clone(), settings.venue)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server,
            pool
        })
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> DbPool{
    // Bounded checkout: a saturated pool surfaces as a request error
    // instead of a hang.
    Pool::builder()
        .connection_timeout(Duration::from_secs(5))
        .build_unchecked(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    venue: VenueSettings
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let venue = web::Data::new(venue);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/availability", web::get().to(get_availability))
            .route("/tables", web::get().to(tables::get_tables))
            .route("/tables", web::post().to(tables::post_table))
            .route("/reservations", web::get().to(reservation::list_reservations))
            .route("/reservations", web::post().to(reservation::post_reservation))
            .route("/reservations/{id}", web::get().to(reservation::get_reservation))
            .route("/reservations/{id}/cancel", web::patch().to(reservation::cancel_reservation))
            .app_data(pool.clone())
            .app_data(venue.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
