use tabletime::{
    configuration::Settings,
    startup::Application,
    sweeper::spawn_expiry_sweeper,
    telemetry::{get_subscriber, init_subscriber}
};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("Tabletime".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get();

    let Application { server, pool, .. } = Application::new(config).await?;

    spawn_expiry_sweeper(pool);

    server.await?;
    Ok(())
}
