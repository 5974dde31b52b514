use std::{net::TcpListener, time::Duration};

use anyhow::Context;
use harvest::{
    configuration::get_configuration,
    services::{Crawler, Fetcher, ReqwestGet, Store, UserAgentPool},
    startup::run,
    telemetry::init_logger,
};
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    init_logger(&configuration.log);

    let pool_options = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10));
    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());
    let store = Store::new(connection_pool);

    let client = ReqwestGet::new().context("Failed to build http client.")?;
    let fetcher = Fetcher::new(client, &configuration.crawler);
    let user_agents = UserAgentPool::new(configuration.crawler.user_agents.clone());
    let crawler = Crawler::new(fetcher, store.clone(), user_agents);

    crawler
        .run(&configuration.crawler.urls)
        .await
        .context("Crawl aborted.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Serving crawled data on http://{}", address);

    run(listener, store.clone())?.await?;
    store.close().await;

    Ok(())
}
