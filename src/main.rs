use std::io;

use dotenvy::dotenv;
use order_crud::config::{Config, StorageBackend};
use order_crud::domain::ports::OrderRepository;
use order_crud::infrastructure::{DieselOrderRepository, InMemoryOrderRepository};
use order_crud::{build_server, create_pool, run_migrations, OrderService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let repo: Box<dyn OrderRepository> = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).map_err(io::Error::other)?;
            run_migrations(&pool).map_err(io::Error::other)?;
            Box::new(DieselOrderRepository::new(pool))
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; orders are lost on restart");
            Box::new(InMemoryOrderRepository::new())
        }
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(OrderService::new(repo), &config.host, config.port)?.await
}
