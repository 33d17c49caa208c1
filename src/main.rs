use std::env;

use dotenv::dotenv;
use log::info;

use warbler::db;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to create pool");

    db::create_all(&pool).await.expect("Failed to create tables");
    info!("Database ready at {}", database_url);
}
