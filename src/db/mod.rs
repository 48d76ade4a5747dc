pub mod diesel_pool;
pub mod memory;
pub mod postgres;
pub mod redis_config;
pub mod redis_pool;
pub mod store;

pub use diesel_pool::{
    create_diesel_pool, mask_connection_string, DieselDatabaseConfig, DieselPool, MIGRATIONS,
};
pub use memory::MemoryLinkStore;
pub use postgres::PgLinkStore;
pub use redis_config::RedisConfig;
pub use redis_pool::{RedisHealth, RedisPool};
pub use store::{AnalyticsPage, LinkStore, StoreError};
