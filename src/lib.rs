//! Shop demo: REST CRUD resources for the Demo entities over PostgreSQL.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod page;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use domain::{Demo, Demo1, Demo2, Demo3, Entity, ListingMode};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_entity_tables};
pub use page::{Page, PageRequest};
pub use response::Alerts;
pub use routes::{api_routes, app_router, common_routes, common_routes_with_ready, entity_routes};
pub use service::CrudService;
pub use state::{AppState, Backend};
pub use store::{MemoryRepository, PgRepository, Repository};
