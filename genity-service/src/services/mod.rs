pub mod genity;
pub mod jwt;
pub mod memory;
pub mod metrics;
pub mod postgres;
pub mod repository;

pub use genity::GenityService;
pub use jwt::{AccessTokenClaims, JwtService};
pub use memory::InMemoryGenityRepository;
pub use self::metrics::{get_metrics, init_metrics};
pub use postgres::PgGenityRepository;
pub use repository::{GenityRepository, RepositoryError};
