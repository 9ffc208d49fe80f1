pub mod config;
pub mod gui;
pub mod logging;
pub mod math;
pub mod model;

use thiserror::Error;

pub use config::{CliArgs, Config, ConfigError, ConfigOrigin};
pub use math::MathError;
pub use model::CatalogError;

/// Anything that can go wrong while starting up.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
