mod error;
pub mod lambda;
pub mod models;
pub mod pagination;
pub mod router;
mod server;
pub mod services;
pub mod state;
pub(crate) mod utils;
mod validation;

pub use error::ApiError;
pub use router::{ApiRequest, ApiResponse, MovieRouter, Route};
pub use server::{app, run};
pub use validation::{PayloadError, parse_movie};
