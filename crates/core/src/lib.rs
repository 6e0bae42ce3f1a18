pub mod config;
pub mod error;
pub mod types;

pub use config::{parse_garden_toml, parse_garden_toml_str};
pub use error::{Error, Result};
pub use types::*;
