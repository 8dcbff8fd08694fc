//! Database connectors shared by the inventory services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and configuration
//! - `config` - `core_config::FromEnv` support for the configuration types
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017");
//! let client = mongodb::connect_from_config(&config).await?;
//! let collection = client
//!     .database(config.database())
//!     .collection::<Document>(config.collection());
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
