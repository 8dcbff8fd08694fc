//! Configuration for the inventory gRPC service

use core_config::FromEnv;
use database::mongodb::MongoConfig;
use domain_inventory::StreamSettings;
use eyre::WrapErr;
use grpc_server::ServerConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub mongodb: MongoConfig,
    pub grpc: ServerConfig,
    pub stream: StreamSettings,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env().wrap_err("Invalid MongoDB configuration")?;
        let grpc = ServerConfig::from_env().wrap_err("Invalid gRPC server configuration")?;
        let stream = StreamSettings::from_env().wrap_err("Invalid stream configuration")?;

        Ok(Self {
            environment,
            mongodb,
            grpc,
            stream,
        })
    }
}
