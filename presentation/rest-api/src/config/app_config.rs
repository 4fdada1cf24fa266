use super::{
    catalog_config::CatalogConfig, cors_config, server_config::ServerConfig,
    spoonacular_config::SpoonacularConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub catalog: CatalogConfig,
    pub spoonacular: SpoonacularConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            catalog: CatalogConfig::from_env(),
            spoonacular: SpoonacularConfig::from_env(),
        }
    }
}
