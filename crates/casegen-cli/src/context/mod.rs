mod app_context;
mod config_warnings;

pub use app_context::{AppContext, query_index};
pub use config_warnings::warn_unconfigured;

use casegen_config::CasegenConfig;

/// Load `.env` (if present) and the layered configuration.
pub fn load_config() -> anyhow::Result<CasegenConfig> {
    CasegenConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
