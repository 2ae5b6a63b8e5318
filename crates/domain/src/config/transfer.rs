use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransferConfig {
    /// IP literals allowed to request AXFR/IXFR.
    #[serde(default)]
    pub allow: Vec<String>,
}
