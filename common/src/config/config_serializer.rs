use serde::{Deserialize, Serialize};

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn serialize<TConfig: Serialize>(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    pub fn deserialize<TConfig: for<'de> Deserialize<'de>>(
        &self,
        content: &str,
    ) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}
