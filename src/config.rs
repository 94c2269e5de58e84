/// Configuration for the ollama-backed classifier. The tool is invoked as
/// `<binary> run <model>` with the prompt on stdin.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub binary: String,
    pub model: String,
}

impl OllamaConfig {
    pub const DEFAULT_BINARY: &'static str = "ollama";
    pub const DEFAULT_MODEL: &'static str = "mistral";
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            binary: Self::DEFAULT_BINARY.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_config_default() {
        let config = OllamaConfig::default();
        assert_eq!(config.binary, "ollama");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.model, OllamaConfig::DEFAULT_MODEL);
    }
}
