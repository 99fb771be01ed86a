use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub languages: LanguageConfig,
    pub storage: StorageConfig,
    pub providers: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Source/target language pair for the transcribe -> translate chain.
///
/// `source`/`target` are bare ISO 639-1 codes; the `*_name` fields are the
/// English language names used in translator prompts.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub source: String,
    pub target: String,
    pub source_name: String,
    pub target_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the object storage service.
    pub base_url: String,
    /// Bucket that holds uploaded recordings.
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Which speech provider to build at startup: "openai" or "sarvam".
    pub default: String,
    pub openai: Option<OpenAiConfig>,
    pub sarvam: Option<SarvamConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "default_translation_model")]
    pub translation_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarvamConfig {
    pub api_key: String,
    #[serde(default = "default_sarvam_base_url")]
    pub base_url: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_translation_model() -> String {
    "gpt-4o".to_string()
}

fn default_sarvam_base_url() -> String {
    "https://api.sarvam.ai".to_string()
}

impl Config {
    /// Load configuration from a TOML file plus `PRAVAS_`-prefixed
    /// environment overrides (double underscore as section separator,
    /// e.g. `PRAVAS_PROVIDERS__OPENAI__API_KEY`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("PRAVAS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
