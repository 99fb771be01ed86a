// Tests for configuration loading and provider selection.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;

use pravas::pipeline::build_provider;
use pravas::Config;

const SAMPLE: &str = r#"
[service]
name = "pravas"

[service.http]
bind = "127.0.0.1"
port = 8080

[languages]
source = "mr"
target = "en"
source_name = "Marathi"
target_name = "English"

[storage]
base_url = "http://localhost:9000"
bucket = "trip-audio"

[providers]
default = "openai"

[providers.openai]
api_key = "sk-test"
"#;

fn write_config(dir: &TempDir, contents: &str) -> Result<String> {
    let path = dir.path().join("pravas.toml");
    fs::write(&path, contents)?;
    Ok(dir
        .path()
        .join("pravas")
        .to_string_lossy()
        .into_owned())
}

#[test]
fn load_fills_provider_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, SAMPLE)?;

    let cfg = Config::load(&path)?;

    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.languages.source, "mr");
    assert_eq!(cfg.storage.bucket, "trip-audio");

    let openai = cfg.providers.openai.expect("openai section");
    assert_eq!(openai.base_url, "https://api.openai.com");
    assert_eq!(openai.transcription_model, "whisper-1");
    assert_eq!(openai.translation_model, "gpt-4o");
    Ok(())
}

#[test]
fn build_provider_selects_by_name() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, SAMPLE)?;
    let cfg = Config::load(&path)?;

    let provider = build_provider(reqwest::Client::new(), &cfg.providers, &cfg.languages)?;
    assert_eq!(provider.name(), "openai");
    Ok(())
}

#[test]
fn build_provider_rejects_unknown_names() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, &SAMPLE.replace("default = \"openai\"", "default = \"acme\""))?;
    let cfg = Config::load(&path)?;

    let err = build_provider(reqwest::Client::new(), &cfg.providers, &cfg.languages)
        .expect_err("unknown provider");
    assert!(err.to_string().contains("unknown speech provider"));
    Ok(())
}

#[test]
fn build_provider_requires_matching_section() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        &SAMPLE.replace("default = \"openai\"", "default = \"sarvam\""),
    )?;
    let cfg = Config::load(&path)?;

    let err = build_provider(reqwest::Client::new(), &cfg.providers, &cfg.languages)
        .expect_err("sarvam section missing");
    assert!(err.to_string().contains("providers.sarvam"));
    Ok(())
}

#[test]
fn environment_overrides_file_values() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, SAMPLE)?;

    std::env::set_var("PRAVAS_SERVICE__HTTP__PORT", "9191");
    let cfg = Config::load(&path);
    std::env::remove_var("PRAVAS_SERVICE__HTTP__PORT");

    assert_eq!(cfg?.service.http.port, 9191);
    Ok(())
}
