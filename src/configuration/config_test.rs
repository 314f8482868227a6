use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use super::Config;
use super::ConfigKey;
use crate::application::cli;
use crate::domain::models::Tone;

fn config_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    return Ok(file);
}

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>();
    assert!(doc.is_ok());

    let doc = doc.unwrap();
    assert_eq!(
        doc.get("server-url").and_then(|e| return e.as_str()),
        Some("http://localhost:5000")
    );
    assert_eq!(
        doc.get("tone").and_then(|e| return e.as_str()),
        Some("professional")
    );
    assert!(res.contains("[possible values: professional, inspirational, storytelling, humorous]"));
    assert!(res.contains("# [[accounts]]"));
}

#[test]
fn it_has_defaults() {
    assert_eq!(Config::default(ConfigKey::ServerURL), "http://localhost:5000");
    assert_eq!(Config::default(ConfigKey::Tone), "professional");
    assert!(Config::default(ConfigKey::ConfigFile).ends_with("linkpost/config.toml"));
}

#[tokio::test]
async fn it_loads_config_from_file_and_rejects_invalid_values() -> Result<()> {
    let good = config_file(
        r#"
server-url = "http://127.0.0.1:9000"
tone = "humorous"
"#,
    )?;
    let good_path = good.path().to_string_lossy().to_string();
    let matches = cli::build().try_get_matches_from(vec!["linkpost", "-c", &good_path])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ServerURL), "http://127.0.0.1:9000");
    assert_eq!(Config::tone(), Tone::Humorous);
    assert_eq!(Config::get(ConfigKey::ConfigFile), good_path);

    let bad = config_file(r#"tone = "sarcastic""#)?;
    let bad_path = bad.path().to_string_lossy().to_string();
    let matches = cli::build().try_get_matches_from(vec!["linkpost", "-c", &bad_path])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    return Ok(());
}
