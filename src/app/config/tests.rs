use std::collections::HashMap;
use std::path::Path;

use crate::{
    ArcPath, ArcStr,
    app::config::{Config, PathOpt, StrOpt, USizeOpt, data::Data},
    fs::Fs,
    log::LogLevel,
};
use anyhow::Result;

#[tokio::test]
async fn test_mock_config_creation() {
    let config = Config::mock(Data::default());
    assert!(matches!(config, Config::Mock(_)));
}

#[tokio::test]
async fn test_actual_config_creation() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("test_config.toml"));
    let config = Config::spawn(fs, path);
    assert!(matches!(config, Config::Actual(_)));
}

#[tokio::test]
async fn test_mock_str_operations() {
    let config = Config::mock(Data::default());

    // Test setting and getting strings
    let new_url = ArcStr::from("http://localhost:9200");
    config.set_str(StrOpt::ApiBaseUrl, new_url.clone()).await;
    let retrieved = config.str(StrOpt::ApiBaseUrl).await;
    assert_eq!(retrieved, new_url);
}

#[tokio::test]
async fn test_mock_path_operations() {
    let config = Config::mock(Data::default());

    // Test setting and getting path
    let new_path = ArcPath::from(Path::new("/custom/path"));
    config.set_path(PathOpt::LogDir, new_path.clone()).await;
    let retrieved_path = config.path(PathOpt::LogDir).await;
    assert_eq!(retrieved_path, new_path);
}

#[tokio::test]
async fn test_mock_log_level_operations() {
    let config = Config::mock(Data::default());

    // Test default log level
    let default_level = config.log_level().await;
    assert_eq!(default_level, LogLevel::Warning);

    // Test setting and getting log level
    config.set_log_level(LogLevel::Info).await;
    let new_level = config.log_level().await;
    assert_eq!(new_level, LogLevel::Info);
}

#[tokio::test]
async fn test_mock_usize_operations() {
    let config = Config::mock(Data::default());

    // Test setting and getting usize value
    let value = 1024;
    config.set_usize(USizeOpt::MaxLogAge, value).await;
    let retrieved_value = config.usize(USizeOpt::MaxLogAge).await;
    assert_eq!(retrieved_value, value);
}

#[tokio::test]
async fn test_mock_config_load_save() -> Result<()> {
    let config = Config::mock(Data::default());

    // Load and save are no-ops that always succeed for mock
    config.load().await?;
    config.save().await?;
    Ok(())
}

#[tokio::test]
async fn test_actual_config_str_operations() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("test_config.toml"));
    let config = Config::spawn(fs, path);

    let new_addr = ArcStr::from("0.0.0.0:3000");
    config.set_str(StrOpt::ListenAddr, new_addr.clone()).await;
    let retrieved = config.str(StrOpt::ListenAddr).await;
    assert_eq!(retrieved, new_addr);
}

#[tokio::test]
async fn test_actual_config_path_operations() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("test_config.toml"));
    let config = Config::spawn(fs, path);

    // Test path operations
    let new_path = ArcPath::from(Path::new("/custom/path"));
    config.set_path(PathOpt::LogDir, new_path.clone()).await;
    let retrieved_path = config.path(PathOpt::LogDir).await;
    assert_eq!(retrieved_path, new_path);
}

#[tokio::test]
async fn test_actual_config_log_level_operations() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("test_config.toml"));
    let config = Config::spawn(fs, path);

    // Test log level operations
    config.set_log_level(LogLevel::Error).await;
    let new_level = config.log_level().await;
    assert_eq!(new_level, LogLevel::Error);
}

#[tokio::test]
async fn test_actual_config_usize_operations() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("test_config.toml"));
    let config = Config::spawn(fs, path);

    // Test usize operations
    let new_value = 1024;
    config.set_usize(USizeOpt::TopStoriesLimit, new_value).await;
    let retrieved_value = config.usize(USizeOpt::TopStoriesLimit).await;
    assert_eq!(retrieved_value, new_value);
}

#[tokio::test]
async fn test_actual_config_save() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("config.toml");
    let config_path = ArcPath::from(config_path.as_path());

    // Use the real filesystem actor
    let fs = Fs::spawn();
    let config = Config::spawn(fs.clone(), config_path.clone());

    // Set some values
    config
        .set_path(PathOpt::LogDir, ArcPath::from(Path::new("/custom/logs")))
        .await;
    config.set_log_level(LogLevel::Info).await;
    config.set_usize(USizeOpt::CacheTtlMinutes, 30).await;

    // Save the config
    config.save().await?;

    // Read and verify the saved file
    let contents = tokio::fs::read_to_string(&*config_path).await?;
    let saved_data: Data = toml::from_str(&contents)?;

    assert_eq!(
        saved_data.path(PathOpt::LogDir).to_str().unwrap(),
        "/custom/logs"
    );
    assert_eq!(saved_data.log_level(), LogLevel::Info);
    assert_eq!(saved_data.usize(USizeOpt::CacheTtlMinutes), 30);

    // Cleanup
    fs.remove_file(config_path.clone()).await.ok();
    temp_dir.close()?;

    Ok(())
}

#[tokio::test]
async fn test_actual_config_load() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("config.toml");

    let toml = concat!(
        "api_base_url = \"http://localhost:9200\"\n",
        "top_stories_limit = 25\n",
        "log_level = \"Error\"\n",
    );
    tokio::fs::write(&config_path, toml).await?;

    let fs = Fs::spawn();
    let config = Config::spawn(fs, ArcPath::from(config_path.as_path()));
    config.load().await?;

    assert_eq!(
        config.str(StrOpt::ApiBaseUrl).await.as_ref(),
        "http://localhost:9200"
    );
    assert_eq!(config.usize(USizeOpt::TopStoriesLimit).await, 25);
    assert_eq!(config.log_level().await, LogLevel::Error);
    // Keys absent from the file keep their defaults
    assert_eq!(config.usize(USizeOpt::DefaultPageSize).await, 200);

    temp_dir.close()?;
    Ok(())
}

#[tokio::test]
async fn test_actual_config_load_rejects_invalid_toml() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("config.toml");
    tokio::fs::write(&config_path, "not { valid toml").await?;

    let fs = Fs::spawn();
    let config = Config::spawn(fs, ArcPath::from(config_path.as_path()));
    assert!(config.load().await.is_err());

    temp_dir.close()?;
    Ok(())
}

#[tokio::test]
async fn test_save_then_load_round_trip() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("config.toml");
    let config_path = ArcPath::from(config_path.as_path());

    let fs = Fs::spawn();
    let config = Config::spawn(fs.clone(), config_path.clone());

    config.set_usize(USizeOpt::TopStoriesLimit, 77).await;
    config.save().await?;

    // A second actor sharing the same file sees the saved values
    let other = Config::spawn(fs, config_path);
    other.load().await?;
    assert_eq!(other.usize(USizeOpt::TopStoriesLimit).await, 77);

    temp_dir.close()?;
    Ok(())
}
