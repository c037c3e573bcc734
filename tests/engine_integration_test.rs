use anyhow::Result;
use cute_pets::{LocalStorage, PetEngine, PetError, PetRecord, PetsConfig, ReqwestTransport};
use httpmock::prelude::*;
use tempfile::TempDir;

/// 從 TOML 設定檔建立來源，抓一筆資料並寫出 pet.json
#[tokio::test]
async fn test_config_file_to_stored_record() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pet.getRandom")
            .query_param("key", "file-key")
            .query_param("shelterid", "WA77");
        then.status(200).json_body(serde_json::json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "77"},
                    "name": {"$t": "pickles"},
                    "sex": {"$t": "f"},
                    "breeds": {"breed": {"$t": "Beagle"}},
                    "options": {"option": [{"$t": "hasShots"}, {"$t": "housebroken"}]}
                }
            }
        }));
    });

    let config_content = format!(
        r#"
[petfinder]
endpoint = "{}"
api_key = "file-key"
shelter_id = "WA77"

[http]
timeout_seconds = 5
"#,
        server.url("/pet.getRandom")
    );
    let config_path = temp_dir.path().join("pets.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let config = PetsConfig::from_file(&config_path)?;
    let transport = ReqwestTransport::new(config.http.timeout(), &config.http.user_agent)?;
    let engine = PetEngine::new(config.petfinder_source(transport)?);

    let output_dir = temp_dir.path().join("out");
    let storage = LocalStorage::new(output_dir.to_str().unwrap().to_string());
    let record = engine.run_and_store(&storage).await?;

    api_mock.assert();
    assert_eq!(record.name, "Pickles");
    assert_eq!(record.description, "house trained female beagle");
    assert_eq!(record.picture_url, None);

    let stored: PetRecord = serde_json::from_slice(&std::fs::read(output_dir.join("pet.json"))?)?;
    assert_eq!(stored, record);

    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/petoftheday.asp");
        then.status(500);
    });

    let config = PetsConfig::from_toml_str(&format!(
        r#"
[petharbor]
endpoint = "{}"
shelter_id = "SHLT"
pet_types = "dog"
"#,
        server.url("/petoftheday.asp")
    ))?;

    let engine = PetEngine::new(config.petharbor_source(ReqwestTransport::default())?);
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let result = engine.run_and_store(&storage).await;

    assert!(matches!(
        result,
        Err(PetError::UpstreamError { status: 500, .. })
    ));
    assert!(!temp_dir.path().join("pet.json").exists());

    Ok(())
}
