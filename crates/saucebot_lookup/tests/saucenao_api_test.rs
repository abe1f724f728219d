use saucebot_interface::SauceLookup;
use saucebot_lookup::{SauceNaoClient, SauceNaoConfig};

/// Any publicly reachable image works; the test checks ordering only.
const SAMPLE_IMAGE: &str = "https://saucenao.com/images/static/banner.gif";

#[test]
fn test_empty_key_rejected() {
    let result = SauceNaoClient::new("", SauceNaoConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_config_overrides() {
    let config = SauceNaoConfig::default()
        .with_min_similarity(80.0)
        .with_results(3);
    let client = SauceNaoClient::new("key", config).expect("Client builds");
    assert_eq!(*client.config().min_similarity(), 80.0);
    assert_eq!(*client.config().results(), 3);
    assert_eq!(client.service_name(), "saucenao");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_lookup() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("SAUCENAO_API_KEY").expect("SAUCENAO_API_KEY must be set");
    let client = SauceNaoClient::new(api_key, SauceNaoConfig::default().with_min_similarity(0.0))?;

    let matches = client.lookup(SAMPLE_IMAGE).await?;
    println!("Got {} matches", matches.len());
    for pair in matches.windows(2) {
        assert!(pair[0].similarity() >= pair[1].similarity());
    }
    Ok(())
}
