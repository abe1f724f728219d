use saucebot_core::PostId;
use saucebot_interface::SocialPlatform;
use saucebot_social::TwitterClient;

#[test]
fn test_empty_token_rejected() {
    assert!(TwitterClient::new("   ").is_err());
    assert!(TwitterClient::new("token").is_ok());
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = TwitterClient::new("token")
        .expect("Client builds")
        .with_base_url("http://127.0.0.1:9");

    let err = client.fetch_post(PostId(20)).await.unwrap_err();
    assert!(matches!(
        err.kind,
        saucebot_error::PlatformErrorKind::Http(_)
    ));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_mentions() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let token = std::env::var("TWITTER_BEARER_TOKEN").expect("TWITTER_BEARER_TOKEN must be set");
    let client = TwitterClient::new(token)?;

    let latest = client.latest_mention_id().await?;
    println!("Latest mention: {:?}", latest);

    let since = latest.map(|id| PostId(id.get().saturating_sub(1_000_000_000))).unwrap_or(PostId::FLOOR);
    let mentions = client.fetch_mentions_since(since).await?;
    for pair in mentions.windows(2) {
        assert!(pair[0].id() < pair[1].id());
    }
    Ok(())
}
