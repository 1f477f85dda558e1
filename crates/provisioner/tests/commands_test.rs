//! Integration tests for operator commands.

mod common;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{parse, run, test_context, NUMBERS_PATH};
use provisioner::{load_accounts, AppError};
use twilio_client::AccountDirectory;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_listing(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(NUMBERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "incoming_phone_numbers": [{
                "sid": "PN002",
                "phone_number": "+14155550100",
                "sms_url": "https://old.example.com/sms",
                "voice_url": "https://old.example.com/voice"
            }],
            "next_page_uri": null
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_search_command() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json"))
        .and(query_param("AreaCode", "415"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "available_phone_numbers": [{
                "phone_number": "+14155550100",
                "friendly_name": "(415) 555-0100",
                "locality": "San Francisco",
                "postal_code": "94105"
            }]
        })))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "search 415").await.unwrap();

    assert!(output.contains("+14155550100"));
    assert!(output.contains("San Francisco 94105"));
}

#[tokio::test]
async fn test_purchase_command_updates_account() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(NUMBERS_PATH))
        .and(body_string_contains("FriendlyName=Provisioned%3A+Globex"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "PN002",
            "phone_number": "+14155550100"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/IncomingPhoneNumbers/PN002.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sid": "PN002",
            "phone_number": "+14155550100"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/Services/MG456/PhoneNumbers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "purchase +14155550100 acct-2")
        .await
        .unwrap();

    assert!(output.contains("Purchased +14155550100 for Globex"));
    assert!(output.contains("Webhooks configured on PN002"));
    assert!(output.contains("Campaign registration failed"));

    let owner = context
        .accounts
        .find_by_messaging_number("4155550100")
        .await
        .unwrap();
    assert_eq!(owner.id, "acct-2");
}

#[tokio::test]
async fn test_purchase_unknown_account() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let context = test_context(&mock_server, dir.path());
    let result = run(&context, "purchase +14155550100 acct-404").await;

    assert!(matches!(result, Err(AppError::UnknownAccount(ref id)) if id == "acct-404"));
}

#[tokio::test]
async fn test_purchase_test_flag_before_arguments() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(NUMBERS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/IncomingPhoneNumbers/PN002.json"))
        .and(body_string_contains("SmsUrl=https%3A%2F%2Fhooks.example.com%2Finbound_sms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sid": "PN002",
            "phone_number": "+14155550100"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/Services/MG456/PhoneNumbers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "PN002",
            "service_sid": "MG456"
        })))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "purchase --test +14155550100 acct-2").await.unwrap();

    assert_eq!(
        output,
        "Test mode: +14155550100 was not purchased.\nWebhooks configured on PN002."
    );
    assert!(context
        .accounts
        .find_by_messaging_number("4155550100")
        .await
        .is_none());
}

#[tokio::test]
async fn test_show_webhooks_command() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_listing(&mock_server).await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "show-webhooks 4155550100").await.unwrap();

    assert!(output.contains("https://old.example.com/sms"));
    assert!(output.contains("https://old.example.com/voice"));
}

#[tokio::test]
async fn test_webhooks_command_no_match() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_listing(&mock_server).await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "webhooks 2125550000").await.unwrap();

    assert_eq!(output, "No incoming number matches 2125550000.");
}

#[tokio::test]
async fn test_send_command() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
        .and(body_string_contains("Body=Your+line+is+ready"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "SM001",
            "status": "queued"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "send +14155550100 Your line is ready")
        .await
        .unwrap();

    assert_eq!(output, "Sent SM001 (queued)");
}

#[tokio::test]
async fn test_resolve_command() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&mock_server, dir.path());

    let output = run(&context, "resolve +15551234567 +14155550199")
        .await
        .unwrap();
    assert_eq!(output, "Acme (acct-1) <- 4155550199 via 5551234567");

    let output = run(&context, "resolve +15550000001 +14155550199")
        .await
        .unwrap();
    assert!(output.starts_with("Unroutable"));
}

#[tokio::test]
async fn test_verify_sid_command() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&mock_server, dir.path());

    let output = run(&context, "verify-sid AC123").await.unwrap();
    assert_eq!(output, "Account SID matches.");
}

#[tokio::test]
async fn test_image_command_attaches() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "b64_json": STANDARD.encode(b"\x89PNG\r\n\x1a\n\x00\x01") }]
        })))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let output = run(&context, "image a purple llama --attach acct-1/avatar")
        .await
        .unwrap();

    assert!(output.starts_with("Attached acct-1/avatar/openai.png (image/png, 10 bytes"));
    assert!(dir.path().join("acct-1/avatar/openai.png").exists());
}

#[tokio::test]
async fn test_audio_command_saves_to_out() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("speech.mp3");

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fake".to_vec()))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let line = format!("audio Standalone test --out {}", out.display());
    let output = run(&context, &line).await.unwrap();

    assert!(output.contains("audio/mp3, 7 bytes"));
    assert_eq!(std::fs::read(&out).unwrap(), b"ID3fake");
}

#[tokio::test]
async fn test_audio_command_provider_failure() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let context = test_context(&mock_server, dir.path());
    let result = run(&context, "audio Hello world").await;

    assert!(matches!(result, Err(AppError::Media(ref e)) if e.status() == Some(500)));
}

#[test]
fn test_invalid_command_lines_are_rejected() {
    assert!(parse("search").is_err());
    assert!(parse("purchase +14155550100").is_err());
    assert!(parse("image a llama --attach avatar").is_err());
    assert!(parse("frobnicate").is_err());
}

#[tokio::test]
async fn test_load_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.json");
    std::fs::write(
        &path,
        r#"[{"id": "acct-9", "display_name": "Umbrella", "messaging_number": "+13125550123"}]"#,
    )
    .unwrap();

    let directory = load_accounts(Some(&path)).await.unwrap();
    let account = directory.find_by_messaging_number("3125550123").await.unwrap();
    assert_eq!(account.display_name, "Umbrella");

    assert!(load_accounts(None).await.unwrap().is_empty().await);
    assert!(load_accounts(Some(&dir.path().join("missing.json"))).await.is_err());
}
