//! Twilio REST client.

use crate::accounts::{Account, AccountDirectory};
use crate::config::TwilioConfig;
use crate::error::TwilioError;
use crate::phone::{internationalize, same_digits, strip_internationalize};
use crate::types::*;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use urlencoding::encode;

/// REST API version prefix.
const API_VERSION: &str = "2010-04-01";

/// Results returned by an available-number search.
pub const AVAILABLE_NUMBER_LIMIT: usize = 8;

/// Page size requested when listing owned numbers.
const LIST_PAGE_SIZE: usize = 50;

/// Upper bound on listing pages followed in one call.
const MAX_LIST_PAGES: usize = 100;

/// Twilio client for number provisioning, webhook wiring and texting.
///
/// The client holds only immutable credentials; every operation is a single
/// independent round-trip (listing may follow several pages).
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    api_base_url: String,
    messaging_base_url: String,
    account_sid: String,
    auth_token: SecretString,
    from_number: String,
    campaign_sid: Option<String>,
    friendly_name_prefix: String,
}

impl TwilioClient {
    /// Create a new Twilio client.
    pub fn new(config: &TwilioConfig) -> Result<Self, TwilioError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            messaging_base_url: config.messaging_base_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            campaign_sid: config.campaign_sid.clone(),
            friendly_name_prefix: config.friendly_name_prefix.clone(),
        })
    }

    /// Get the default sender number.
    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    /// Send an SMS. An empty or missing `from` uses the configured number.
    #[instrument(skip(self, body))]
    pub async fn send_text(
        &self,
        to: &str,
        body: &str,
        from: Option<&str>,
    ) -> Result<MessageResource, TwilioError> {
        let from = from
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(self.from_number.as_str());

        let response = self
            .authed(self.client.post(self.account_url("Messages.json")))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await?;

        let message: MessageResource = handle_response(response).await?;
        debug!(sid = %message.sid, "Queued text message");
        Ok(message)
    }

    /// Buy `number` for `account` and wire its inbound webhooks.
    ///
    /// In test mode nothing is bought and the account is left untouched, but
    /// the webhooks are still configured so that the wiring reflects the
    /// current configuration.
    #[instrument(skip(self, account, directory), fields(account_id = %account.id))]
    pub async fn purchase_available_number(
        &self,
        number: &str,
        account: &Account,
        directory: &dyn AccountDirectory,
        webhook_base_url: &str,
        test_mode: bool,
    ) -> Result<Option<WebhookSetup>, TwilioError> {
        if test_mode {
            info!("Test mode: skipping purchase of {}", number);
        } else {
            let friendly_name = format!("{}: {}", self.friendly_name_prefix, account.display_name);
            let response = self
                .authed(self.client.post(self.account_url("IncomingPhoneNumbers.json")))
                .form(&[("PhoneNumber", number), ("FriendlyName", friendly_name.as_str())])
                .send()
                .await?;

            let purchased: IncomingPhoneNumber = handle_response(response).await?;
            info!(sid = %purchased.sid, "Purchased {}", number);

            if !directory.set_messaging_number(&account.id, number).await {
                warn!("Account {} not found when recording messaging number", account.id);
            }
        }

        self.configure_webhooks(number, webhook_base_url).await
    }

    /// Point the number's inbound voice and SMS callbacks at `base_url`.
    ///
    /// Returns `None` when the account does not (yet) list the number. After a
    /// match the number is also added to the messaging campaign; a failure
    /// there is reported in [`WebhookSetup::campaign_warning`] only.
    #[instrument(skip(self))]
    pub async fn configure_webhooks(
        &self,
        number: &str,
        base_url: &str,
    ) -> Result<Option<WebhookSetup>, TwilioError> {
        let wanted = internationalize(number);

        let Some(matching) = self
            .list_incoming_numbers()
            .await?
            .into_iter()
            .find(|record| same_digits(&record.phone_number, &wanted))
        else {
            debug!("No incoming number matches {}", number);
            return Ok(None);
        };

        let base_url = base_url.trim_end_matches('/');
        let voice_url = format!("{}/inbound_call", base_url);
        let sms_url = format!("{}/inbound_sms", base_url);

        let path = format!("IncomingPhoneNumbers/{}.json", encode(&matching.sid));
        let response = self
            .authed(self.client.post(self.account_url(&path)))
            .form(&[("VoiceUrl", voice_url.as_str()), ("SmsUrl", sms_url.as_str())])
            .send()
            .await?;
        let _: IncomingPhoneNumber = handle_response(response).await?;
        info!(sid = %matching.sid, "Configured webhooks for {}", matching.phone_number);

        let campaign_warning = match self.register_with_campaign(&matching.sid).await {
            Ok(_) => None,
            Err(e) => {
                warn!("Error setting up messaging service campaign: {}", e);
                Some(e.to_string())
            }
        };

        Ok(Some(WebhookSetup {
            number_sid: matching.sid,
            sms_url,
            voice_url,
            campaign_warning,
        }))
    }

    /// Add an owned number to the configured messaging service campaign.
    #[instrument(skip(self))]
    pub async fn register_with_campaign(
        &self,
        number_sid: &str,
    ) -> Result<CampaignPhoneNumber, TwilioError> {
        let Some(campaign_sid) = self.campaign_sid.as_deref() else {
            return Err(TwilioError::NotConfigured("messaging campaign sid".into()));
        };

        let url = format!(
            "{}/v1/Services/{}/PhoneNumbers",
            self.messaging_base_url,
            encode(campaign_sid)
        );
        let response = self
            .authed(self.client.post(url))
            .form(&[("PhoneNumberSid", number_sid)])
            .send()
            .await?;

        let registered: CampaignPhoneNumber = handle_response(response).await?;
        debug!("Registered {} with campaign {}", number_sid, campaign_sid);
        Ok(registered)
    }

    /// Current inbound SMS and voice URLs of a number.
    ///
    /// Matches the listing on the exact `+1` form of `number`; both URLs are
    /// `None` when nothing matches.
    #[instrument(skip(self))]
    pub async fn webhook_urls(&self, number: &str) -> Result<WebhookUrls, TwilioError> {
        let intl = internationalize(number);

        Ok(self
            .list_incoming_numbers()
            .await?
            .into_iter()
            .find(|record| record.phone_number == intl)
            .map(|record| WebhookUrls {
                sms_url: record.sms_url,
                voice_url: record.voice_url,
            })
            .unwrap_or_default())
    }

    /// Every number owned by the account, following all listing pages.
    #[instrument(skip(self))]
    pub async fn list_incoming_numbers(&self) -> Result<Vec<IncomingPhoneNumber>, TwilioError> {
        let (numbers, _truncated) = self.list_incoming_number_pages(MAX_LIST_PAGES).await?;
        Ok(numbers)
    }

    /// Listing that reads at most `max_pages` pages.
    ///
    /// The flag is true when the provider still had a next page.
    pub(crate) async fn list_incoming_number_pages(
        &self,
        max_pages: usize,
    ) -> Result<(Vec<IncomingPhoneNumber>, bool), TwilioError> {
        let mut next_url = Some(format!(
            "{}?PageSize={}",
            self.account_url("IncomingPhoneNumbers.json"),
            LIST_PAGE_SIZE
        ));
        let mut numbers = Vec::new();
        let mut pages = 0;

        while let Some(url) = next_url.take() {
            if pages == max_pages {
                warn!(
                    listed = numbers.len(),
                    "Incoming number listing stopped after {} pages; later pages were not read",
                    max_pages
                );
                return Ok((numbers, true));
            }

            let response = self.authed(self.client.get(&url)).send().await?;
            let page: IncomingPhoneNumberPage = handle_response(response).await?;
            pages += 1;
            numbers.extend(page.incoming_phone_numbers);

            next_url = page
                .next_page_uri
                .filter(|uri| !uri.is_empty())
                .map(|next| format!("{}{}", self.api_base_url, next));
        }

        debug!("Listed {} incoming numbers", numbers.len());
        Ok((numbers, false))
    }

    /// Search local US inventory in `area_code`, at most eight results.
    #[instrument(skip(self))]
    pub async fn find_available_numbers(
        &self,
        area_code: &str,
    ) -> Result<Vec<AvailableNumber>, TwilioError> {
        let limit = AVAILABLE_NUMBER_LIMIT.to_string();
        let response = self
            .authed(self.client.get(self.account_url("AvailablePhoneNumbers/US/Local.json")))
            .query(&[("AreaCode", area_code), ("PageSize", limit.as_str())])
            .send()
            .await?;

        let page: AvailablePhoneNumberPage = handle_response(response).await?;
        let numbers: Vec<AvailableNumber> = page
            .available_phone_numbers
            .into_iter()
            .take(AVAILABLE_NUMBER_LIMIT)
            .map(AvailableNumber::from)
            .collect();

        debug!("Found {} available numbers in {}", numbers.len(), area_code);
        Ok(numbers)
    }

    /// Whether `sid` is this client's account SID.
    ///
    /// A sanity check on webhook parameters, not authentication.
    pub fn verify_account_sid(&self, sid: &str) -> bool {
        self.account_sid == sid
    }

    /// Resolve an inbound message to the account owning its destination.
    ///
    /// Both numbers are returned without the `+1` marker. `None` means no
    /// account owns the destination and the message cannot be routed.
    #[instrument(skip(self, directory))]
    pub async fn resolve_inbound(
        &self,
        to: &str,
        from: &str,
        directory: &dyn AccountDirectory,
    ) -> Option<InboundRoute> {
        let destination = strip_internationalize(to);
        let source = strip_internationalize(from);

        let Some(account) = directory.find_by_messaging_number(&destination).await else {
            warn!("No account owns {}", destination);
            return None;
        };

        Some(InboundRoute {
            account,
            destination,
            source,
        })
    }

    fn account_url(&self, path: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/{}",
            self.api_base_url,
            API_VERSION,
            encode(&self.account_sid),
            path
        )
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
    }
}

/// Decode a successful response or turn a rejection into `TwilioError::Api`.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TwilioError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        debug!("Response body: {}", body.chars().take(200).collect::<String>());
        serde_json::from_str(&body).map_err(TwilioError::from)
    } else {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Twilio request failed");
        Err(TwilioError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
