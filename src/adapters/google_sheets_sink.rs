use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::core::interfaces::adapters::RowSink;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: u64 = 3600;
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize, PartialEq)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<Worksheet>,
}

#[derive(Debug, Deserialize)]
struct Worksheet {
    properties: WorksheetProperties,
}

#[derive(Debug, Deserialize)]
struct WorksheetProperties {
    title: String,
}

/// Appends rows to the first worksheet of a spreadsheet found by name,
/// authenticating as a service account.
pub struct GoogleSheetsSink {
    http_client: reqwest::Client,
    credential_file: PathBuf,
    spreadsheet_name: String,
}

impl GoogleSheetsSink {
    pub fn build(credential_file: PathBuf, spreadsheet_name: String) -> Self {
        log::info!(
            "[SHEETS] Sink targets spreadsheet '{}' with credentials {:?}",
            spreadsheet_name,
            credential_file
        );

        Self {
            http_client: reqwest::Client::new(),
            credential_file,
            spreadsheet_name,
        }
    }

    fn load_service_account_key(path: &Path) -> Result<ServiceAccountKey> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credential file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid service account file {}", path.display()))
    }

    fn build_assertion_claims(key: &ServiceAccountKey, issued_at: u64) -> AssertionClaims {
        AssertionClaims {
            iss: key.client_email.clone(),
            scope: TOKEN_SCOPES.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECONDS,
        }
    }

    fn sign_assertion(key: &ServiceAccountKey, issued_at: u64) -> Result<String> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM")?;
        let claims = Self::build_assertion_claims(key, issued_at);

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .context("Failed to sign token assertion")
    }

    fn build_token_request_body(assertion: &str) -> String {
        format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT_TYPE),
            urlencoding::encode(assertion)
        )
    }

    fn build_spreadsheet_query(spreadsheet_name: &str) -> String {
        let escaped_name = spreadsheet_name.replace('\\', "\\\\").replace('\'', "\\'");
        format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            escaped_name, SPREADSHEET_MIME_TYPE
        )
    }

    fn build_spreadsheet_lookup_url(spreadsheet_name: &str) -> String {
        format!(
            "{}?q={}&fields={}&pageSize=10",
            DRIVE_FILES_URL,
            urlencoding::encode(&Self::build_spreadsheet_query(spreadsheet_name)),
            urlencoding::encode("files(id,name)")
        )
    }

    fn select_spreadsheet_id(listing: DriveFileList, spreadsheet_name: &str) -> Result<String> {
        listing
            .files
            .into_iter()
            .find(|file| file.name == spreadsheet_name)
            .map(|file| file.id)
            .ok_or_else(|| anyhow::anyhow!("Spreadsheet '{}' not found", spreadsheet_name))
    }

    fn select_first_worksheet_title(metadata: SpreadsheetMetadata) -> Result<String> {
        metadata
            .sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| anyhow::anyhow!("Spreadsheet has no worksheets"))
    }

    /// A1 notation quotes sheet titles and doubles embedded quotes.
    fn quote_sheet_title(title: &str) -> String {
        format!("'{}'", title.replace('\'', "''"))
    }

    fn build_append_url(spreadsheet_id: &str, worksheet_title: &str) -> String {
        format!(
            "{}/{}/values/{}:append?valueInputOption=RAW",
            SHEETS_API_URL,
            spreadsheet_id,
            urlencoding::encode(&Self::quote_sheet_title(worksheet_title))
        )
    }

    fn build_append_body(values: &[String]) -> serde_json::Value {
        serde_json::json!({ "values": [values] })
    }

    async fn ensure_success(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("{} failed with status {}: {}", action, status, body.trim())
    }

    async fn request_access_token(&self, key: &ServiceAccountKey) -> Result<String> {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the Unix epoch")?
            .as_secs();
        let assertion = Self::sign_assertion(key, issued_at)?;

        log::debug!("[SHEETS] Requesting access token from {}", key.token_uri);

        let response = self
            .http_client
            .post(&key.token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Self::build_token_request_body(&assertion))
            .send()
            .await
            .context("Failed to reach the token endpoint")?;
        let response = Self::ensure_success(response, "Authentication").await?;

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;
        Ok(token.access_token)
    }

    async fn find_spreadsheet_id(&self, access_token: &str) -> Result<String> {
        let response = self
            .http_client
            .get(Self::build_spreadsheet_lookup_url(&self.spreadsheet_name))
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach Google Drive")?;
        let response = Self::ensure_success(response, "Spreadsheet lookup").await?;

        let listing: DriveFileList = response
            .json()
            .await
            .context("Failed to parse Drive file listing")?;
        Self::select_spreadsheet_id(listing, &self.spreadsheet_name)
    }

    async fn find_first_worksheet_title(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/{}?fields={}",
            SHEETS_API_URL,
            spreadsheet_id,
            urlencoding::encode("sheets.properties.title")
        );

        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach Google Sheets")?;
        let response = Self::ensure_success(response, "Worksheet lookup").await?;

        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .context("Failed to parse spreadsheet metadata")?;
        Self::select_first_worksheet_title(metadata)
    }
}

#[async_trait]
impl RowSink for GoogleSheetsSink {
    async fn append_row(&self, values: &[String]) -> Result<()> {
        log::info!(
            "[SHEETS] Appending row with {} cell(s) to '{}'",
            values.len(),
            self.spreadsheet_name
        );

        let key = Self::load_service_account_key(&self.credential_file)?;
        let access_token = self.request_access_token(&key).await?;
        let spreadsheet_id = self.find_spreadsheet_id(&access_token).await?;
        let worksheet_title = self
            .find_first_worksheet_title(&access_token, &spreadsheet_id)
            .await?;

        log::debug!(
            "[SHEETS] Resolved spreadsheet {} worksheet '{}'",
            spreadsheet_id,
            worksheet_title
        );

        let response = self
            .http_client
            .post(Self::build_append_url(&spreadsheet_id, &worksheet_title))
            .bearer_auth(&access_token)
            .json(&Self::build_append_body(values))
            .send()
            .await
            .context("Failed to reach Google Sheets")?;
        Self::ensure_success(response, "Append").await?;

        log::info!("[SHEETS] Row appended successfully");
        Ok(())
    }
}
