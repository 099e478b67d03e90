//! HTTP client for the SIRECOVIP API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::{
    ErrorBody, LoginRequest, LoginResponse, Merchant, MerchantResponse, MessageResponse,
    Organization,
};

/// A file attached to a merchant form (stall photo or document)
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Merchant form data, mirroring the registration form field-for-field
#[derive(Debug, Clone, Default)]
pub struct MerchantPayload {
    pub name: Option<String>,
    pub business: Option<String>,
    pub address: Option<String>,
    pub address_references: Option<String>,
    pub delegation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub organization_id: Option<String>,
    pub stand_type: Option<String>,
    pub operating_days: Option<Vec<String>>,
    pub license_number: Option<String>,
    pub notes: Option<String>,
    pub image: Option<FileUpload>,
    pub documents: Vec<FileUpload>,
}

impl MerchantPayload {
    /// Build the multipart form the API expects
    ///
    /// Coordinates are sent with 6 decimals and `operating_days` as a
    /// JSON array string, exactly like the browser form does.
    fn into_form(self) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();

        let text_fields = [
            ("name", self.name),
            ("business", self.business),
            ("address", self.address),
            ("address_references", self.address_references),
            ("delegation", self.delegation),
            ("schedule_start", self.schedule_start),
            ("schedule_end", self.schedule_end),
            ("organization_id", self.organization_id),
            ("stand_type", self.stand_type),
            ("license_number", self.license_number),
            ("notes", self.notes),
        ];
        for (key, value) in text_fields {
            if let Some(v) = value {
                form = form.text(key, v);
            }
        }

        if let Some(lat) = self.latitude {
            form = form.text("latitude", format!("{lat:.6}"));
        }
        if let Some(lng) = self.longitude {
            form = form.text("longitude", format!("{lng:.6}"));
        }
        if let Some(days) = self.operating_days {
            let encoded = serde_json::to_string(&days)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            form = form.text("operating_days", encoded);
        }

        if let Some(photo) = self.image {
            form = form.part("image", file_part(photo)?);
        }
        for doc in self.documents {
            form = form.part("documents", file_part(doc)?);
        }

        Ok(form)
    }
}

fn file_part(file: FileUpload) -> ClientResult<reqwest::multipart::Part> {
    let part = reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.filename)
        .mime_str(&file.content_type)?;
    Ok(part)
}

/// HTTP client holding the session token
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Map the response to the expected type, turning `{"error": …}`
    /// bodies into typed errors
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));

            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST => ClientError::Validation(message),
                _ => ClientError::Server(message),
            });
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login and keep the returned token for subsequent calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;

        let login: LoginResponse = Self::handle_response(response).await?;
        self.token = Some(login.token.clone());
        Ok(login)
    }

    // ========== Merchant API ==========

    /// Fetch the full merchant set (map view and dashboard both start here)
    pub async fn merchants(&self) -> ClientResult<Vec<Merchant>> {
        let response = self
            .authorized(self.client.get(self.url("/api/merchants")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Fetch one merchant with its documents
    pub async fn merchant(&self, id: &str) -> ClientResult<Merchant> {
        let response = self
            .authorized(self.client.get(self.url(&format!("/api/merchants/{id}"))))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Register a merchant (multipart: fields + photo + documents)
    pub async fn create_merchant(&self, payload: MerchantPayload) -> ClientResult<MerchantResponse> {
        let form = payload.into_form()?;
        let response = self
            .authorized(self.client.post(self.url("/api/merchants")))
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Update a merchant (partial form)
    pub async fn update_merchant(
        &self,
        id: &str,
        payload: MerchantPayload,
    ) -> ClientResult<MerchantResponse> {
        let form = payload.into_form()?;
        let response = self
            .authorized(self.client.put(self.url(&format!("/api/merchants/{id}"))))
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Delete a merchant
    pub async fn delete_merchant(&self, id: &str) -> ClientResult<MessageResponse> {
        let response = self
            .authorized(
                self.client
                    .delete(self.url(&format!("/api/merchants/{id}"))),
            )
            .send()
            .await?;
        Self::handle_response(response).await
    }

    // ========== Organization API ==========

    /// Fetch the organization catalog
    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        let response = self
            .authorized(self.client.get(self.url("/api/organizations")))
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
