//! Merchant multipart form
//!
//! The registration form arrives as `multipart/form-data`: text fields,
//! an optional stall photo (`image`) and any number of supporting
//! `documents`. This module parses and validates it before any provider
//! call happens, so a bad form never uploads anything.

use axum::extract::Multipart;
use serde::Serialize;

use crate::utils::AppError;
use crate::utils::validation::{parse_coordinate, require_text};
use shared::{MerchantStatus, StandType};

/// Stall photo size cap (matches the form-side check)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

const IMAGE_TYPE_ERROR: &str = "⛔ Solo se permiten imágenes (JPG, PNG)";
const IMAGE_SIZE_ERROR: &str = "La imagen no debe superar los 5MB";

/// A file pulled out of the multipart stream
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Extension for the stored object name: filename first, then the
    /// declared MIME type, then a generic fallback.
    pub fn extension(&self) -> String {
        if let Some((_, ext)) = self.filename.rsplit_once('.')
            && !ext.is_empty()
        {
            return ext.to_lowercase();
        }
        mime_guess::get_mime_extensions_str(&self.content_type)
            .and_then(|exts| exts.first())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "bin".into())
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
    }
}

/// Raw form fields, straight from the multipart stream
#[derive(Debug, Default)]
pub struct MerchantForm {
    pub name: Option<String>,
    pub business: Option<String>,
    pub address: Option<String>,
    pub address_references: Option<String>,
    pub delegation: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub organization_id: Option<String>,
    pub stand_type: Option<StandType>,
    pub operating_days: Option<Vec<String>>,
    pub license_number: Option<String>,
    pub notes: Option<String>,
    pub image: Option<UploadedFile>,
    pub documents: Vec<UploadedFile>,
}

/// Row payload for inserting into `merchants`
#[derive(Debug, Clone, Serialize)]
pub struct MerchantInsert {
    pub name: String,
    pub business: String,
    pub address: String,
    pub address_references: Option<String>,
    pub delegation: String,
    pub latitude: f64,
    pub longitude: f64,
    pub schedule_start: String,
    pub schedule_end: String,
    pub operating_days: Vec<String>,
    pub organization_id: Option<String>,
    pub stand_type: StandType,
    pub status: MerchantStatus,
    pub license_number: Option<String>,
    pub notes: Option<String>,
    pub registered_by: String,
    pub stall_photo_url: Option<String>,
}

/// Partial-update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct MerchantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_days: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stand_type: Option<StandType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stall_photo_url: Option<String>,
}

impl MerchantUpdate {
    /// True when a PATCH would carry no columns at all
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().map(|o| o.is_empty()).unwrap_or(true))
            .unwrap_or(true)
    }
}

impl MerchantForm {
    /// Drain an axum multipart stream into a [`MerchantForm`]
    ///
    /// File fields are validated here (type, size); unknown fields are
    /// ignored like the original form handler did.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MerchantForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Formulario inválido: {e}")))?
        {
            let Some(name) = field.name().map(|n| n.to_string()) else {
                continue;
            };

            match name.as_str() {
                "image" => {
                    let file = read_file(field).await?;
                    if !file.is_image() {
                        return Err(AppError::validation(IMAGE_TYPE_ERROR));
                    }
                    if file.bytes.len() > MAX_IMAGE_SIZE {
                        return Err(AppError::validation(IMAGE_SIZE_ERROR));
                    }
                    form.image = Some(file);
                }
                "documents" => {
                    let file = read_file(field).await?;
                    if !file.is_image() && !file.is_pdf() {
                        return Err(AppError::validation(format!(
                            "El archivo {} no es válido. Solo se aceptan imágenes y PDFs.",
                            file.filename
                        )));
                    }
                    form.documents.push(file);
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Formulario inválido: {e}")))?;
                    form.set_text_field(&name, value)?;
                }
            }
        }

        Ok(form)
    }

    fn set_text_field(&mut self, name: &str, value: String) -> Result<(), AppError> {
        // Empty optional fields come through as empty strings; store None
        let opt = |v: String| {
            let trimmed = v.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        match name {
            "name" => self.name = Some(value),
            "business" => self.business = Some(value),
            "address" => self.address = Some(value),
            "address_references" => self.address_references = opt(value),
            "delegation" => self.delegation = Some(value),
            "latitude" => self.latitude = Some(value),
            "longitude" => self.longitude = Some(value),
            "schedule_start" => self.schedule_start = Some(value),
            "schedule_end" => self.schedule_end = Some(value),
            "organization_id" => self.organization_id = opt(value),
            "license_number" => self.license_number = opt(value),
            "notes" => self.notes = opt(value),
            "stand_type" => {
                // Empty means "not sent", like the other optional fields
                self.stand_type = match opt(value) {
                    Some(v) => Some(parse_stand_type(&v)?),
                    None => None,
                };
            }
            "operating_days" => self.operating_days = Some(parse_operating_days(&value)?),
            _ => {} // unknown field, ignore
        }
        Ok(())
    }

    /// Validate the form for creation and build the insert payload.
    ///
    /// New merchants always start `en-observacion`; `stand_type` defaults
    /// to `semifijo` when the form omits it.
    pub fn into_insert(self, registered_by: &str) -> Result<MerchantInsert, AppError> {
        Ok(MerchantInsert {
            name: require_text(self.name.as_deref(), "El nombre del comerciante")?,
            business: require_text(self.business.as_deref(), "El giro del negocio")?,
            address: require_text(self.address.as_deref(), "La dirección")?,
            address_references: self.address_references,
            delegation: require_text(self.delegation.as_deref(), "La delegación")?,
            latitude: parse_coordinate(self.latitude.as_deref(), "La latitud", -90.0..=90.0)?,
            longitude: parse_coordinate(
                self.longitude.as_deref(),
                "La longitud",
                -180.0..=180.0,
            )?,
            schedule_start: require_text(self.schedule_start.as_deref(), "El horario de apertura")?,
            schedule_end: require_text(self.schedule_end.as_deref(), "El horario de cierre")?,
            operating_days: self.operating_days.unwrap_or_default(),
            organization_id: self.organization_id,
            stand_type: self.stand_type.unwrap_or_default(),
            status: MerchantStatus::EnObservacion,
            license_number: self.license_number,
            notes: self.notes,
            registered_by: registered_by.to_string(),
            stall_photo_url: None,
        })
    }

    /// Build the partial-update payload from whatever fields were sent.
    ///
    /// A field the form omits stays untouched, but a required field that
    /// IS sent must still hold a value: an empty `name` would otherwise
    /// blank a column the insert path guarantees non-empty.
    pub fn to_update(&self) -> Result<MerchantUpdate, AppError> {
        let required = |value: Option<&str>, field: &str| -> Result<Option<String>, AppError> {
            value.map(|v| require_text(Some(v), field)).transpose()
        };

        let latitude = match self.latitude.as_deref() {
            Some(v) => Some(parse_coordinate(Some(v), "La latitud", -90.0..=90.0)?),
            None => None,
        };
        let longitude = match self.longitude.as_deref() {
            Some(v) => Some(parse_coordinate(Some(v), "La longitud", -180.0..=180.0)?),
            None => None,
        };

        Ok(MerchantUpdate {
            name: required(self.name.as_deref(), "El nombre del comerciante")?,
            business: required(self.business.as_deref(), "El giro del negocio")?,
            address: required(self.address.as_deref(), "La dirección")?,
            address_references: self.address_references.clone(),
            delegation: required(self.delegation.as_deref(), "La delegación")?,
            latitude,
            longitude,
            schedule_start: required(self.schedule_start.as_deref(), "El horario de apertura")?,
            schedule_end: required(self.schedule_end.as_deref(), "El horario de cierre")?,
            operating_days: self.operating_days.clone(),
            organization_id: self.organization_id.clone(),
            stand_type: self.stand_type,
            license_number: self.license_number.clone(),
            notes: self.notes.clone(),
            stall_photo_url: None,
        })
    }
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<UploadedFile, AppError> {
    let filename = field.file_name().unwrap_or("archivo").to_string();
    let content_type = field.content_type().unwrap_or("").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Error leyendo el archivo: {e}")))?
        .to_vec();

    if bytes.is_empty() {
        return Err(AppError::validation(format!(
            "El archivo {filename} está vacío"
        )));
    }

    Ok(UploadedFile {
        filename,
        content_type,
        bytes,
    })
}

fn parse_stand_type(value: &str) -> Result<StandType, AppError> {
    match value.trim() {
        "semifijo" => Ok(StandType::Semifijo),
        "fijo" => Ok(StandType::Fijo),
        "rotativo" => Ok(StandType::Rotativo),
        other => Err(AppError::validation(format!(
            "Tipo de puesto inválido: {other}"
        ))),
    }
}

/// `operating_days` arrives as a JSON array string (`["lunes","martes"]`)
fn parse_operating_days(value: &str) -> Result<Vec<String>, AppError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(value).map_err(|_| {
        AppError::validation("operating_days debe ser un arreglo JSON de días")
    })
}
