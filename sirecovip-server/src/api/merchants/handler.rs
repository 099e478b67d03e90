//! Merchant API Handlers
//!
//! Every handler is thin glue: parse the request, call the provider,
//! map the rows into JSON. Photos and documents go to the `evidence`
//! bucket; rows go to `merchants` and `documents`.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::{Merchant, MerchantResponse, MessageResponse};

use super::form::{MerchantForm, UploadedFile};

/// Public bucket holding stall photos and documents
const EVIDENCE_BUCKET: &str = "evidence";

/// List all merchants, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Merchant>>> {
    let merchants: Vec<Merchant> = state
        .provider()
        .from("merchants")
        .select("*")
        .order("created_at.desc")
        .fetch()
        .await?;
    Ok(Json(merchants))
}

/// Get one merchant with its embedded documents
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Merchant>> {
    let merchant: Option<Merchant> = state
        .provider()
        .from("merchants")
        .select("*,documents(*)")
        .eq("id", &id)
        .fetch_one()
        .await?;

    merchant
        .map(Json)
        .ok_or_else(|| AppError::not_found("Comerciante no encontrado"))
}

/// Register a new merchant
///
/// Multipart form: attribute fields plus optional `image` (stall photo)
/// and repeated `documents`. The photo is uploaded before the row insert;
/// if the insert then fails the object stays in the bucket (known gap,
/// inherited behavior).
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MerchantResponse>)> {
    let form = MerchantForm::from_multipart(multipart).await?;
    let documents = form.documents.clone();
    let image = form.image.clone();

    let mut insert = form.into_insert(&user.id)?;

    if let Some(photo) = &image {
        insert.stall_photo_url = Some(upload_evidence(&state, "puestos", photo).await?);
    }

    let merchant: Merchant = state
        .provider()
        .from("merchants")
        .insert(&insert)
        .await?;

    attach_documents(&state, &merchant.id, &documents).await?;

    tracing::info!(
        merchant_id = %merchant.id,
        registered_by = %user.id,
        documents = documents.len(),
        "Merchant registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(MerchantResponse {
            message: "✅ Comerciante registrado".into(),
            merchant,
        }),
    ))
}

/// Update a merchant (partial; new photo replaces the old URL, new
/// documents are appended)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    _user: CurrentUser,
    multipart: Multipart,
) -> AppResult<Json<MerchantResponse>> {
    let form = MerchantForm::from_multipart(multipart).await?;
    let mut changes = form.to_update()?;

    if let Some(photo) = &form.image {
        changes.stall_photo_url = Some(upload_evidence(&state, "puestos", photo).await?);
    }

    let merchant: Merchant = if changes.is_empty() {
        // Nothing to patch, but the merchant must still exist
        state
            .provider()
            .from("merchants")
            .select("*")
            .eq("id", &id)
            .fetch_one()
            .await?
            .ok_or_else(|| AppError::not_found("Comerciante no encontrado"))?
    } else {
        state
            .provider()
            .from("merchants")
            .eq("id", &id)
            .update(&changes)
            .await?
            .ok_or_else(|| AppError::not_found("Comerciante no encontrado"))?
    };

    attach_documents(&state, &merchant.id, &form.documents).await?;

    tracing::info!(merchant_id = %merchant.id, "Merchant updated");

    Ok(Json(MerchantResponse {
        message: "✅ Comerciante actualizado".into(),
        merchant,
    }))
}

/// Delete a merchant
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let deleted: Vec<Merchant> = state
        .provider()
        .from("merchants")
        .eq("id", &id)
        .delete()
        .await?;

    if deleted.is_empty() {
        return Err(AppError::not_found("Comerciante no encontrado"));
    }

    tracing::info!(merchant_id = %id, "Merchant deleted");

    Ok(Json(MessageResponse {
        message: "✅ Comerciante eliminado".into(),
    }))
}

/// Upload one file into the evidence bucket, returning its public URL
async fn upload_evidence(
    state: &ServerState,
    prefix: &str,
    file: &UploadedFile,
) -> AppResult<String> {
    let object_path = format!(
        "{}/{}_{}.{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        short_id(),
        file.extension()
    );

    state
        .provider()
        .storage()
        .upload(
            EVIDENCE_BUCKET,
            &object_path,
            file.bytes.clone(),
            &file.content_type,
        )
        .await?;

    Ok(state
        .provider()
        .storage()
        .public_url(EVIDENCE_BUCKET, &object_path))
}

/// Row payload for the `documents` table
#[derive(serde::Serialize)]
struct DocumentInsert<'a> {
    merchant_id: &'a str,
    name: &'a str,
    file_url: String,
    document_type: &'static str,
    file_size: i64,
}

/// Upload each document and record its row, in order
async fn attach_documents(
    state: &ServerState,
    merchant_id: &str,
    documents: &[UploadedFile],
) -> AppResult<()> {
    for file in documents {
        let file_url = upload_evidence(state, "documentos", file).await?;

        let row = DocumentInsert {
            merchant_id,
            name: &file.filename,
            file_url,
            document_type: if file.is_pdf() { "pdf" } else { "imagen" },
            file_size: file.bytes.len() as i64,
        };

        let _inserted: shared::Document = state
            .provider()
            .from("documents")
            .insert(&row)
            .await?;
    }
    Ok(())
}

/// Short random fragment for object names
fn short_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}
