use axum::{
    Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{delete, get},
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::errors::ApiError;
use crate::models::{Listing, NewListing};
use crate::validation::ListingForm;
use crate::{AppState, repositories::ListingRepository};

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[instrument(skip_all)]
async fn list_items<S: AppState>(
    State(state): State<S>,
) -> Result<ResponseJson<Vec<Listing>>, ApiError> {
    debug!("Processing list items request");

    let items = state.listing_repo().list().await?;

    info!(count = items.len(), "Returning listing collection");
    Ok(ResponseJson(items))
}

#[instrument(skip_all)]
async fn create_item<S: AppState>(
    State(state): State<S>,
    mut multipart: Multipart,
) -> Result<(StatusCode, ResponseJson<MessageResponse>), ApiError> {
    debug!("Processing create item request");

    let mut form = ListingForm::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                image = Some((file_name, bytes.to_vec()));
            }
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "type" => form.category = Some(field.text().await?),
            "name" => form.name = Some(field.text().await?),
            "contact" => form.contact = Some(field.text().await?),
            "location" => form.location = Some(field.text().await?),
            "condition" => form.condition = Some(field.text().await?),
            "price" => form.price = Some(field.text().await?),
            "mode" => form.mode = Some(field.text().await?),
            "createdAt" => form.created_at = Some(field.text().await?),
            other => {
                debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let Some((file_name, bytes)) = image else {
        warn!("Create request arrived without an image file");
        return Err(ApiError::MissingImage);
    };

    let validated = form.validate()?;
    debug!(title = %validated.title, category = %validated.category, "Listing fields validated");

    let image_path = state.upload_store().store(&file_name, &bytes).await?;
    debug!(image_path = %image_path, size = bytes.len(), "Stored uploaded image");

    let new_listing = NewListing::new(validated, image_path);
    let inserted = match state.listing_repo().create(&new_listing).await {
        Ok(inserted) => inserted,
        Err(err) => {
            // The file was already written; compensate so no orphan remains
            state.upload_store().remove(&new_listing.image).await;
            return Err(err);
        }
    };

    info!(id = inserted.id, image = %inserted.image, "Created new listing");

    Ok((
        StatusCode::CREATED,
        ResponseJson(MessageResponse {
            message: "Item uploaded successfully",
        }),
    ))
}

#[instrument(skip_all, fields(id = %id))]
async fn delete_item<S: AppState>(
    State(state): State<S>,
    Path(id): Path<i32>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    debug!("Processing delete item request");

    // Absent ids are treated as already deleted; the image file stays on disk
    state.listing_repo().delete_by_id(id).await?;

    info!("Deleted listing");
    Ok(ResponseJson(MessageResponse {
        message: "Item deleted",
    }))
}

pub fn create_items_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/items", get(list_items::<S>).post(create_item::<S>))
        .route("/items/{id}", delete(delete_item::<S>))
}
