//! Tags relation manager on the product view page.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use shelf_core::{ProductId, TagId};

use crate::db::{ProductRepository, RepositoryError, TagRepository};
use crate::error::AppError;
use crate::resources::product::{MSG_TAGS_INVALID, view_url};
use crate::state::AppState;

/// Attach form: an existing tag id, or a name to create.
#[derive(Debug, Default, Deserialize)]
pub struct AttachInput {
    #[serde(default)]
    pub tag_id: String,
    #[serde(default)]
    pub name: String,
}

/// What an attach submission asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachRequest {
    /// Create the tag if needed, then attach it.
    Create(String),
    /// Attach an existing tag.
    Existing(TagId),
}

impl AttachInput {
    /// A new tag name takes precedence over the selected tag.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if neither field holds a usable value.
    pub fn request(&self) -> Result<AttachRequest, AppError> {
        let name = self.name.trim();
        if !name.is_empty() {
            return Ok(AttachRequest::Create(name.to_string()));
        }
        match self.tag_id.trim() {
            "" => Err(AppError::BadRequest(
                "Choose a tag or enter a new tag name.".to_string(),
            )),
            raw => raw
                .parse::<i32>()
                .map(|id| AttachRequest::Existing(TagId::new(id)))
                .map_err(|_| AppError::BadRequest(MSG_TAGS_INVALID.to_string())),
        }
    }
}

async fn ensure_product(state: &AppState, id: ProductId) -> Result<(), AppError> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Attach (or create and attach) a tag.
#[instrument(skip(state))]
pub async fn attach(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<AttachInput>,
) -> Result<Redirect, AppError> {
    let product_id = ProductId::new(id);
    ensure_product(&state, product_id).await?;
    let tags = TagRepository::new(state.pool());

    let tag_id = match input.request()? {
        AttachRequest::Create(name) => tags.find_or_create(&name).await?.id,
        AttachRequest::Existing(tag_id) => {
            if tags.count_existing(&[tag_id]).await? == 0 {
                return Err(AppError::BadRequest(MSG_TAGS_INVALID.to_string()));
            }
            tag_id
        }
    };

    tags.attach(product_id, tag_id).await?;
    tracing::info!(product_id = %product_id, tag_id = %tag_id, "Tag attached");
    Ok(Redirect::to(&view_url(product_id)))
}

/// Detach a tag.
#[instrument(skip(state))]
pub async fn detach(
    State(state): State<AppState>,
    Path((id, tag)): Path<(i32, i32)>,
) -> Result<Redirect, AppError> {
    let product_id = ProductId::new(id);
    let tag_id = TagId::new(tag);
    ensure_product(&state, product_id).await?;

    match TagRepository::new(state.pool())
        .detach(product_id, tag_id)
        .await
    {
        Ok(()) => {
            tracing::info!(product_id = %product_id, tag_id = %tag_id, "Tag detached");
            Ok(Redirect::to(&view_url(product_id)))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!(
            "tag {tag_id} on product {product_id}"
        ))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_name_wins() {
        let input = AttachInput {
            tag_id: "3".into(),
            name: "  sale ".into(),
        };
        assert_eq!(input.request().unwrap(), AttachRequest::Create("sale".into()));
    }

    #[test]
    fn test_existing_tag() {
        let input = AttachInput {
            tag_id: "3".into(),
            name: String::new(),
        };
        assert_eq!(input.request().unwrap(), AttachRequest::Existing(TagId::new(3)));
    }

    #[test]
    fn test_nothing_chosen() {
        assert!(matches!(
            AttachInput::default().request(),
            Err(AppError::BadRequest(_))
        ));
        let input = AttachInput {
            tag_id: "x".into(),
            name: String::new(),
        };
        assert!(matches!(input.request(), Err(AppError::BadRequest(_))));
    }
}
