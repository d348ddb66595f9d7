use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use planner_core::models::{Client, CreateClientInput, UpdateClientInput};
use serde::Deserialize;

use super::{blocking, ApiError, AppState};
use crate::views::ClientsPage;

#[derive(Debug, Deserialize)]
pub struct ClientForm {
    #[serde(default)]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Back to the client list, carrying a one-shot message.
fn back_to_list(notice: &str) -> Redirect {
    Redirect::to(&format!("/clients?notice={}", urlencoding::encode(notice)))
}

const NAME_REQUIRED: &str = "Client name is required.";

/// GET /clients
pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, ApiError> {
    let db = state.db.clone();
    let clients = blocking(move || db.list_clients()).await?;
    let page = ClientsPage {
        clients,
        notice: query.notice.filter(|n| !n.is_empty()),
        calendar_href: "/".into(),
    };
    Ok(Html(page.render()?))
}

/// GET /api/clients
pub async fn list_json(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let db = state.db.clone();
    Ok(Json(blocking(move || db.list_clients()).await?))
}

/// POST /clients/add
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ClientForm>,
) -> Result<Redirect, ApiError> {
    if form.name.trim().is_empty() {
        return Ok(back_to_list(NAME_REQUIRED));
    }

    let db = state.db.clone();
    let client = blocking(move || {
        db.create_client(CreateClientInput {
            name: form.name,
            address: form.address,
            phone: form.phone,
        })
    })
    .await?;
    Ok(back_to_list(&format!("Client '{}' added.", client.name)))
}

/// POST /clients/edit/{id}. Unknown ids are ignored.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ClientForm>,
) -> Result<Redirect, ApiError> {
    if form.name.trim().is_empty() {
        return Ok(back_to_list(NAME_REQUIRED));
    }

    let name = form.name.trim().to_string();
    let db = state.db.clone();
    blocking(move || {
        db.update_client(
            id,
            UpdateClientInput {
                name: form.name,
                address: form.address,
                phone: form.phone,
            },
        )
    })
    .await?;
    Ok(back_to_list(&format!("Client '{name}' updated.")))
}

/// POST /clients/delete/{id}. Also drops every visit planned for the client.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let db = state.db.clone();
    blocking(move || db.delete_client(id)).await?;
    Ok(back_to_list("Client deleted."))
}
