use super::types::*;
use crate::{
    Error,
    config::ArenaConfig,
    pipeline::{Arena, GenerationRequest, RequestKind},
    session::SessionStore,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub arena: Arc<Arena>,
    pub sessions: SessionStore,
    pub catalog: Arc<ArenaConfig>,
}

impl AppState {
    pub fn new(arena: Arena, catalog: ArenaConfig) -> Self {
        Self {
            arena: Arc::new(arena),
            sessions: SessionStore::new(catalog.greeting.clone()),
            catalog: Arc::new(catalog),
        }
    }
}

fn status_for(e: &Error) -> StatusCode {
    match e {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Busy { .. } => StatusCode::CONFLICT,
        e if e.is_backend() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(title: &str, e: Error) -> ApiError {
    let status = status_for(&e);
    if status.is_server_error() {
        error!("{}: {}", title, e);
    } else {
        warn!("{}: {}", title, e);
    }
    (
        status,
        Json(ErrorResponse {
            title: title.to_string(),
            error: e.to_string(),
        }),
    )
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.catalog.models.clone(),
    })
}

pub async fn list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: state.catalog.templates.clone(),
    })
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (session_id, transcript) = state
        .sessions
        .create()
        .map_err(|e| api_error("Error creating session", e))?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            messages: transcript.messages().to_vec(),
            pending: None,
        }),
    ))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let transcript = state
        .sessions
        .get(&session_id)
        .map_err(|e| api_error("Error loading session", e))?;

    Ok(Json(SessionResponse {
        session_id,
        messages: transcript.messages().to_vec(),
        pending: transcript.pending().cloned(),
    }))
}

/// Runs a session request on its own task so the staged turn is settled even
/// when the client disconnects before the reply is ready.
async fn detached<T, F>(work: F) -> Result<T, Error>
where
    F: Future<Output = crate::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| Error::internal(format!("Generation task failed: {e}")))?
}

/// Resolves the template and checks the selected model against the catalog.
fn apply_catalog(
    catalog: &ArenaConfig,
    body: GenerateBody,
) -> Result<(Option<String>, GenerationRequest), Error> {
    let GenerateBody {
        session_id,
        template_id,
        mut request,
    } = body;

    if let Some(id) = template_id.as_deref() {
        let template = catalog
            .find_template(id)
            .ok_or_else(|| Error::validation(format!("Unknown template: {id}")))?;
        request.prompt = template.apply(&request.prompt);
    }
    if let Some(model) = request.params.model.as_deref()
        && catalog.find_model(model).is_none()
    {
        return Err(Error::validation(format!("Unknown model: {model}")));
    }

    Ok((session_id, request))
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let title = match body.request.kind {
        RequestKind::Component | RequestKind::Text => "Error generating response",
        RequestKind::UiElement => "Error generating UI",
    };
    let (session_id, request) =
        apply_catalog(&state.catalog, body).map_err(|e| api_error(title, e))?;

    info!(
        "Received {:?} request for session {}",
        request.kind,
        session_id.as_deref().unwrap_or("<none>")
    );

    let arena = state.arena.clone();
    let response = match session_id {
        Some(session_id) => {
            let sessions = state.sessions.clone();
            detached(async move {
                let (outcome, transcript) =
                    arena.submit(&sessions, &session_id, request).await?;
                Ok::<_, Error>(GenerateResponse::new(outcome, Some((session_id, transcript))))
            })
            .await
        }
        None => arena
            .run(request)
            .await
            .map(|outcome| GenerateResponse::new(outcome, None)),
    }
    .map_err(|e| api_error(title, e))?;

    Ok(Json(response))
}

pub async fn describe_product(
    State(state): State<AppState>,
    Json(body): Json<DescriptionBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let arena = state.arena.clone();
    let DescriptionBody {
        session_id,
        product_name,
        keywords,
    } = body;

    let response = match session_id {
        Some(session_id) => {
            let sessions = state.sessions.clone();
            detached(async move {
                let (outcome, transcript) = arena
                    .submit_description(&sessions, &session_id, &product_name, &keywords)
                    .await?;
                Ok::<_, Error>(GenerateResponse::new(outcome, Some((session_id, transcript))))
            })
            .await
        }
        None => arena
            .describe_product(&product_name, &keywords)
            .await
            .map(|outcome| GenerateResponse::new(outcome, None)),
    }
    .map_err(|e| {
        let title = if matches!(e, Error::Validation(_)) {
            "Missing Fields"
        } else {
            "Error generating description"
        };
        api_error(title, e)
    })?;

    Ok(Json(response))
}

pub async fn recommend(
    State(state): State<AppState>,
    Json(body): Json<RecommendationBody>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let recommendations = state
        .arena
        .recommendation_action(&body.prompt)
        .await
        .map_err(|e| api_error("Error getting recommendations", e))?;

    Ok(Json(RecommendationResponse { recommendations }))
}

pub async fn format(
    State(state): State<AppState>,
    Json(body): Json<FormatBody>,
) -> Result<Json<FormatResponse>, ApiError> {
    let formatted = state
        .arena
        .format_action(&body.raw_response, &body.target)
        .await
        .map_err(|e| api_error("Error formatting response", e))?;

    Ok(Json(FormatResponse { formatted }))
}
