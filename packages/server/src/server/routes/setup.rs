use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::common::ChannelId;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindChannelRequest {
    pub channel_id: String,
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub message: String,
}

/// Bind the counting game to a channel (resets the count).
pub async fn bind_channel_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<BindChannelRequest>,
) -> Result<Json<SetupResponse>, (StatusCode, Json<SetupResponse>)> {
    let channel_id = ChannelId::parse(&request.channel_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(SetupResponse {
                message: e.to_string(),
            }),
        )
    })?;

    Ok(Json(SetupResponse {
        message: state.game.bind_channel(channel_id),
    }))
}
