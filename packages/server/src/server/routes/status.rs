use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::ChannelId;
use crate::domains::counting::GameStatus;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatusResponse {
    #[serde(rename_all = "camelCase")]
    Configured {
        configured: bool,
        channel_id: ChannelId,
        current_number: u64,
        next_expected: u64,
    },
    Unconfigured { configured: bool, message: String },
}

impl From<GameStatus> for StatusResponse {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Configured {
                channel_id,
                current_number,
                next_expected,
            } => StatusResponse::Configured {
                configured: true,
                channel_id,
                current_number,
                next_expected,
            },
            GameStatus::Unconfigured => StatusResponse::Unconfigured {
                configured: false,
                message: "No counting channel has been set up yet.".to_string(),
            },
        }
    }
}

/// Current game status
pub async fn status_handler(Extension(state): Extension<AppState>) -> Json<StatusResponse> {
    Json(state.game.status().into())
}
