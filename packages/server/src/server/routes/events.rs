use axum::{extract::Extension, Json};

use crate::domains::counting::{Outcome, RawChatEvent, SkipReason};
use crate::server::app::AppState;

/// Chat event intake
///
/// The connector posts every message it sees here. Bot-authored events are
/// dropped before they reach the game; everything else is processed and the
/// resulting outcome is echoed back.
pub async fn chat_event_handler(
    Extension(state): Extension<AppState>,
    Json(event): Json<RawChatEvent>,
) -> Json<Outcome> {
    let outcome = match event.into_candidate(state.bot_user_id.as_ref()) {
        Some(message) => state.game.handle_message(message).await,
        None => Outcome::NotApplicable {
            skipped: SkipReason::BotAuthored,
        },
    };

    Json(outcome)
}
