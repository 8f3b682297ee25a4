use serde::{Deserialize, Serialize};

use crate::common::{ActorId, ChannelId};

/// Highest count the game records, so `next_expected` always exceeds it.
pub const MAX_COUNT: u64 = u64::MAX - 1;

/// The persisted counting game record.
///
/// Stored as one whole JSON document:
/// `{"channelId": string|null, "currentNumber": integer, "lastActorId": string|null}`.
///
/// Invariant: `current_number == 0` implies `last_actor_id == None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub channel_id: Option<ChannelId>,
    pub current_number: u64,
    pub last_actor_id: Option<ActorId>,
}

impl GameState {
    /// The value the next accepted message must carry.
    pub fn next_expected(&self) -> u64 {
        self.current_number.saturating_add(1)
    }

    /// True when `value` can be recorded and still leave a successor.
    pub fn can_record(value: u64) -> bool {
        value <= MAX_COUNT
    }

    pub fn is_bound_to(&self, channel_id: &ChannelId) -> bool {
        self.channel_id.as_ref() == Some(channel_id)
    }

    /// Bind the game to a channel and start counting from scratch.
    pub fn bind(&mut self, channel_id: ChannelId) {
        self.channel_id = Some(channel_id);
        self.reset();
    }

    /// Record an accepted count.
    pub fn advance(&mut self, value: u64, actor_id: ActorId) {
        self.current_number = value;
        self.last_actor_id = if value == 0 { None } else { Some(actor_id) };
    }

    /// Zero the counter; the channel binding is kept.
    pub fn reset(&mut self) {
        self.current_number = 0;
        self.last_actor_id = None;
    }

    /// Repair a record loaded from storage that breaks an invariant.
    ///
    /// A count past [`MAX_COUNT`] has no representable successor and is reset.
    pub fn normalized(mut self) -> Self {
        if self.current_number > MAX_COUNT {
            self.reset();
        }
        if self.current_number == 0 {
            self.last_actor_id = None;
        }
        self
    }

    pub fn status(&self) -> GameStatus {
        match &self.channel_id {
            Some(channel_id) => GameStatus::Configured {
                channel_id: channel_id.clone(),
                current_number: self.current_number,
                next_expected: self.next_expected(),
            },
            None => GameStatus::Unconfigured,
        }
    }
}

/// Read-only view returned by status queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Configured {
        channel_id: ChannelId,
        current_number: u64,
        next_expected: u64,
    },
    Unconfigured,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_unconfigured_zero() {
        let state = GameState::default();
        assert_eq!(state.channel_id, None);
        assert_eq!(state.current_number, 0);
        assert_eq!(state.last_actor_id, None);
        assert_eq!(state.next_expected(), 1);
        assert_eq!(state.status(), GameStatus::Unconfigured);
    }

    #[test]
    fn test_record_shape_uses_camel_case() {
        let state = GameState {
            channel_id: Some(ChannelId::new("100")),
            current_number: 3,
            last_actor_id: Some(ActorId::new("7")),
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"channelId": "100", "currentNumber": 3, "lastActorId": "7"})
        );
    }

    #[test]
    fn test_unset_fields_serialize_as_null() {
        assert_eq!(
            serde_json::to_value(GameState::default()).unwrap(),
            json!({"channelId": null, "currentNumber": 0, "lastActorId": null})
        );
    }

    #[test]
    fn test_count_without_successor_is_reset_on_load() {
        let state = GameState {
            channel_id: Some(ChannelId::new("c")),
            current_number: u64::MAX,
            last_actor_id: Some(ActorId::new("a")),
        }
        .normalized();

        assert!(state.is_bound_to(&ChannelId::new("c")));
        assert_eq!(state.current_number, 0);
        assert_eq!(state.last_actor_id, None);
        assert_eq!(state.next_expected(), 1);
    }

    #[test]
    fn test_top_count_still_has_successor() {
        let state = GameState {
            channel_id: Some(ChannelId::new("c")),
            current_number: MAX_COUNT,
            last_actor_id: Some(ActorId::new("a")),
        }
        .normalized();

        assert_eq!(state.current_number, MAX_COUNT);
        assert!(state.next_expected() > state.current_number);
    }

    #[test]
    fn test_bind_resets_counter_and_actor() {
        let mut state = GameState {
            channel_id: Some(ChannelId::new("old")),
            current_number: 12,
            last_actor_id: Some(ActorId::new("a")),
        };
        state.bind(ChannelId::new("new"));

        assert!(state.is_bound_to(&ChannelId::new("new")));
        assert_eq!(state.current_number, 0);
        assert_eq!(state.last_actor_id, None);
    }

    #[test]
    fn test_reset_keeps_channel() {
        let mut state = GameState::default();
        state.bind(ChannelId::new("c"));
        state.advance(4, ActorId::new("a"));
        state.reset();

        assert!(state.is_bound_to(&ChannelId::new("c")));
        assert_eq!(state.current_number, 0);
        assert_eq!(state.last_actor_id, None);
    }

    #[test]
    fn test_normalized_clears_actor_at_zero() {
        let state = GameState {
            channel_id: None,
            current_number: 0,
            last_actor_id: Some(ActorId::new("ghost")),
        }
        .normalized();
        assert_eq!(state.last_actor_id, None);
    }

    #[test]
    fn test_status_reports_next_expected() {
        let mut state = GameState::default();
        state.bind(ChannelId::new("c"));
        state.advance(9, ActorId::new("a"));

        assert_eq!(
            state.status(),
            GameStatus::Configured {
                channel_id: ChannelId::new("c"),
                current_number: 9,
                next_expected: 10,
            }
        );
    }
}
