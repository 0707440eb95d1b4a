//! Game pass activity query.

use crate::domain::foundation::GamePassId;
use crate::ports::PlayerSession;

/// Whether `game_pass_id` is owned and active in the session's document.
///
/// False when the pass is unknown or the document is not loaded.
pub fn is_game_pass_active(session: &PlayerSession, game_pass_id: GamePassId) -> bool {
    session
        .document
        .read()
        .map(|data| data.is_game_pass_active(game_pass_id))
        .unwrap_or(false)
}
