use crate::phase::Phase;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Messages from daemon to faces/clients (JSON-lines over Unix socket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DaemonMsg {
    /// New wall-clock text for the clock field.
    #[serde(rename = "clock")]
    Clock { text: String },
    /// New text for the status field.
    #[serde(rename = "status")]
    Status { text: String },
    /// New text for the timer field. Empty when a phase ends.
    #[serde(rename = "timer")]
    Timer { text: String },
    /// Background theme change.
    #[serde(rename = "theme")]
    Theme { theme: Theme },
    /// Short haptic pulse at a phase boundary.
    #[serde(rename = "pulse")]
    Pulse,
    /// Full state response.
    #[serde(rename = "state")]
    State {
        phase: Phase,
        /// None while idle.
        remaining_minutes: Option<u32>,
        clock: String,
        status: String,
        timer: String,
        theme: Theme,
        version: String,
    },
    /// Acknowledgement for commands.
    #[serde(rename = "ack")]
    Ack { ok: bool, message: String },
}

/// Messages from faces/clients to daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    /// The primary button was pressed.
    #[serde(rename = "press")]
    Press,
    /// Request current state.
    #[serde(rename = "get_state")]
    GetState,
    /// Face client announcing itself (for routing display updates).
    #[serde(rename = "register_face")]
    RegisterFace,
}

/// Serialize a message as a JSON line (with trailing newline).
pub fn encode(msg: &impl Serialize) -> String {
    let mut s = serde_json::to_string(msg).expect("serialize IPC message");
    s.push('\n');
    s
}

/// Deserialize a JSON line. Returns None on empty/whitespace input.
pub fn decode_daemon(line: &str) -> Option<DaemonMsg> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

pub fn decode_client(line: &str) -> Option<ClientMsg> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_single_trailing_newline() {
        let encoded = encode(&DaemonMsg::Status { text: "Work...".into() });
        assert!(encoded.ends_with('\n'));
        assert_eq!(encoded.matches('\n').count(), 1);
    }

    #[test]
    fn theme_message_uses_lowercase_color() {
        let encoded = encode(&DaemonMsg::Theme { theme: Theme::Red });
        assert_eq!(encoded, "{\"type\":\"theme\",\"theme\":\"red\"}\n");
    }

    #[test]
    fn press_message_wire_format() {
        assert_eq!(encode(&ClientMsg::Press), "{\"type\":\"press\"}\n");
        assert_eq!(decode_client("{\"type\":\"press\"}"), Some(ClientMsg::Press));
    }

    #[test]
    fn idle_state_has_null_remaining() {
        let msg = DaemonMsg::State {
            phase: Phase::Break,
            remaining_minutes: None,
            clock: "12:34".into(),
            status: "Break Time!".into(),
            timer: String::new(),
            theme: Theme::White,
            version: "0.1.0".into(),
        };
        let encoded = encode(&msg);
        assert!(encoded.contains("\"remaining_minutes\":null"));
        assert!(encoded.contains("\"phase\":\"break\""));
        assert_eq!(decode_daemon(&encoded), Some(msg));
    }

    #[test]
    fn empty_timer_text_survives_the_wire() {
        let encoded = encode(&DaemonMsg::Timer { text: String::new() });
        assert_eq!(
            decode_daemon(&encoded),
            Some(DaemonMsg::Timer { text: String::new() })
        );
    }

    // --- empty/whitespace input → None ---

    #[test]
    fn decode_daemon_returns_none_for_empty() {
        assert!(decode_daemon("").is_none());
        assert!(decode_daemon("   ").is_none());
        assert!(decode_daemon("\n").is_none());
    }

    #[test]
    fn decode_client_returns_none_for_empty() {
        assert!(decode_client("").is_none());
        assert!(decode_client("  \n").is_none());
    }

    // --- invalid JSON → None (not panic) ---

    #[test]
    fn decode_returns_none_for_garbage() {
        assert!(decode_daemon("not json").is_none());
        assert!(decode_daemon("{\"type\":\"unknown_variant\"}").is_none());
        assert!(decode_client("{\"type\":\"theme\",\"theme\":\"purple\"}").is_none());
        assert!(decode_client("{}").is_none());
    }
}
