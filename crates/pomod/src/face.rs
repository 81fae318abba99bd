use crate::surface::{DisplaySurface, Haptics};
use pomod_core::ipc::{self, DaemonMsg};
use pomod_core::phase::READY_STATUS;
use pomod_core::theme::Theme;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// What a face should currently be showing.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceState {
    pub clock: String,
    pub status: String,
    pub timer: String,
    pub theme: Theme,
}

impl Default for FaceState {
    fn default() -> Self {
        Self {
            clock: String::new(),
            status: READY_STATUS.to_string(),
            timer: String::new(),
            theme: Theme::White,
        }
    }
}

/// Display surface and haptics backed by the connected face clients.
///
/// Every change is cached and broadcast as a JSON line. Faces that
/// register late get the cached state replayed.
pub struct FaceHub {
    color: bool,
    state: FaceState,
    face_txs: Vec<mpsc::UnboundedSender<String>>,
}

impl FaceHub {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            state: FaceState::default(),
            face_txs: Vec::new(),
        }
    }

    pub fn state(&self) -> &FaceState {
        &self.state
    }

    /// Subscribe a face and bring it up to date.
    pub fn register(&mut self, tx: mpsc::UnboundedSender<String>) {
        for msg in self.snapshot() {
            let _ = tx.send(ipc::encode(&msg));
        }
        self.face_txs.push(tx);
        info!(faces = self.face_txs.len(), "face registered");
    }

    /// Forget the face behind `tx`, plus any face already gone.
    pub fn unregister(&mut self, tx: &mpsc::UnboundedSender<String>) {
        self.face_txs
            .retain(|face| !face.same_channel(tx) && !face.is_closed());
    }

    pub fn face_count(&self) -> usize {
        self.face_txs.len()
    }

    fn snapshot(&self) -> Vec<DaemonMsg> {
        vec![
            DaemonMsg::Clock {
                text: self.state.clock.clone(),
            },
            DaemonMsg::Status {
                text: self.state.status.clone(),
            },
            DaemonMsg::Timer {
                text: self.state.timer.clone(),
            },
            DaemonMsg::Theme {
                theme: self.state.theme,
            },
        ]
    }

    fn broadcast(&mut self, msg: &DaemonMsg) {
        let line = ipc::encode(msg);
        self.face_txs.retain(|tx| tx.send(line.clone()).is_ok());
    }
}

impl DisplaySurface for FaceHub {
    fn set_clock_text(&mut self, text: &str) {
        self.state.clock = text.to_string();
        self.broadcast(&DaemonMsg::Clock { text: text.into() });
    }

    fn set_status_text(&mut self, text: &str) {
        self.state.status = text.to_string();
        self.broadcast(&DaemonMsg::Status { text: text.into() });
    }

    fn set_timer_text(&mut self, text: &str) {
        self.state.timer = text.to_string();
        self.broadcast(&DaemonMsg::Timer { text: text.into() });
    }

    fn set_background_theme(&mut self, theme: Theme) {
        if !self.supports_color() {
            debug!(?theme, "monochrome display, theme ignored");
            return;
        }
        self.state.theme = theme;
        self.broadcast(&DaemonMsg::Theme { theme });
    }

    fn supports_color(&self) -> bool {
        self.color
    }
}

impl Haptics for FaceHub {
    fn pulse_short(&mut self) {
        info!(faces = self.face_txs.len(), "haptic pulse");
        self.broadcast(&DaemonMsg::Pulse);
    }
}
