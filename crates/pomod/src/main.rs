mod button;
mod clock;
mod face;
mod scheduler;
mod state_machine;
mod surface;

use anyhow::{Context, Result};
use button::ButtonPress;
use clock::ClockFormatter;
use face::FaceHub;
use pomod_core::config::{self, Config};
use pomod_core::ipc::{self, ClientMsg, DaemonMsg};
use scheduler::TickScheduler;
use state_machine::PhaseTimer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use surface::DisplaySurface;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, error, info, warn};

/// Everything the event loop and IPC handlers touch, one event at a time.
struct Shared {
    timer: PhaseTimer,
    scheduler: TickScheduler,
    clock: ClockFormatter,
    face: FaceHub,
}

impl Shared {
    fn new(config: &Config) -> Self {
        Self {
            timer: PhaseTimer::new(),
            scheduler: TickScheduler::new(),
            clock: ClockFormatter::new(config.clock.format_24h),
            face: FaceHub::new(config.display.color),
        }
    }

    fn press(&mut self) {
        let actions = self.timer.start();
        info!(phase = ?self.timer.phase(), minutes = ?self.timer.remaining_minutes(), "phase started");
        surface::apply_actions(actions, &mut self.face, &mut self.scheduler);
    }

    /// Deliver the pending tick if it is due.
    fn fire_due_tick(&mut self, now: Instant) {
        let Some(token) = self.scheduler.take_due(now) else {
            return;
        };
        let actions = self.timer.on_tick(token);
        if !self.timer.is_running() && !actions.is_empty() {
            info!(next = ?self.timer.phase(), "phase finished");
        }
        surface::apply_actions(actions, &mut self.face, &mut self.scheduler);
    }

    fn refresh_clock(&mut self) {
        let text = self.clock.now_text();
        debug!(clock = %text, "clock tick");
        self.face.set_clock_text(&text);
    }

    fn state_msg(&self) -> DaemonMsg {
        let face = self.face.state();
        DaemonMsg::State {
            phase: self.timer.phase(),
            remaining_minutes: self.timer.remaining_minutes(),
            clock: face.clock.clone(),
            status: face.status.clone(),
            timer: face.timer.clone(),
            theme: face.theme,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pomod=info".parse()?),
        )
        .init();

    info!("pomod starting");

    let config = Config::load().context("loading config")?;
    info!(
        color = config.display.color,
        format_24h = config.clock.format_24h,
        button_key = ?config.input.button_key,
        "config loaded"
    );

    let shared = Arc::new(Mutex::new(Shared::new(&config)));

    // Button presses from hardware keys and IPC clients share one channel
    let (press_tx, mut press_rx) = mpsc::unbounded_channel();

    if let Some(key_code) = config.input.button_key {
        let devices = button::find_button_devices(key_code).context("finding button devices")?;
        if devices.is_empty() {
            warn!(key_code, "no input device reports the button key, hardware button disabled");
        }
        for path in devices {
            let tx = press_tx.clone();
            tokio::spawn(async move {
                if let Err(e) = button::watch_device(path.clone(), key_code, tx).await {
                    error!(path = %path.display(), error = %e, "button watcher failed");
                }
            });
        }
    }

    // Start IPC listener
    let socket_path = config::socket_path();
    // Remove stale socket
    let _ = std::fs::remove_file(&socket_path);
    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let listener = UnixListener::bind(&socket_path)
        .with_context(|| format!("binding socket {}", socket_path.display()))?;
    info!(path = %socket_path.display(), "IPC socket listening");

    let shared_ipc = Arc::clone(&shared);
    let ipc_press_tx = press_tx.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let shared = Arc::clone(&shared_ipc);
                    tokio::spawn(handle_ipc_client(stream, shared, ipc_press_tx.clone()));
                }
                Err(e) => {
                    warn!(error = %e, "IPC accept error");
                }
            }
        }
    });
    drop(press_tx);

    // Main event loop: sleeps until the next tick or clock minute, wakes on presses
    loop {
        let (tick_deadline, clock_deadline) = {
            let shared = shared.lock().await;
            (shared.scheduler.deadline(), shared.clock.deadline())
        };
        let tick_sleep = match tick_deadline {
            Some(dl) => tokio::time::sleep_until(tokio::time::Instant::from_std(dl)),
            None => tokio::time::sleep_until(tokio::time::Instant::now() + Duration::from_secs(86400)),
        };
        let has_tick = tick_deadline.is_some();
        let clock_sleep = tokio::time::sleep_until(tokio::time::Instant::from_std(clock_deadline));

        tokio::select! {
            Some(press) = press_rx.recv() => {
                handle_press(&shared, press).await;
            }
            _ = tick_sleep, if has_tick => {
                shared.lock().await.fire_due_tick(Instant::now());
            }
            _ = clock_sleep => {
                shared.lock().await.refresh_clock();
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    info!("pomod shutting down");
    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}

async fn handle_press(shared: &Mutex<Shared>, press: ButtonPress) {
    let done = match press {
        ButtonPress::Key(path) => {
            info!(device = %path.display(), "button pressed");
            None
        }
        ButtonPress::Client(done) => {
            info!("button pressed via IPC");
            Some(done)
        }
    };
    shared.lock().await.press();
    if let Some(done) = done {
        let _ = done.send(());
    }
}

async fn handle_ipc_client(
    stream: UnixStream,
    shared: Arc<Mutex<Shared>>,
    press_tx: mpsc::UnboundedSender<ButtonPress>,
) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    // Channel for sending messages back to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Writer task
    let write_handle = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut is_face = false;

    while let Ok(Some(line)) = lines.next_line().await {
        let Some(msg) = ipc::decode_client(&line) else {
            debug!(line = %line.trim(), "ignoring malformed IPC line");
            continue;
        };

        match msg {
            ClientMsg::Press => {
                let (done_tx, done_rx) = oneshot::channel();
                // Ack only once the event loop has applied the press
                let ok = press_tx.send(ButtonPress::Client(done_tx)).is_ok()
                    && done_rx.await.is_ok();
                let ack = DaemonMsg::Ack {
                    ok,
                    message: if ok { "pressed".into() } else { "daemon shutting down".into() },
                };
                let _ = tx.send(ipc::encode(&ack));
            }
            ClientMsg::GetState => {
                let state = shared.lock().await.state_msg();
                let _ = tx.send(ipc::encode(&state));
            }
            ClientMsg::RegisterFace => {
                is_face = true;
                shared.lock().await.face.register(tx.clone());
            }
        }
    }

    // Client stopped sending. The hub's clone of `tx` must go too, or the
    // writer never sees the end of its queue.
    if is_face {
        let mut shared = shared.lock().await;
        shared.face.unregister(&tx);
        info!(faces = shared.face.face_count(), "face disconnected");
    }

    // Let queued replies drain before the connection closes
    drop(tx);
    let _ = write_handle.await;
}
