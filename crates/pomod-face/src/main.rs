mod ipc_client;
mod layer_shell;
mod style;
mod window;

use gtk4::glib;
use gtk4::prelude::*;
use pomod_core::config::Config;
use pomod_core::ipc::DaemonMsg;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pomod_face=info".parse()?),
        )
        .init();

    info!("pomod-face starting");

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "bad config, using defaults");
        Config::default()
    });
    let font_size = config.display.font_size;

    let app = gtk4::Application::builder()
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        let face = Rc::new(window::build_face(app, font_size));
        face.window.present();

        // Connect to daemon IPC
        let (ipc_rx, write_stream) = match ipc_client::connect() {
            Ok((rx, stream)) => {
                info!("connected to pomod daemon");
                (Some(rx), Some(stream))
            }
            Err(e) => {
                warn!(error = %e, "failed to connect to daemon, running in standalone mode");
                (None, None)
            }
        };

        let write_stream = Rc::new(RefCell::new(write_stream));
        face.button.connect_clicked(move |_| {
            let mut stream = write_stream.borrow_mut();
            let Some(stream) = stream.as_mut() else {
                warn!("not connected to daemon, press ignored");
                return;
            };
            if let Err(e) = ipc_client::send_press(stream) {
                warn!(error = %e, "press not delivered");
            }
        });

        if let Some(rx) = ipc_rx {
            // Poll IPC messages on the GTK main loop
            let face = Rc::clone(&face);
            glib::timeout_add_local(Duration::from_millis(16), move || {
                while let Ok(msg) = rx.try_recv() {
                    match msg {
                        DaemonMsg::Clock { text } => face.clock.set_text(&text),
                        DaemonMsg::Status { text } => face.status.set_text(&text),
                        DaemonMsg::Timer { text } => face.timer.set_text(&text),
                        DaemonMsg::Theme { theme } => window::set_theme(&face.window, theme),
                        DaemonMsg::Pulse => window::pulse(&face.window),
                        _ => {}
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    });

    app.run_with_args::<&str>(&[]);
    Ok(())
}
