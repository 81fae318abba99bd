use anyhow::{Context, Result};
use evdev::{Device, EventType, InputEvent, Key};
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A primary button press, tagged with where it came from.
#[derive(Debug)]
pub enum ButtonPress {
    /// Hardware key on an input device.
    Key(PathBuf),
    /// `press` message from a face or pomodctl. Signalled once the press
    /// has been applied, so the client's ack reflects the new state.
    Client(oneshot::Sender<()>),
}

/// Find all input devices under /dev/input/ that can emit `key_code`.
pub fn find_button_devices(key_code: u16) -> Result<Vec<PathBuf>> {
    let mut devices = Vec::new();
    let input_dir = Path::new("/dev/input");

    for entry in std::fs::read_dir(input_dir).context("reading /dev/input")? {
        let entry = entry?;
        let path = entry.path();

        // Only look at eventN devices
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !name.starts_with("event") {
            continue;
        }

        match Device::open(&path) {
            Ok(dev) => {
                let has_key = dev
                    .supported_keys()
                    .map_or(false, |keys| keys.contains(Key::new(key_code)));
                if has_key {
                    info!(path = %path.display(), name = ?dev.name(), key_code, "found button device");
                    devices.push(path);
                }
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping device");
            }
        }
    }

    Ok(devices)
}

/// True for the initial press of `key_code`. Releases (0) and autorepeat (2)
/// do not count as presses.
pub fn is_button_press(event: &InputEvent, key_code: u16) -> bool {
    event.event_type() == EventType::KEY && event.code() == key_code && event.value() == 1
}

/// Watch a device and forward presses of `key_code` to the channel.
///
/// The device is not grabbed, so the key keeps working for other programs.
/// Runs until the receiver is dropped or the device errors.
pub async fn watch_device(
    path: PathBuf,
    key_code: u16,
    tx: mpsc::UnboundedSender<ButtonPress>,
) -> Result<()> {
    let dev = Device::open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let dev_name = dev.name().unwrap_or("unknown").to_string();
    info!(device = %dev_name, path = %path.display(), key_code, "watching button");

    let mut stream = dev.into_event_stream()
        .context("creating event stream")?;

    loop {
        match stream.next_event().await {
            Ok(event) => {
                if !is_button_press(&event, key_code) {
                    continue;
                }
                debug!(device = %dev_name, "button pressed");
                if tx.send(ButtonPress::Key(path.clone())).is_err() {
                    // Receiver dropped, shut down
                    break;
                }
            }
            Err(e) => {
                warn!(device = %dev_name, error = %e, "device error, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_PAUSE: u16 = 119;
    const KEY_ENTER: u16 = 28;

    #[test]
    fn press_of_configured_key_counts() {
        let ev = InputEvent::new(EventType::KEY, KEY_PAUSE, 1);
        assert!(is_button_press(&ev, KEY_PAUSE));
    }

    #[test]
    fn release_and_repeat_do_not_count() {
        assert!(!is_button_press(&InputEvent::new(EventType::KEY, KEY_PAUSE, 0), KEY_PAUSE));
        assert!(!is_button_press(&InputEvent::new(EventType::KEY, KEY_PAUSE, 2), KEY_PAUSE));
    }

    #[test]
    fn other_keys_do_not_count() {
        let ev = InputEvent::new(EventType::KEY, KEY_ENTER, 1);
        assert!(!is_button_press(&ev, KEY_PAUSE));
    }

    #[test]
    fn non_key_events_do_not_count() {
        let syn = InputEvent::new(EventType::SYNCHRONIZATION, KEY_PAUSE, 1);
        assert!(!is_button_press(&syn, KEY_PAUSE));
    }
}
