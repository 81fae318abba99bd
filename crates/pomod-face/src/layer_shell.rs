use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use tracing::info;

const CORNER_MARGIN: i32 = 12;

/// Try to pin the face to the top-right corner as a layer-shell surface
/// (wlroots compositors). Returns true if layer-shell was applied.
/// NOTE: GNOME Wayland does not support wlr-layer-shell; the face falls back
/// to a regular window there.
pub fn try_init_layer_shell(window: &gtk4::Window) -> bool {
    if !gtk4_layer_shell::is_supported() {
        info!("layer-shell not supported on this compositor");
        return false;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Top);
    // Pointer clicks on the button still work without keyboard focus
    window.set_keyboard_mode(KeyboardMode::None);

    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Right, true);
    window.set_anchor(Edge::Bottom, false);
    window.set_anchor(Edge::Left, false);
    window.set_margin(Edge::Top, CORNER_MARGIN);
    window.set_margin(Edge::Right, CORNER_MARGIN);

    info!("layer-shell initialized");
    true
}
