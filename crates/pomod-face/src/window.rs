use gtk4::prelude::*;
use pomod_core::phase::READY_STATUS;
use pomod_core::theme::Theme;
use tracing::debug;

use crate::layer_shell;
use crate::style;

/// The face widgets updated from daemon messages.
pub struct Face {
    pub window: gtk4::Window,
    pub clock: gtk4::Label,
    pub status: gtk4::Label,
    pub timer: gtk4::Label,
    pub button: gtk4::Button,
}

/// Build the face window: clock, status and timer stacked on the left, the
/// primary button in a bar on the right.
pub fn build_face(app: &gtk4::Application, font_size: u32) -> Face {
    let window = gtk4::Window::builder()
        .application(app)
        .title("pomod")
        .resizable(false)
        .default_width(144)
        .default_height(168)
        .build();

    let has_layer_shell = layer_shell::try_init_layer_shell(&window);
    debug!(has_layer_shell, "face window created");

    let clock = gtk4::Label::new(None);
    clock.add_css_class("clock");
    let status = gtk4::Label::new(Some(READY_STATUS));
    let timer = gtk4::Label::new(None);

    let fields = gtk4::Box::new(gtk4::Orientation::Vertical, 6);
    fields.set_hexpand(true);
    fields.set_valign(gtk4::Align::Center);
    for label in [&clock, &status, &timer] {
        label.set_halign(gtk4::Align::Center);
        fields.append(label);
    }

    let button = gtk4::Button::with_label("Start");
    let bar = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    bar.add_css_class("bar");
    bar.set_valign(gtk4::Align::Fill);
    button.set_vexpand(true);
    bar.append(&button);

    let root = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
    root.append(&fields);
    root.append(&bar);
    window.set_child(Some(&root));

    let css_provider = gtk4::CssProvider::new();
    css_provider.load_from_data(&style::theme_css(font_size));
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    set_theme(&window, Theme::White);

    Face {
        window,
        clock,
        status,
        timer,
        button,
    }
}

/// Swap the window's theme class.
pub fn set_theme(window: &gtk4::Window, theme: Theme) {
    for other in Theme::ALL {
        window.remove_css_class(other.css_class());
    }
    window.add_css_class(theme.css_class());
    debug!(?theme, "theme applied");
}

/// Haptic stand-in: ring the bell and raise the face.
pub fn pulse(window: &gtk4::Window) {
    window.display().beep();
    window.present();
    debug!("pulse");
}
