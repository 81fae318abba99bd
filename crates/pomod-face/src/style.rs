use pomod_core::theme::Theme;

/// Stylesheet with one rule set per theme, selected by the window's CSS class.
pub fn theme_css(font_size: u32) -> String {
    let clock_size = font_size * 3 / 4;
    let mut css = format!(
        "
        label {{
            font-weight: bold;
            font-size: {font_size}px;
        }}
        label.clock {{
            font-weight: normal;
            font-size: {clock_size}px;
        }}
        .bar {{
            padding: 6px;
        }}
        "
    );
    for theme in Theme::ALL {
        let p = theme.palette();
        let class = theme.css_class();
        css.push_str(&format!(
            "
        window.{class} {{ background-color: {bg}; }}
        window.{class} label {{ color: {text}; }}
        window.{class} .bar {{ background-color: {bar}; }}
        ",
            bg = p.background,
            text = p.text,
            bar = p.bar,
        ));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_rule() {
        let css = theme_css(28);
        for theme in Theme::ALL {
            assert!(css.contains(&format!("window.{}", theme.css_class())), "{:?}", theme);
        }
    }

    #[test]
    fn palette_colors_are_used() {
        let css = theme_css(28);
        assert!(css.contains("background-color: #ff0000"));
        assert!(css.contains("background-color: #aa0000"));
        assert!(css.contains("background-color: #00ff00"));
    }

    #[test]
    fn clock_font_is_smaller() {
        let css = theme_css(28);
        assert!(css.contains("font-size: 28px"));
        assert!(css.contains("font-size: 21px"));
    }
}
