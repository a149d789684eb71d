//! List frame themes.

use photobox_frame_model::ThemeId;

pub fn run() -> anyhow::Result<()> {
    println!("{:<14} {:<10} {:<10} {:<16} Decorations", "Theme", "Background", "Text", "Border");
    println!("{}", "=".repeat(66));

    for id in ThemeId::ALL {
        let theme = id.spec();
        let border = format!("{} {}px", theme.border_color, theme.border_width);
        let decorations = theme
            .decorations
            .map(|glyphs| glyphs.join(" "))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<14} {:<10} {:<10} {:<16} {}",
            id.as_str(),
            theme.background.to_string(),
            theme.text_color.to_string(),
            border,
            decorations
        );
    }

    Ok(())
}
