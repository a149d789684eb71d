//! Print the layout geometry for a photo count.

use photobox_frame_model::LayoutVariant;
use photobox_layout_core::compute_geometry;

pub fn run(count: usize, layout: &str, aspect: f64) -> anyhow::Result<()> {
    let variant: LayoutVariant = layout.parse()?;
    let geometry = compute_geometry(count, variant, Some(aspect))?;
    println!("{}", serde_json::to_string_pretty(&geometry)?);
    Ok(())
}
