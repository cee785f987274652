use click_sim::overlay::{LABEL_CHANNEL, NEGATIVE_CHANNEL, POSITIVE_CHANNEL};
use click_sim::prelude::*;
use ndarray::{ArrayD, Ix3};

/// Render a 2D overlay from [`compose_overlay`] as text, one character per pixel:
/// `+` positive, `-` negative, `#` label, `.` background.
pub fn render_overlay_2d(overlay: &ArrayD<f32>) -> anyhow::Result<String> {
    let overlay = overlay.view().into_dimensionality::<Ix3>()?;
    let (rows, cols, _) = overlay.dim();

    let mut out = String::with_capacity(rows * (cols + 1));
    for r in 0..rows {
        for c in 0..cols {
            let ch = if overlay[[r, c, POSITIVE_CHANNEL]] > 0.0 {
                '+'
            } else if overlay[[r, c, NEGATIVE_CHANNEL]] > 0.0 {
                '-'
            } else if overlay[[r, c, LABEL_CHANNEL]] > 0.0 {
                '#'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Print every click of `set` as `object_id: [i, j(, k)]`.
pub fn print_records(title: &str, set: &ClickSet) {
    println!("{title}:");
    for record in set.records() {
        println!("  {}: {:?}", record.object_id, record.coord.as_slice());
    }
}
