//! Minimal line chart: no axes, no labels, just the series scaled into a box.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklineSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SparklineSize {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 120.0,
        }
    }
}

/// 將數列依 min/max 正規化到畫布座標；y 軸向下，最大值在頂端
pub fn sparkline_points(values: &[f64], size: SparklineSize) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last = values.len().saturating_sub(1);

    values
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let x = if last == 0 {
                0.0
            } else {
                i as f64 / last as f64 * size.width
            };
            let y = size.height - ((t - min) / range) * size.height;
            (x, y)
        })
        .collect()
}

pub fn render_sparkline_svg(values: &[f64], size: SparklineSize, stroke: &str) -> String {
    let points = sparkline_points(values, size)
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let polyline = if points.is_empty() {
        String::new()
    } else {
        format!(
            r#"<polyline fill="none" stroke-width="2" stroke="{}" points="{}"/>"#,
            html_escape::encode_double_quoted_attribute(stroke),
            points
        )
    };

    format!(
        r#"<svg class="spark" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="Temperature trend">{polyline}</svg>"#,
        w = size.width,
        h = size.height,
        polyline = polyline
    )
}
