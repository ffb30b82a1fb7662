use std::env;

const MIN_PLOT_PX: f64 = 64.0;
const MAX_PLOT_PX: f64 = 8192.0;

/// Pixel placement and strokes for a chart. The plot area starts at
/// `(origin_x, origin_y)` (top-left) and spans `width` x `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
    pub line_color: String,
    pub line_width: f64,
    pub axis_color: String,
    pub axis_width: f64,
    // Distance of tick labels from the plot edge.
    pub label_offset: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            origin_x: 64.0,
            origin_y: 64.0,
            width: 768.0,
            height: 512.0,
            line_color: "#1133ff".to_string(),
            line_width: 2.0,
            axis_color: "#111".to_string(),
            axis_width: 4.0,
            label_offset: 32.0,
        }
    }
}

impl ChartLayout {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `CHART_*` keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let number = |key: &str| {
            lookup(key)
                .and_then(|val| val.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        Self {
            origin_x: number("CHART_ORIGIN_X")
                .map(|v| v.clamp(0.0, MAX_PLOT_PX))
                .unwrap_or(d.origin_x),
            origin_y: number("CHART_ORIGIN_Y")
                .map(|v| v.clamp(0.0, MAX_PLOT_PX))
                .unwrap_or(d.origin_y),
            width: number("CHART_WIDTH")
                .map(|v| v.clamp(MIN_PLOT_PX, MAX_PLOT_PX))
                .unwrap_or(d.width),
            height: number("CHART_HEIGHT")
                .map(|v| v.clamp(MIN_PLOT_PX, MAX_PLOT_PX))
                .unwrap_or(d.height),
            line_color: lookup("CHART_LINE_COLOR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(d.line_color),
            ..d
        }
    }

    /// Full drawing surface: the plot plus a margin equal to the origin on each side.
    pub fn canvas_size(&self) -> (f64, f64) {
        (
            self.width + 2.0 * self.origin_x,
            self.height + 2.0 * self.origin_y,
        )
    }
}
