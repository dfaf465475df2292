use plotters::style::RGBAColor;

/// Chart theme configuration, matching the dark HTML report
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub line_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(17, 17, 17, 1.0),
            text_color: RGBAColor(224, 224, 224, 0.9),
            grid_color: RGBAColor(255, 255, 255, 0.12),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            line_color: RGBAColor(74, 163, 255, 1.0),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub marker_size: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            marker_size: 4,
            font_size: 15,
            caption_size: 24,
            margin: 10,
            label_area_size: 50,
        }
    }
}
