use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Item rectangle in logical host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|value| value.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.is_valid() {
            return Err(ChartError::InvalidData(
                "rect must be finite with non-negative size".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::from_size(640.0, 480.0)
    }
}

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Font request forwarded to the label renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub point_size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(ChartError::InvalidData(
                "font point size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_owned(),
            point_size: 20.0,
            bold: false,
        }
    }
}

/// Visual theme values the renderer consumes as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub window_color: Color,
    pub background_color: Color,
    pub grid_color: Color,
    pub label_text_color: Color,
    pub label_background_color: Color,
    pub base_colors: Vec<Color>,
    pub light_strength: f32,
    pub ambient_light_strength: f32,
}

impl Theme {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.window_color,
            self.background_color,
            self.grid_color,
            self.label_text_color,
            self.label_background_color,
        ]
        .iter()
        .chain(self.base_colors.iter())
        {
            color.validate()?;
        }
        if !self.light_strength.is_finite() || !(0.0..=10.0).contains(&self.light_strength) {
            return Err(ChartError::InvalidData(
                "light strength must be finite and in [0, 10]".to_owned(),
            ));
        }
        if !self.ambient_light_strength.is_finite()
            || !(0.0..=1.0).contains(&self.ambient_light_strength)
        {
            return Err(ChartError::InvalidData(
                "ambient light strength must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    /// Base color for the series at `visual_index`, cycling through the palette.
    #[must_use]
    pub fn base_color(&self, visual_index: usize) -> Color {
        if self.base_colors.is_empty() {
            return Color::rgb(0.5, 0.5, 0.5);
        }
        self.base_colors[visual_index % self.base_colors.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_color: Color::rgb(0.0, 0.0, 0.0),
            background_color: Color::rgb(0.16, 0.16, 0.16),
            grid_color: Color::rgb(0.35, 0.35, 0.35),
            label_text_color: Color::rgb(0.9, 0.9, 0.9),
            label_background_color: Color::rgba(0.2, 0.2, 0.2, 0.8),
            base_colors: vec![
                Color::rgb(0.26, 0.52, 0.96),
                Color::rgb(0.86, 0.27, 0.22),
                Color::rgb(0.96, 0.71, 0.0),
                Color::rgb(0.06, 0.62, 0.35),
            ],
            light_strength: 5.0,
            ambient_light_strength: 0.25,
        }
    }
}

/// How pointer selection highlights bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectionMode {
    None,
    #[default]
    Item,
    Row,
    Column,
    ItemAndRow,
    ItemAndColumn,
    RowAndColumn,
}

/// Camera orbit around the scene origin, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRotation {
    pub horizontal: f32,
    pub vertical: f32,
}

impl CameraRotation {
    pub const HORIZONTAL_LIMIT: f32 = 180.0;
    pub const VERTICAL_LIMIT: f32 = 90.0;

    /// Builds a rotation clamped to the orbit limits. Non-finite angles collapse to 0.
    #[must_use]
    pub fn clamped(horizontal: f32, vertical: f32) -> Self {
        let finite_or_zero = |value: f32| if value.is_finite() { value } else { 0.0 };
        Self {
            horizontal: finite_or_zero(horizontal)
                .clamp(-Self::HORIZONTAL_LIMIT, Self::HORIZONTAL_LIMIT),
            vertical: finite_or_zero(vertical).clamp(-Self::VERTICAL_LIMIT, Self::VERTICAL_LIMIT),
        }
    }
}

impl Default for CameraRotation {
    fn default() -> Self {
        Self {
            horizontal: -45.0,
            vertical: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraRotation, Color, FontSpec, Rect, Theme};

    #[test]
    fn rect_rejects_negative_size_and_nan() {
        assert!(Rect::new(0.0, 0.0, -1.0, 10.0).validate().is_err());
        assert!(Rect::new(f32::NAN, 0.0, 1.0, 10.0).validate().is_err());
        assert!(Rect::from_size(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn theme_base_color_cycles_through_palette() {
        let theme = Theme::default();
        let count = theme.base_colors.len();
        assert_eq!(theme.base_color(0), theme.base_color(count));
    }

    #[test]
    fn theme_validation_reports_out_of_range_channel() {
        let mut theme = Theme::default();
        theme.grid_color = Color::rgb(1.5, 0.0, 0.0);
        assert!(theme.validate().is_err());
    }

    #[test]
    fn font_point_size_must_be_positive_and_finite() {
        assert!(FontSpec::default().validate().is_ok());
        for point_size in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let font = FontSpec {
                point_size,
                ..FontSpec::default()
            };
            assert!(font.validate().is_err());
        }
    }

    #[test]
    fn camera_rotation_clamps_to_orbit_limits() {
        let rotation = CameraRotation::clamped(270.0, -120.0);
        assert_eq!(rotation.horizontal, 180.0);
        assert_eq!(rotation.vertical, -90.0);

        let rotation = CameraRotation::clamped(f32::NAN, 30.0);
        assert_eq!(rotation.horizontal, 0.0);
        assert_eq!(rotation.vertical, 30.0);
    }
}
