//! Render-facing attributes for a star, in the shape a DOM or canvas layer
//! consumes: percent position, pixel size, box-shadow glow and fill color.

use serde::Serialize;

use crate::star::{Star, StarId};

/// Everything a rendering layer needs to draw one star.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderAttributes {
    /// Star this snapshot belongs to.
    pub id: StarId,
    /// Left offset in percent of the container width.
    pub left_percent: f64,
    /// Top offset in percent of the container height.
    pub top_percent: f64,
    /// Width and height in pixels.
    pub size_px: f64,
    /// Box-shadow blur radius in pixels.
    pub glow_blur_px: f64,
    /// Box-shadow alpha.
    pub glow_alpha: f64,
    /// CSS background color.
    pub background: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl RenderAttributes {
    /// Snapshot the current visual state of `star`.
    pub fn from_star(star: &Star) -> Self {
        Self {
            id: star.id,
            left_percent: star.position.x,
            top_percent: star.position.y,
            size_px: star.size,
            glow_blur_px: star.glow.radius,
            glow_alpha: star.glow.alpha,
            background: star.color.to_css(),
            opacity: star.opacity(),
        }
    }

    /// Snapshot a whole population.
    pub fn snapshot(stars: &[Star]) -> Vec<Self> {
        stars.iter().map(Self::from_star).collect()
    }

    /// CSS `box-shadow` value for the glow.
    pub fn box_shadow(&self) -> String {
        format!(
            "0 0 {}px rgba(255, 255, 255, {})",
            self.glow_blur_px, self.glow_alpha
        )
    }

    /// Inline CSS for an absolutely positioned round element.
    pub fn inline_style(&self) -> String {
        format!(
            "position: absolute; left: {}%; top: {}%; width: {}px; height: {}px; \
             border-radius: 50%; background-color: {}; box-shadow: {}; opacity: {}",
            self.left_percent,
            self.top_percent,
            self.size_px,
            self.size_px,
            self.background,
            self.box_shadow(),
            self.opacity
        )
    }
}

impl From<&Star> for RenderAttributes {
    fn from(star: &Star) -> Self {
        Self::from_star(star)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::{StarColor, StarKind, StarPosition};
    use crate::tier::SizeTier;

    fn star() -> Star {
        let mut star = Star::new(
            StarId(3),
            StarKind::Primary(SizeTier::VeryLarge),
            StarPosition::new(12.5, -3.0),
            5.0,
            SizeTier::VeryLarge.glow(5.0),
            0.5,
        );
        star.color = StarColor::Tint { hue: 10 };
        star
    }

    #[test]
    fn test_attributes_mirror_star() {
        let attrs = RenderAttributes::from(&star());
        assert_eq!(attrs.id, StarId(3));
        assert_eq!(attrs.left_percent, 12.5);
        assert_eq!(attrs.top_percent, -3.0);
        assert_eq!(attrs.glow_blur_px, 20.0);
        assert_eq!(attrs.glow_alpha, 0.9);
        assert_eq!(attrs.background, "hsl(10, 100%, 90%)");
    }

    #[test]
    fn test_box_shadow_and_style() {
        let attrs = RenderAttributes::from_star(&star());
        assert_eq!(attrs.box_shadow(), "0 0 20px rgba(255, 255, 255, 0.9)");
        let style = attrs.inline_style();
        assert!(style.contains("left: 12.5%"));
        assert!(style.contains("top: -3%"));
        assert!(style.contains("width: 5px; height: 5px"));
        assert!(style.contains("opacity: 0.5"));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let json = serde_json::to_string(&RenderAttributes::snapshot(&[star()])).unwrap();
        assert!(json.contains("\"left_percent\":12.5"));
        assert!(json.contains("\"background\":\"hsl(10, 100%, 90%)\""));
    }
}
