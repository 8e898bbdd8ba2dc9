use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShadowQuality {
    None,
    Low,
    #[default]
    Medium,
    High,
    SoftLow,
    SoftMedium,
    SoftHigh,
}

impl ShadowQuality {
    /// Next quality to try when this one is unsupported.
    #[must_use]
    pub const fn lower(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::SoftHigh => Self::SoftMedium,
            Self::SoftMedium => Self::SoftLow,
            Self::None | Self::Low | Self::SoftLow => Self::None,
        }
    }

    #[must_use]
    pub const fn is_soft(self) -> bool {
        matches!(self, Self::SoftLow | Self::SoftMedium | Self::SoftHigh)
    }

    /// 0 for no shadows, 1..=3 for low..high regardless of softness.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low | Self::SoftLow => 1,
            Self::Medium | Self::SoftMedium => 2,
            Self::High | Self::SoftHigh => 3,
        }
    }
}

/// What the rendering backend can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererCapabilities {
    /// Highest supported shadow level, see [`ShadowQuality::level`].
    pub max_shadow_level: u8,
    pub soft_shadows: bool,
}

impl Default for RendererCapabilities {
    fn default() -> Self {
        Self {
            max_shadow_level: 3,
            soft_shadows: true,
        }
    }
}

impl RendererCapabilities {
    /// Backend without shadow mapping, e.g. an embedded GL profile.
    #[must_use]
    pub const fn without_shadows() -> Self {
        Self {
            max_shadow_level: 0,
            soft_shadows: false,
        }
    }

    #[must_use]
    pub const fn supports(self, quality: ShadowQuality) -> bool {
        if quality.is_soft() && !self.soft_shadows {
            return false;
        }
        quality.level() <= self.max_shadow_level
    }
}

/// Steps `requested` down until `capabilities` support it.
#[must_use]
pub fn resolve_shadow_quality(
    requested: ShadowQuality,
    capabilities: RendererCapabilities,
) -> ShadowQuality {
    let mut quality = requested;
    while !capabilities.supports(quality) {
        let lower = quality.lower();
        warn!(
            unsupported = ?quality,
            fallback = ?lower,
            "shadow quality not supported, lowering"
        );
        quality = lower;
    }
    quality
}

#[cfg(test)]
mod tests {
    use super::{RendererCapabilities, ShadowQuality, resolve_shadow_quality};

    #[test]
    fn lowering_walks_hard_and_soft_chains_to_none() {
        assert_eq!(ShadowQuality::High.lower(), ShadowQuality::Medium);
        assert_eq!(ShadowQuality::Low.lower(), ShadowQuality::None);
        assert_eq!(ShadowQuality::SoftHigh.lower(), ShadowQuality::SoftMedium);
        assert_eq!(ShadowQuality::SoftLow.lower(), ShadowQuality::None);
        assert_eq!(ShadowQuality::None.lower(), ShadowQuality::None);
    }

    #[test]
    fn supported_quality_is_kept() {
        let quality = resolve_shadow_quality(ShadowQuality::SoftHigh, RendererCapabilities::default());
        assert_eq!(quality, ShadowQuality::SoftHigh);
    }

    #[test]
    fn soft_shadows_without_support_fall_to_none() {
        let caps = RendererCapabilities {
            max_shadow_level: 3,
            soft_shadows: false,
        };
        assert_eq!(
            resolve_shadow_quality(ShadowQuality::SoftMedium, caps),
            ShadowQuality::None
        );
    }

    #[test]
    fn hard_shadows_step_down_to_supported_level() {
        let caps = RendererCapabilities {
            max_shadow_level: 1,
            soft_shadows: false,
        };
        assert_eq!(
            resolve_shadow_quality(ShadowQuality::High, caps),
            ShadowQuality::Low
        );
        assert_eq!(
            resolve_shadow_quality(ShadowQuality::High, RendererCapabilities::without_shadows()),
            ShadowQuality::None
        );
    }
}
