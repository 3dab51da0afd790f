use crate::{
    config::{ANALYSIS, DF, fibonacci},
    domain::Direction,
    models::{ProjectionContext, ProjectionKind, ProjectionLevel, ProjectionVariant, WaveRole},
    utils::floor_price,
};

/// Inputs for one projection. The launch price defaults to the anchor end.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub role: WaveRole,
    pub anchor_start: f64,
    pub anchor_end: f64,
    /// Used by extensions. Retracements always move against the anchor.
    pub direction: Direction,
    pub launch: Option<f64>,
    pub source: String,
    pub variant: ProjectionVariant,
}

impl ProjectionRequest {
    pub fn new(role: WaveRole, anchor_start: f64, anchor_end: f64, direction: Direction) -> Self {
        Self {
            role,
            anchor_start,
            anchor_end,
            direction,
            launch: None,
            source: String::new(),
            variant: ProjectionVariant::Standard,
        }
    }

    pub fn launched_from(mut self, price: f64) -> Self {
        self.launch = Some(price);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_variant(mut self, variant: ProjectionVariant) -> Self {
        self.variant = variant;
        self
    }

    #[inline]
    pub fn launch_price(&self) -> f64 {
        self.launch.unwrap_or(self.anchor_end)
    }
}

pub struct FibCalculator;

impl FibCalculator {
    /// Ratio table for a role, switched by an externally resolved variant where one applies.
    pub fn ratios_for(role: WaveRole, variant: ProjectionVariant) -> &'static [f64] {
        use ProjectionVariant as V;
        match (role, variant) {
            (WaveRole::B, V::FlatCorrection) => fibonacci::variant::FLAT_B,
            (WaveRole::C, V::FlatCorrection) => fibonacci::variant::FLAT_C,
            (WaveRole::C, V::ZigzagCorrection) => fibonacci::variant::ZIGZAG_C,
            (WaveRole::W5, V::ContractingDiagonal) => fibonacci::variant::CONTRACTING_W5,
            (WaveRole::W5, V::ExpandingDiagonal) => fibonacci::variant::EXPANDING_W5,

            (WaveRole::W2, _) => fibonacci::retracement::W2,
            (WaveRole::W4, _) => fibonacci::retracement::W4,
            (WaveRole::A, _) => fibonacci::retracement::A,
            (WaveRole::B, _) => fibonacci::retracement::B,
            (WaveRole::Precursor, _) => fibonacci::retracement::PRECURSOR,
            (WaveRole::W3, _) => fibonacci::extension::W3,
            (WaveRole::W5, _) => fibonacci::extension::W5,
            (WaveRole::C, _) => fibonacci::extension::C,
            (WaveRole::Y, _) => fibonacci::extension::Y,
        }
    }

    /// Projection using the role's own table and kind.
    pub fn project(req: &ProjectionRequest) -> Option<ProjectionContext> {
        Self::project_with_ratios(
            req,
            Self::ratios_for(req.role, req.variant),
            req.role.default_kind(),
        )
    }

    /// Projection with caller supplied ratios and kind.
    /// None when the anchors are not finite or span a zero-length range.
    pub fn project_with_ratios(
        req: &ProjectionRequest,
        ratios: &[f64],
        kind: ProjectionKind,
    ) -> Option<ProjectionContext> {
        let launch = req.launch_price();
        if !req.anchor_start.is_finite() || !req.anchor_end.is_finite() || !launch.is_finite() {
            log::warn!("FibCalculator: non-finite input for {} ({}). Skipped.", req.role, req.source);
            return None;
        }

        let range = (req.anchor_end - req.anchor_start).abs();
        if range <= ANALYSIS.min_range {
            if DF.log_projections {
                log::debug!("FibCalculator: zero-length range for {} ({}). Skipped.", req.role, req.source);
            }
            return None;
        }

        let direction = match kind {
            ProjectionKind::Retracement => {
                Direction::from_prices(req.anchor_start, req.anchor_end).opposite()
            }
            ProjectionKind::Extension => req.direction,
        };

        let levels = ratios
            .iter()
            .map(|&ratio| ProjectionLevel {
                ratio,
                price: Self::level_price(launch, range, ratio, direction),
                label: format!("{:.1}%", ratio * 100.0),
            })
            .collect();

        let ctx = ProjectionContext {
            role: req.role,
            kind,
            anchor_start: req.anchor_start,
            anchor_end: req.anchor_end,
            launch_price: launch,
            direction,
            levels,
            source: req.source.clone(),
        };

        if DF.log_projections {
            log::debug!(
                "FibCalculator: {} {} {} from {:.4}: {:?}",
                ctx.role,
                ctx.kind,
                ctx.direction,
                ctx.launch_price,
                ctx.levels.iter().map(|l| l.price).collect::<Vec<_>>()
            );
        }

        Some(ctx)
    }

    /// launch +/- range * ratio, floored at the minimum positive price.
    #[inline]
    pub fn level_price(launch: f64, range: f64, ratio: f64, direction: Direction) -> f64 {
        floor_price(launch + direction.sign() * range * ratio)
    }
}
