/// Overall score as displayed: clamped to `0..=100`.
pub fn display_overall_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Quality sub-score as displayed on a 0-10 scale.
///
/// The oracle is asked for 0-10 but sometimes answers on a 0-100 scale;
/// anything above 10 is treated as a percentage and divided by 10.
pub fn display_metric_score(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let scaled = if raw > 10.0 { raw / 10.0 } else { raw };
    scaled.clamp(0.0, 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Weak,
        }
    }

    /// Short tag shown beside the score.
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "STRONG",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Weak => "WEAK",
        }
    }

    pub fn headline(self, general: bool) -> &'static str {
        match (self, general) {
            (ScoreBand::Strong, true) => "Strong resume! Professional and impactful.",
            (ScoreBand::Strong, false) => "Excellent match! Your resume is well-optimized.",
            (ScoreBand::Fair, true) => "Solid foundation, but has room for improvement.",
            (ScoreBand::Fair, false) => "Good foundation, but needs specific tailoring.",
            (ScoreBand::Weak, true) => "Needs significant work to stand out.",
            (ScoreBand::Weak, false) => "Low match. Significant tailoring required.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_split_at_sixty_and_eighty() {
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Weak);
    }
}
