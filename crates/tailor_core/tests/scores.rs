use tailor_core::{display_metric_score, display_overall_score, ScoreBand};

#[test]
fn overall_score_is_clamped() {
    for (raw, shown) in [(-20, 0), (0, 0), (47, 47), (100, 100), (250, 100)] {
        assert_eq!(display_overall_score(raw), shown, "raw {raw}");
    }
}

#[test]
fn metric_scores_above_ten_are_percentages() {
    assert_eq!(display_metric_score(7.0), 7.0);
    assert_eq!(display_metric_score(10.0), 10.0);
    assert_eq!(display_metric_score(85.0), 8.5);
    assert_eq!(display_metric_score(100.0), 10.0);
}

#[test]
fn metric_scores_always_land_in_range() {
    for raw in [-3.0, 0.0, 4.5, 10.5, 150.0, 1_000.0, f64::NAN, f64::INFINITY] {
        let shown = display_metric_score(raw);
        assert!((0.0..=10.0).contains(&shown), "raw {raw} shown {shown}");
    }
}

#[test]
fn headline_depends_on_mode() {
    let band = ScoreBand::for_score(display_overall_score(85));
    assert_eq!(band.headline(true), "Strong resume! Professional and impactful.");
    assert_eq!(
        band.headline(false),
        "Excellent match! Your resume is well-optimized."
    );
}
