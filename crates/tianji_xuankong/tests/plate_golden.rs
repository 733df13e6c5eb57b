//! Reference plates and pattern scenarios.

use chrono::NaiveDate;
use tianji_xuankong::{
    EvaluationProfile, GejuKind, XuankongConfig, compute_chart, resolve_facing,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn period_eight_south_facing_meets_at_facing() {
    let chart = compute_chart(date(2010, 3, 1), 180.0, &XuankongConfig::default()).unwrap();
    assert!(chart.geju.contains(GejuKind::ShuangXingHuiXiang));
    assert!(chart.geju.favorable);
}

#[test]
fn period_eight_east_facing_meets_at_sitting() {
    let chart = compute_chart(date(2010, 3, 1), 90.0, &XuankongConfig::default()).unwrap();
    assert!(chart.geju.contains(GejuKind::ShuangXingHuiZuo));
    assert!(!chart.geju.favorable);
}

#[test]
fn period_nine_west_facing_meets_at_sitting() {
    let chart = compute_chart(date(2030, 3, 1), 270.0, &XuankongConfig::default()).unwrap();
    assert_eq!(chart.period.number(), 9);
    assert!(chart.geju.contains(GejuKind::ShuangXingHuiZuo));
}

#[test]
fn period_nine_northwest_facing_is_he_shi() {
    let chart = compute_chart(date(2030, 3, 1), 315.0, &XuankongConfig::default()).unwrap();
    assert_eq!(chart.period.number(), 9);
    assert!(chart.geju.contains(GejuKind::QuanJuHeShi));
    assert!(chart.geju.types.contains(&"全局合十"));
    for p in &chart.plate.palaces {
        assert_eq!(p.facing + p.period, 10, "palace {}", p.palace);
    }
}

#[test]
fn period_eight_southwest_facing_is_fu_mu_san_ban() {
    let chart = compute_chart(date(2010, 3, 1), 225.0, &XuankongConfig::default()).unwrap();
    assert!(chart.geju.contains(GejuKind::FuMuSanBan));
    for p in &chart.plate.palaces {
        assert_eq!(p.mountain % 3, p.period % 3);
        assert_eq!(p.facing % 3, p.period % 3);
    }
}

#[test]
fn facing_he_shi_toggle_is_audited() {
    let config = XuankongConfig {
        replace_on_facing_he_shi: true,
        ..XuankongConfig::default()
    };
    let chart = compute_chart(date(2010, 3, 1), 225.0, &config).unwrap();
    assert!(chart.rules_applied.iter().any(|r| r == "合十替卦"));
    let plain = compute_chart(date(2010, 3, 1), 180.0, &config).unwrap();
    assert!(plain.rules_applied.iter().all(|r| r != "合十替卦"));
}

#[test]
fn boundary_facing_records_combined_direction() {
    let chart = compute_chart(date(2010, 3, 1), 187.5, &XuankongConfig::default()).unwrap();
    assert!(chart.rules_applied.iter().any(|r| r == "兼向"));
    assert_eq!(chart.facing_label, "癸山丁向兼午");
}

#[test]
fn centre_of_sector_is_not_combined() {
    let facing = resolve_facing(195.0, 3.0).unwrap();
    assert!(!facing.is_combined());
    let chart = compute_chart(date(2010, 3, 1), 195.0, &XuankongConfig::default()).unwrap();
    assert!(chart.rules_applied.iter().all(|r| r != "兼向"));
}

#[test]
fn replacement_toggle_changes_layers() {
    let plain = compute_chart(date(2010, 3, 1), 187.5, &XuankongConfig::default()).unwrap();
    let replaced = compute_chart(
        date(2010, 3, 1),
        187.5,
        &XuankongConfig {
            replace_on_combined_direction: true,
            ..XuankongConfig::default()
        },
    )
    .unwrap();
    assert!(replaced.rules_applied.iter().any(|r| r == "替卦"));
    assert!(plain.rules_applied.iter().all(|r| r != "替卦"));
    assert_eq!(plain.plate.period_stars(), replaced.plate.period_stars());
}

#[test]
fn every_evaluation_has_nine_palaces() {
    for degree in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
        for profile in [EvaluationProfile::Classic, EvaluationProfile::Conservative] {
            let config = XuankongConfig {
                profile,
                ..XuankongConfig::default()
            };
            let chart = compute_chart(date(2024, 3, 1), degree, &config).unwrap();
            let keys: Vec<u8> = chart.evaluations.keys().copied().collect();
            assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
            for e in chart.evaluations.values() {
                assert!(!e.reasons.is_empty());
                assert!(e.score.is_finite());
            }
        }
    }
}

#[test]
fn chart_serializes_deterministically() {
    let a = compute_chart(date(2010, 3, 1), 180.0, &XuankongConfig::default()).unwrap();
    let b = compute_chart(date(2010, 3, 1), 180.0, &XuankongConfig::default()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
