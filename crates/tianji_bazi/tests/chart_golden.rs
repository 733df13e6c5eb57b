//! End-to-end chart checks against hand-verified pillars.

use tianji_bazi::{
    BaziConfig, BirthInput, CalendarKind, DayBoundary, Gender, LuckAnchor, LuckDirection,
    RawBirth, UncertaintyLevel, WeightingPolicy, YearBoundary, ZiHourPolicy, compute_chart,
};

fn input(date: &str, time: &str, gender: Gender) -> BirthInput {
    BirthInput::parse(&RawBirth {
        date,
        time,
        timezone: "Asia/Shanghai",
        longitude: 116.4,
        latitude: 39.9,
        gender,
        calendar: CalendarKind::Solar,
        leap_month: false,
    })
    .unwrap()
}

fn civil_config() -> BaziConfig {
    BaziConfig {
        use_true_solar_time: false,
        ..BaziConfig::default()
    }
}

#[test]
fn reference_chart_1990() {
    let chart = compute_chart(&input("1990-05-15", "14:30", Gender::Male), &civil_config()).unwrap();
    assert_eq!(chart.pillars.summary(), "庚午 辛巳 庚辰 癸未");
    assert_eq!(chart.solar_term, "立夏");
    assert_eq!(chart.day_boundary, "无");
    assert_eq!(chart.pillars.day.nayin.name, "白蜡金");
    assert!(!chart.markers.true_solar_time_used);
}

#[test]
fn pillar_parity_holds() {
    let chart = compute_chart(&input("1985-11-03", "06:10", Gender::Female), &BaziConfig::default()).unwrap();
    for (_, p) in chart.pillars.iter() {
        assert_eq!(p.stem.index() % 2, p.branch.index() % 2, "{}", p.name);
    }
}

#[test]
fn zi_hour_policies() {
    let roll = compute_chart(&input("1990-05-15", "23:30", Gender::Male), &civil_config()).unwrap();
    assert_eq!(roll.pillars.day.name, "辛巳");
    assert_eq!(roll.pillars.hour.name, "戊子");
    assert_eq!(roll.pillars.day_boundary, DayBoundary::RolledOver);
    assert!(roll.markers.is_day_boundary);

    let cfg = BaziConfig {
        zi_hour: ZiHourPolicy::SplitLateZi,
        ..civil_config()
    };
    let split = compute_chart(&input("1990-05-15", "23:30", Gender::Male), &cfg).unwrap();
    assert_eq!(split.pillars.day.name, "庚辰");
    assert_eq!(split.pillars.hour.name, "戊子");
    assert_eq!(split.pillars.day_boundary, DayBoundary::LateZiSplit);
}

#[test]
fn early_zi_hour_keeps_the_date() {
    let chart = compute_chart(&input("1990-05-16", "00:30", Gender::Male), &civil_config()).unwrap();
    assert_eq!(chart.pillars.day.name, "辛巳");
    assert_eq!(chart.pillars.hour.name, "戊子");
    assert!(!chart.markers.is_day_boundary);
}

#[test]
fn year_boundary_between_lichun_and_new_year() {
    // 2024-02-05: after 立春 (Feb 4), before Chinese New Year (Feb 10).
    let b = input("2024-02-05", "12:00", Gender::Male);
    let lny = compute_chart(&b, &civil_config()).unwrap();
    assert_eq!(lny.pillars.year.name, "癸卯");
    assert_eq!(lny.pillars.month.name, "丙寅");

    let cfg = BaziConfig {
        year_boundary: YearBoundary::LiChun,
        ..civil_config()
    };
    let lichun = compute_chart(&b, &cfg).unwrap();
    assert_eq!(lichun.pillars.year.name, "甲辰");
    assert_eq!(lichun.pillars.month.name, "丙寅");
}

#[test]
fn month_changes_at_jie_not_calendar_month() {
    // 2024-03-04 is still 寅 month (惊蛰 falls on 03-05).
    let chart = compute_chart(&input("2024-03-04", "12:00", Gender::Male), &civil_config()).unwrap();
    assert_eq!(chart.pillars.month.name, "丙寅");
    let chart = compute_chart(&input("2024-03-06", "12:00", Gender::Male), &civil_config()).unwrap();
    assert_eq!(chart.pillars.month.name, "丁卯");
}

#[test]
fn luck_pillars_are_contiguous_and_ordered() {
    let chart = compute_chart(&input("1990-05-15", "14:30", Gender::Male), &civil_config()).unwrap();
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Forward);
    assert_eq!(luck.pillars.len(), 8);
    // Forward from 庚午.
    assert_eq!(luck.pillars[0].pillar.name, "辛未");
    for pair in luck.pillars.windows(2) {
        assert_eq!(pair[1].start_age, pair[0].end_age + 1);
        assert_eq!(pair[1].start_year, pair[0].end_year + 1);
        assert!(pair[0].start_age < pair[1].start_age);
    }
    let first = &luck.pillars[0];
    assert_eq!(first.start_year, 1990 + first.start_age as i32);
    assert_eq!(luck.at_age(first.start_age + 10).unwrap().index, 2);
}

#[test]
fn female_yang_year_runs_reverse_from_month_anchor() {
    let cfg = BaziConfig {
        luck_anchor: LuckAnchor::Month,
        luck_pillar_count: 10,
        ..civil_config()
    };
    let chart = compute_chart(&input("1990-05-15", "14:30", Gender::Female), &cfg).unwrap();
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Reverse);
    assert_eq!(luck.pillars.len(), 10);
    // Reverse from 辛巳.
    assert_eq!(luck.pillars[0].pillar.name, "庚辰");
}

#[test]
fn identical_input_is_byte_identical() {
    let b = input("1978-08-08", "08:08", Gender::Female);
    let a = serde_json::to_string(&compute_chart(&b, &BaziConfig::default()).unwrap()).unwrap();
    let c = serde_json::to_string(&compute_chart(&b, &BaziConfig::default()).unwrap()).unwrap();
    assert_eq!(a, c);
}

#[test]
fn ten_gods_sum_under_every_policy() {
    for weighting in [WeightingPolicy::Standard, WeightingPolicy::Surface, WeightingPolicy::QiGraded] {
        let cfg = BaziConfig {
            weighting,
            ..BaziConfig::default()
        };
        let chart = compute_chart(&input("2001-09-11", "09:00", Gender::Male), &cfg).unwrap();
        let sum: u32 = chart.ten_gods.counts.values().sum();
        assert_eq!(sum, chart.ten_gods.stems_analyzed);
        assert_eq!(chart.elements.counts.values().sum::<u32>(), chart.elements.total);
    }
}

#[test]
fn lunar_input_matches_solar_input() {
    let lunar = BirthInput::parse(&RawBirth {
        date: "2024-01-01",
        time: "10:00",
        timezone: "Asia/Shanghai",
        longitude: 116.4,
        latitude: 39.9,
        gender: Gender::Male,
        calendar: CalendarKind::Lunar,
        leap_month: false,
    })
    .unwrap();
    let solar = input("2024-02-10", "10:00", Gender::Male);
    let a = compute_chart(&lunar, &civil_config()).unwrap();
    let b = compute_chart(&solar, &civil_config()).unwrap();
    assert_eq!(a.pillars, b.pillars);
    assert_eq!(a.pillars.year.name, "甲辰");
    assert_eq!(a.lunar_date.as_deref(), Some("2024年正月初一"));
}

#[test]
fn out_of_table_date_needs_lichun_boundary() {
    let b = input("1850-06-01", "12:00", Gender::Male);
    let err = compute_chart(&b, &civil_config()).unwrap_err();
    assert_eq!(err.code(), "E_LUNAR_RANGE");
    assert!(!err.is_validation());

    let cfg = BaziConfig {
        year_boundary: YearBoundary::LiChun,
        ..civil_config()
    };
    let chart = compute_chart(&b, &cfg).unwrap();
    assert_eq!(chart.pillars.year.name, "庚戌");
    assert!(chart.lunar_date.is_none());
}

#[test]
fn arctic_birth_degrades_instead_of_failing() {
    let b = BirthInput::parse(&RawBirth {
        date: "1990-05-15",
        time: "14:30",
        timezone: "Europe/Oslo",
        longitude: 15.6,
        latitude: 78.2,
        gender: Gender::Male,
        calendar: CalendarKind::Solar,
        leap_month: false,
    })
    .unwrap();
    let chart = compute_chart(&b, &BaziConfig::default()).unwrap();
    assert_eq!(chart.markers.uncertainty_level, UncertaintyLevel::High);
}
