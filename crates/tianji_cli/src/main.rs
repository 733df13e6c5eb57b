use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tianji_bazi::{BirthInput, RawBirth, four_pillars, resolve};
use tianji_rs::{
    BaziRequest, CalendarKind, Engine, EngineConfig, EvaluationProfile, Facing, Gender,
    HeadingMeasurement, Period, XuankongRequest,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tianji", about = "BaZi and Xuankong flying-star charts", version)]
struct Cli {
    /// TOML configuration file ([cache], [bazi], [xuankong])
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct BirthArgs {
    /// Birth date YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Birth time HH:MM[:SS]
    #[arg(long)]
    time: String,
    /// IANA timezone or fixed offset (+08:00)
    #[arg(long, default_value = "Asia/Shanghai")]
    tz: String,
    /// Longitude in degrees east
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Latitude in degrees north
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// male | female
    #[arg(long)]
    gender: Gender,
    /// solar | lunar
    #[arg(long, default_value = "solar")]
    calendar: CalendarKind,
    /// Lunar date falls in the leap month
    #[arg(long)]
    leap_month: bool,
}

impl BirthArgs {
    fn request(&self) -> BaziRequest {
        BaziRequest {
            birth_date: self.date.clone(),
            birth_time: self.time.clone(),
            timezone: self.tz.clone(),
            longitude: self.lon,
            latitude: self.lat,
            gender: self.gender,
            calendar: self.calendar,
            leap_month: self.leap_month,
            config: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Full BaZi report
    Bazi {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Four pillars only
    Pillars {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Xuankong flying-star report
    Xuankong {
        /// Completion date YYYY-MM-DD
        #[arg(long)]
        build_date: String,
        /// True-north facing in degrees
        #[arg(long, conflicts_with = "magnetic", required_unless_present = "magnetic")]
        facing: Option<f64>,
        /// Magnetic compass facing in degrees
        #[arg(long)]
        magnetic: Option<f64>,
        /// Magnetic declination, east positive
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        declination: f64,
        /// Compass reading quality in [0, 1]
        #[arg(long, default_value = "1")]
        quality: f64,
        /// Substitute 替星 on combined facings
        #[arg(long)]
        replace_combined: bool,
        /// Re-fly 伏吟 layers with 替星
        #[arg(long)]
        replace_fuyin: bool,
        /// Re-fly both layers when the facing palace pairs to 10
        #[arg(long)]
        replace_he_shi: bool,
        /// Use the conservative evaluation profile
        #[arg(long)]
        conservative: bool,
    },
    /// Period (运) governing a year
    Period {
        /// Calendar year
        #[arg(allow_hyphen_values = true)]
        year: i32,
    },
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "tianji_rs=debug,tianji_bazi=debug,tianji_xuankong=debug,info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<&PathBuf>) -> EngineConfig {
    match path {
        Some(p) => EngineConfig::from_file(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    }
}

fn load_engine(config: EngineConfig) -> Engine {
    Engine::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

#[derive(Serialize)]
struct PeriodOutput {
    year: i32,
    period: u8,
    name: &'static str,
    start_year: i32,
    end_year: i32,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = load_config(cli.config.as_ref());
    tracing::debug!(path = ?cli.config, cache = config.cache.enabled, "configuration loaded");

    match cli.command {
        Commands::Bazi { birth } => {
            let engine = load_engine(config);
            let report = engine.bazi(&birth.request()).unwrap_or_else(|e| fail(e));
            print_json(&*report);
        }

        Commands::Pillars { birth } => {
            let input = BirthInput::parse(&RawBirth {
                date: &birth.date,
                time: &birth.time,
                timezone: &birth.tz,
                longitude: birth.lon,
                latitude: birth.lat,
                gender: birth.gender,
                calendar: birth.calendar,
                leap_month: birth.leap_month,
            })
            .unwrap_or_else(|e| fail(e));
            let resolved = resolve(&input, &config.bazi).unwrap_or_else(|e| fail(e));
            let pillars = four_pillars(&resolved, &config.bazi).unwrap_or_else(|e| fail(e));
            print_json(&pillars);
        }

        Commands::Xuankong {
            build_date,
            facing,
            magnetic,
            declination,
            quality,
            replace_combined,
            replace_fuyin,
            replace_he_shi,
            conservative,
        } => {
            let mut xk = config.xuankong.clone();
            xk.replace_on_combined_direction |= replace_combined;
            xk.replace_on_fuyin |= replace_fuyin;
            xk.replace_on_facing_he_shi |= replace_he_shi;
            if conservative {
                xk.profile = EvaluationProfile::Conservative;
            }
            let facing = match (facing, magnetic) {
                (Some(d), _) => Facing::Degrees(d),
                (None, Some(m)) => Facing::Heading(HeadingMeasurement {
                    facing_degrees: m,
                    declination_degrees: declination,
                    quality,
                }),
                (None, None) => fail("one of --facing or --magnetic is required"),
            };
            let engine = load_engine(config);
            let report = engine
                .xuankong(&XuankongRequest {
                    build_date,
                    facing,
                    config: Some(xk),
                })
                .unwrap_or_else(|e| fail(e));
            print_json(&*report);
        }

        Commands::Period { year } => {
            let period = Period::for_year(year);
            let (start_year, end_year) = Period::year_range(year);
            print_json(&PeriodOutput {
                year,
                period: period.number(),
                name: period.name(),
                start_year,
                end_year,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bazi_arguments() {
        let cli = Cli::try_parse_from([
            "tianji", "bazi", "--date", "1990-05-15", "--time", "14:30", "--lon", "121.47",
            "--lat", "31.23", "--gender", "male",
        ])
        .unwrap();
        match cli.command {
            Commands::Bazi { birth } => {
                assert_eq!(birth.gender, Gender::Male);
                assert_eq!(birth.calendar, CalendarKind::Solar);
                assert_eq!(birth.tz, "Asia/Shanghai");
            }
            _ => panic!("expected bazi"),
        }
    }

    #[test]
    fn negative_longitude_is_accepted() {
        let cli = Cli::try_parse_from([
            "tianji", "pillars", "--date", "1990-05-15", "--time", "08:00", "--tz",
            "America/New_York", "--lon", "-74.0", "--lat", "40.7", "--gender", "female",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Pillars { .. }));
    }

    #[test]
    fn xuankong_requires_a_facing() {
        assert!(Cli::try_parse_from(["tianji", "xuankong", "--build-date", "2010-01-01"]).is_err());
        assert!(
            Cli::try_parse_from([
                "tianji", "xuankong", "--build-date", "2010-01-01", "--facing", "180",
                "--magnetic", "176",
            ])
            .is_err()
        );
    }

    #[test]
    fn replacement_flags_parse() {
        let cli = Cli::try_parse_from([
            "tianji", "xuankong", "--build-date", "2010-01-01", "--facing", "225",
            "--replace-he-shi",
        ])
        .unwrap();
        match cli.command {
            Commands::Xuankong {
                replace_he_shi,
                replace_fuyin,
                ..
            } => {
                assert!(replace_he_shi);
                assert!(!replace_fuyin);
            }
            _ => panic!("expected xuankong"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tianji", "period", "2024", "-v", "--config", "t.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("t.toml")));
    }
}
