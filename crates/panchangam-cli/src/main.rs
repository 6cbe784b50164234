use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use panchangam_core::astronomy::julian::jd_to_civil;
use panchangam_core::calendar::{chart_text, lunar_snapshot_text, shadow_rows};
use panchangam_core::{
    Ephemeris, GeoPosition, MeeusEphemeris, MoonPhase, Panchang, PanchangConfig, Script, SignSource, lookup_place,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "panchangam", about = "Malayalam calendar and panchangam")]
struct Cli {
    /// Registered place name (Palakkad, Ujjain, Varanasi)
    #[arg(long, global = true, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,
    /// Observer latitude in degrees
    #[arg(long, global = true, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Observer longitude in degrees, east positive
    #[arg(long, global = true, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
    /// JSON configuration file; missing fields take defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output script: english or malayalam
    #[arg(long, global = true)]
    script: Option<Script>,
    /// Name the month from the Sun's sign at sunrise
    #[arg(long, global = true)]
    sunrise_sign: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solar date and sunrise panchangam for today
    Today,
    /// Solar date for a civil date
    Date {
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Weekday, tithi and nakshatra
    Lunar {
        /// Civil date; attributes at sunrise with end times
        #[arg(long, conflicts_with = "at")]
        date: Option<NaiveDate>,
        /// Civil date-time (YYYY-MM-DDThh:mm); attributes at that instant
        #[arg(long)]
        at: Option<String>,
    },
    /// Moon phase at sunrise
    Moon {
        /// Civil date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Draw the disc with this radius in characters
        #[arg(long)]
        draw: Option<i64>,
    },
    /// Sankranti that opened the current solar month
    Sankranti {
        /// Civil date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sidereal graha and lagna positions at an instant
    Chart {
        /// Civil date-time (YYYY-MM-DDThh:mm); now when omitted
        #[arg(long)]
        at: Option<String>,
        /// Registered place the chart is observed from
        #[arg(long, default_value = "Ujjain")]
        observer: String,
    },
    /// Export solar dates as JSON
    Export {
        /// First civil date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last civil date, inclusive
        #[arg(long)]
        to: NaiveDate,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_subscriber() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn load_config(cli: &Cli) -> Result<PanchangConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PanchangConfig::default(),
    };

    if let Some(name) = &cli.place {
        config = config.location(lookup_place(name)?.position);
    }
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        config = config.location(GeoPosition::new(lat, lon));
    }
    if let Some(script) = cli.script {
        config = config.script(script);
    }
    if cli.sunrise_sign {
        config = config.sign_source(SignSource::SunriseSign);
    }
    config.validate()?;
    debug!(?config, "configuration");
    Ok(config)
}

fn now(config: &PanchangConfig) -> NaiveDateTime {
    Utc::now().naive_utc() + TimeDelta::minutes(config.civil_offset_minutes.into())
}

fn today(config: &PanchangConfig) -> NaiveDate {
    now(config).date()
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    bail!("expected YYYY-MM-DDThh:mm, got '{}'", raw)
}

fn lunar_instant_text<E: Ephemeris>(engine: &Panchang<E>, raw: &str) -> Result<String> {
    let snapshot = engine.lunar_at(parse_instant(raw)?)?;
    Ok(lunar_snapshot_text(&snapshot, engine.config().script))
}

fn chart_report<E: Ephemeris>(engine: &Panchang<E>, at: Option<&str>, observer: &str) -> Result<String> {
    let place = lookup_place(observer)?;
    let instant = match at {
        Some(raw) => parse_instant(raw)?,
        None => now(engine.config()),
    };
    let chart = engine.chart_at(instant, place)?;
    debug!(observer = place.name_en, %instant, "chart");
    let script = engine.config().script;
    Ok(format!("{} {}\n{}", place.name(script), instant.format("%Y-%m-%d %H:%M"), chart_text(&chart, script)))
}

/// Text rendering of the disc: `o` lit, `.` shadow.
fn draw_disc(phase: &MoonPhase, radius: i64) -> Result<String> {
    if !(2..=80).contains(&radius) {
        bail!("radius must be between 2 and 80");
    }
    let rows = shadow_rows(phase, radius);
    let mut out = String::new();
    for row in 1 - radius..radius {
        let half = (((radius * radius - row * row) as f64).sqrt()).round_ties_even() as i64;
        let shadow = rows.iter().find(|(r, _)| *r == row).map(|(_, span)| *span);
        for x in -radius..radius {
            let ch = if x < -half || x >= half {
                ' '
            } else if shadow.is_some_and(|s| x >= s.x_left && x < s.x_right) {
                '.'
            } else {
                'o'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    Ok(out)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let script = config.script;
    let offset = config.civil_offset_minutes;
    let engine = Panchang::try_new(MeeusEphemeris::new(), config)?;

    match cli.command {
        Commands::Today => {
            let date = today(engine.config());
            println!("{}", engine.solar_text(date)?);
            println!("{}", engine.lunar_text(date)?);
        }

        Commands::Date { date } => {
            println!("{}", engine.solar_text(date)?);
        }

        Commands::Lunar { date, at } => match (date, at) {
            (_, Some(raw)) => {
                println!("{}", lunar_instant_text(&engine, &raw)?);
            }
            (date, None) => {
                let date = date.unwrap_or_else(|| today(engine.config()));
                println!("{}", engine.lunar_text(date)?);
            }
        },

        Commands::Moon { date, draw } => {
            let date = date.unwrap_or_else(|| today(engine.config()));
            let phase = engine.moon_phase(date)?;
            let trend = script.pick(if phase.waxing { ("waxing", "വളരുന്ന") } else { ("waning", "കുറയുന്ന") });
            println!("{:.0}% {}", phase.illumination * 100.0, trend);
            if let Some(radius) = draw {
                print!("{}", draw_disc(&phase, radius)?);
            }
        }

        Commands::Sankranti { date } => {
            let date = date.unwrap_or_else(|| today(engine.config()));
            let event = engine.previous_sankranti(date)?;
            let local = jd_to_civil(event.jd_ut, offset)?;
            let solar = engine.solar_date(date)?;
            println!(
                "{} {} -> {}",
                local.format("%Y-%m-%d %H:%M"),
                event.entered,
                solar.first_day.format("%Y-%m-%d"),
            );
        }

        Commands::Chart { at, observer } => {
            println!("{}", chart_report(&engine, at.as_deref(), &observer)?);
        }

        Commands::Export { from, to, out } => {
            let report = engine.export(from, to)?;
            for failure in &report.failures {
                eprintln!("{}: {}", failure.date, failure.error);
            }
            let json = report.records_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), records = report.records.len(), "export written");
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_subscriber();
    run(Cli::parse())
}
