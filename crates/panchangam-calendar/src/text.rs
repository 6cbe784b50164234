//! Text blocks for the solar date, the lunar attributes and the chart.

use panchangam_types::{PanchangError, Script, SolarCalendarDate};

use crate::chart::ChartPositions;
use crate::lunar::{LunarDay, LunarSnapshot};

/// `"<kali year> <month> <day:02>"`.
pub fn solar_date_text(date: &SolarCalendarDate, script: Script) -> String {
    date.format(script)
}

fn until(script: Script, hhmm: &str) -> String {
    match script {
        Script::English => format!("(until {})", hhmm),
        Script::Malayalam => format!("({} വരെ)", hhmm),
    }
}

/// Weekday, then tithi and nakshatra with their display end times.
pub fn lunar_day_text(day: &LunarDay, script: Script, offset_minutes: i32) -> Result<String, PanchangError> {
    let tithi_end = day.tithi_end_display(offset_minutes)?.format("%H:%M").to_string();
    let nakshatra_end = day.nakshatra_end_display(offset_minutes)?.format("%H:%M").to_string();
    Ok(format!(
        "{}\n{} {}\n{} {}",
        day.weekday.name(script),
        day.tithi.value.name(script),
        until(script, &tithi_end),
        day.nakshatra.value.name(script),
        until(script, &nakshatra_end),
    ))
}

/// Weekday, tithi and nakshatra at an instant; no end times.
pub fn lunar_snapshot_text(snapshot: &LunarSnapshot, script: Script) -> String {
    format!(
        "{}\n{}\n{}",
        snapshot.weekday.name(script),
        snapshot.tithi.name(script),
        snapshot.nakshatra.name(script),
    )
}

/// One line per chart point: name, sign and degrees inside the sign.
pub fn chart_text(chart: &ChartPositions, script: Script) -> String {
    chart
        .positions
        .iter()
        .map(|p| format!("{}\t{}\t{:05.2}°", p.graha.name(script), p.sign().name(script), p.degree_in_sign()))
        .collect::<Vec<_>>()
        .join("\n")
}
