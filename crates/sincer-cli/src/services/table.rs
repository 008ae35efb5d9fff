// crates/sincer-cli/src/services/table.rs - Rendering manager outcomes for the terminal
//
// TABLE LAYOUT:
// ```
//    #  Name    Since       Date
// ■  1  coffee  2h 5m 12s   2024-04-13 10:30:00
// ■  x  walk    1d 3h       2024-04-12 09:00:00   <- removed row (red)
// ■  2  run     4m 2s       2024-04-13 12:31:10   <- added row (green)
// ```
//
// The swatch takes the record's hex colour. Removed rows show `x` instead of
// a position and do not use up a number, so the numbers always match the
// list as it is after the operation.

use chrono::{DateTime, Duration, Local, Utc};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

use sincer_core::{ListingRow, Outcome, RowAction};

const SWATCH: &str = "■";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns outcomes into printable text
pub struct TableService {
    color: bool,
}

impl TableService {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Message(message) => message.clone(),
            Outcome::Listing(rows) => self.render_rows(rows, Utc::now()),
        }
    }

    /// Render rows with elapsed times measured against `now`
    pub fn render_rows(&self, rows: &[ListingRow], now: DateTime<Utc>) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled);
        if self.color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        table.set_header(
            ["", "#", "Name", "Since", "Date"]
                .into_iter()
                .map(|title| Cell::new(title).add_attribute(Attribute::Underlined)),
        );

        let mut position = 0;
        for row in rows {
            let number = if row.is_removed() {
                "x".to_string()
            } else {
                position += 1;
                position.to_string()
            };

            let mut swatch = Cell::new(SWATCH);
            if let Some((r, g, b)) = parse_hex_color(&row.record.color) {
                swatch = swatch.fg(Color::Rgb { r, g, b });
            }

            let since = row.record.since.with_timezone(&Local);
            let texts = [
                number,
                row.record.name.clone(),
                format_elapsed(row.record.elapsed(now)),
                since.format(DATE_FORMAT).to_string(),
            ];

            let mut cells = vec![swatch];
            cells.extend(texts.into_iter().map(|text| style_cell(Cell::new(text), row.action)));
            table.add_row(cells);
        }

        table.to_string()
    }
}

fn style_cell(cell: Cell, action: RowAction) -> Cell {
    match action {
        RowAction::Normal => cell,
        RowAction::Added => cell.fg(Color::Green),
        RowAction::Removed => cell.fg(Color::Red),
    }
}

/// Format a duration the way pretty-ms does: `1y 3d 2h 5m 12s`, `850ms`
///
/// Zero units are skipped; a negative duration (a date in the future) gets a
/// leading `-`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let sign = if elapsed < Duration::zero() { "-" } else { "" };
    let millis = elapsed.num_milliseconds().unsigned_abs();
    if millis < 1000 {
        return format!("{}{}ms", sign, millis);
    }

    let secs = millis / 1000;
    let units = [
        (secs / 31_536_000, "y"),
        (secs % 31_536_000 / 86_400, "d"),
        (secs % 86_400 / 3_600, "h"),
        (secs % 3_600 / 60, "m"),
        (secs % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();
    format!("{}{}", sign, parts.join(" "))
}

/// Parse `#rrggbb` or `#rgb`
fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sincer_core::Record;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::milliseconds(0)), "0ms");
        assert_eq!(format_elapsed(Duration::milliseconds(850)), "850ms");
        assert_eq!(format_elapsed(Duration::seconds(61)), "1m 1s");
        assert_eq!(format_elapsed(Duration::seconds(3_600)), "1h");
        assert_eq!(
            format_elapsed(Duration::days(1) + Duration::hours(2) + Duration::seconds(5)),
            "1d 2h 5s"
        );
        assert_eq!(format_elapsed(Duration::days(400)), "1y 35d");
        assert_eq!(format_elapsed(Duration::seconds(-90)), "-1m 30s");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#ff8800"), Some((255, 136, 0)));
        assert_eq!(parse_hex_color("#f80"), Some((255, 136, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some((0, 255, 0)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ffé"), None);
    }

    #[test]
    fn test_removed_rows_do_not_take_a_number() {
        let now = Utc::now();
        let rows = vec![
            ListingRow::normal(Record::new("first", now, None)),
            ListingRow::removed(Record::new("gone", now, None)),
            ListingRow::added(Record::new("second", now, None)),
        ];

        let text = TableService::new(false).render_rows(&rows, now);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Name"));
        assert!(lines[1].contains(" 1 ") && lines[1].contains("first"));
        assert!(lines[2].contains(" x ") && lines[2].contains("gone"));
        assert!(lines[3].contains(" 2 ") && lines[3].contains("second"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_messages_pass_through() {
        let service = TableService::new(true);
        assert_eq!(service.render(&Outcome::message("no records")), "no records");
    }
}
