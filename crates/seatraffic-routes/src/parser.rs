//! Route file parser.
//!
//! The file is UTF-8 text, optionally starting with a byte-order mark.
//! Records are separated by blank lines. The first line of a record is a
//! ship type token optionally followed by whitespace and a display name;
//! each following line is a `lat lon` pair. Lines starting with `#` are
//! comments wherever they appear.
//!
//! ```text
//! # comment
//! car	Dover - Calais
//! 51.1207 1.3386
//! 50.9692 1.8621
//!
//! foot
//! ...
//! ```

use seatraffic_core::enums::ShipKind;
use seatraffic_core::error::ParseError;
use seatraffic_core::route::Route;
use seatraffic_core::types::Location;

const BOM: char = '\u{feff}';

/// A record whose header has been read but which hasn't ended yet.
struct PendingRoute {
    ship_kind: ShipKind,
    name: Option<String>,
    path: Vec<Location>,
}

impl PendingRoute {
    fn start(header: &str, line: usize) -> Result<Self, ParseError> {
        let (token, name) = header
            .split_once(char::is_whitespace)
            .unwrap_or((header, ""));
        let ship_kind = ShipKind::from_token(token).ok_or_else(|| ParseError::UnknownShipKind {
            token: token.to_string(),
            line,
        })?;
        let name = name.trim();
        Ok(Self {
            ship_kind,
            name: (!name.is_empty()).then(|| name.to_string()),
            path: Vec::new(),
        })
    }

    /// `line` is where the record ended, for error reporting.
    fn finish(self, line: usize) -> Result<Route, ParseError> {
        match self.path.len() {
            0 => Err(ParseError::EmptyRoute { line }),
            1 => Err(ParseError::SingleWaypoint { line }),
            _ => Ok(Route::new(self.ship_kind, self.name, self.path)),
        }
    }
}

/// Parse the full text of a route file.
pub fn parse_routes(text: &str) -> Result<Vec<Route>, ParseError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut routes = Vec::new();
    let mut current: Option<PendingRoute> = None;
    let mut line = 0;

    for (index, raw) in text.lines().enumerate() {
        line = index + 1;
        let trimmed = raw.trim_start();

        if trimmed.starts_with('#') {
            continue;
        }

        if trimmed.is_empty() {
            if let Some(pending) = current.take() {
                routes.push(pending.finish(line)?);
            }
        } else if let Some(pending) = current.as_mut() {
            pending.path.push(parse_location(trimmed, line)?);
        } else {
            current = Some(PendingRoute::start(trimmed, line)?);
        }
    }

    // Last record may run to EOF without a blank line.
    if let Some(pending) = current.take() {
        routes.push(pending.finish(line)?);
    }

    Ok(routes)
}

/// Parse a `lat lon` pair. Anything after the second field is ignored.
fn parse_location(text: &str, line: usize) -> Result<Location, ParseError> {
    let mut fields = text.split_whitespace().map(str::parse::<f32>);
    match (fields.next(), fields.next()) {
        (Some(Ok(lat)), Some(Ok(lon)))
            if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) =>
        {
            Ok(Location::new(lat, lon))
        }
        _ => Err(ParseError::InvalidLocation { line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let text = "car\tDover - Calais  \n51.1207 1.3386\n50.9692 1.8621\n";
        let routes = parse_routes(text).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].ship_kind, ShipKind::Car);
        assert_eq!(routes[0].name.as_deref(), Some("Dover - Calais"));
        assert_eq!(routes[0].path_len(), 2);
        assert_eq!(routes[0].node(1), Location::new(50.9692, 1.8621));
    }

    #[test]
    fn test_parse_skips_bom_and_comments() {
        let text = "\u{feff}# OSM export\n# licence\n\nfoot\n# mid-record comment\n1.0 2.0\n1.5 2.5\n";
        let routes = parse_routes(text).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].ship_kind, ShipKind::Foot);
        assert_eq!(routes[0].name, None);
        assert_eq!(routes[0].path_len(), 2);
    }

    #[test]
    fn test_parse_multiple_records_and_crlf() {
        let text = "tanker Big One\r\n10 20\r\n10.5 20.5\r\n\r\n   \r\ncargo\r\n-1 -2\r\n-1.5 -2.5\r\n-2 -3\r\n";
        let routes = parse_routes(text).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].name.as_deref(), Some("Big One"));
        assert_eq!(routes[1].ship_kind, ShipKind::Cargo);
        assert_eq!(routes[1].path_len(), 3);
    }

    #[test]
    fn test_unknown_ship_kind_reports_line() {
        let text = "# header\n\nsubmarine Nautilus\n1 2\n";
        let err = parse_routes(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownShipKind {
                token: "submarine".to_string(),
                line: 3
            }
        );
    }

    #[test]
    fn test_invalid_location_reports_line() {
        let err = parse_routes("car\n1 2\n1 east\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidLocation { line: 3 });
        let err = parse_routes("car\n1\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidLocation { line: 2 });
        let err = parse_routes("car\n95 2\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidLocation { line: 2 });
    }

    #[test]
    fn test_empty_route_reports_terminating_line() {
        let err = parse_routes("car\n\n").unwrap_err();
        assert_eq!(err, ParseError::EmptyRoute { line: 2 });
        let err = parse_routes("car 1 2\n1 2\n3 4\n\nhgv").unwrap_err();
        assert_eq!(err, ParseError::EmptyRoute { line: 5 });
    }

    #[test]
    fn test_single_waypoint_rejected() {
        let err = parse_routes("leisure\n1 2\n").unwrap_err();
        assert_eq!(err, ParseError::SingleWaypoint { line: 2 });
    }

    #[test]
    fn test_empty_file_has_no_routes() {
        assert!(parse_routes("").unwrap().is_empty());
        assert!(parse_routes("\u{feff}# nothing here\n\n").unwrap().is_empty());
    }
}
