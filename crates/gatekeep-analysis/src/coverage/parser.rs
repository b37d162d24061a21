//! Root `line-rate` extraction with quick-xml.
//!
//! Only the root element's attribute is read, but the whole document must be
//! well-formed: a truncated report is treated as malformed, not as a pass.

use std::path::Path;

use gatekeep_core::errors::CoverageError;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::types::CoverageSummary;

/// Attribute on the root element carrying the overall line coverage.
pub const LINE_RATE_ATTR: &str = "line-rate";

/// Read and parse the coverage artifact at `path`.
pub fn parse_coverage_file(path: &Path) -> Result<CoverageSummary, CoverageError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoverageError::NotFound {
            path: display.clone(),
        },
        _ => CoverageError::Unreadable {
            path: display.clone(),
            message: e.to_string(),
        },
    })?;

    let content = String::from_utf8(bytes).map_err(|e| CoverageError::Malformed {
        path: display.clone(),
        message: format!("not valid UTF-8: {e}"),
    })?;

    parse_coverage_str(&content, &display)
}

/// Parse coverage XML held in memory. `source` names it in errors.
pub fn parse_coverage_str(content: &str, source: &str) -> Result<CoverageSummary, CoverageError> {
    let malformed = |message: String| CoverageError::Malformed {
        path: source.to_string(),
        message,
    };

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut raw_rate: Option<Option<String>> = None;
    let mut depth: usize = 0;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(format!("at byte {}: {e}", reader.error_position())))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if depth == 0 {
                    if raw_rate.is_some() {
                        return Err(malformed("more than one root element".to_string()));
                    }
                    let attr = e
                        .try_get_attribute(LINE_RATE_ATTR)
                        .map_err(|err| malformed(err.to_string()))?;
                    let value = match attr {
                        Some(a) => Some(
                            a.unescape_value()
                                .map_err(|err| malformed(err.to_string()))?
                                .into_owned(),
                        ),
                        None => None,
                    };
                    raw_rate = Some(value);
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref t) if depth == 0 => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed("text outside the root element".to_string()));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(malformed("text outside the root element".to_string()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(malformed("unexpected end of document".to_string()));
    }

    let Some(raw_rate) = raw_rate else {
        return Err(CoverageError::MissingRoot {
            path: source.to_string(),
        });
    };

    match raw_rate {
        None => {
            tracing::warn!(source, "coverage root has no {LINE_RATE_ATTR} attribute, using 0.0");
            Ok(CoverageSummary {
                line_rate: 0.0,
                attribute_present: false,
            })
        }
        Some(value) => {
            let line_rate = parse_rate(&value)?;
            Ok(CoverageSummary {
                line_rate,
                attribute_present: true,
            })
        }
    }
}

/// Parse a decimal ratio, rejecting non-finite and out-of-range values.
fn parse_rate(value: &str) -> Result<f64, CoverageError> {
    let rate: f64 = value
        .trim()
        .parse()
        .map_err(|_| CoverageError::InvalidRate {
            value: value.to_string(),
        })?;
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(CoverageError::RateOutOfRange { value: rate });
    }
    Ok(rate)
}
