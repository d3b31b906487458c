use super::ParsedRecord;
use thiserror::Error;

/// Position of the request path in the nginx `ui_short` format
///
/// ```text
/// $remote_addr  $remote_user $http_x_real_ip [$time_local] "$request" ...
/// ```
///
/// Fields are separated by single spaces, so the double space after `$remote_addr`
/// produces an empty field that counts toward the index.
pub const URL_FIELD_INDEX: usize = 7;

/// Why a single log line could not be turned into a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    #[error("empty URL field")]
    EmptyUrl,

    #[error("invalid request time '{0}'")]
    InvalidLatency(String),

    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Extracts the URL and the trailing request time from access log lines
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    url_field: usize,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(URL_FIELD_INDEX)
    }
}

impl LineParser {
    pub fn new(url_field: usize) -> Self {
        Self { url_field }
    }

    /// Parse one line. The line terminator, if present, is ignored.
    pub fn parse(&self, line: &str) -> Result<ParsedRecord, LineError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split(' ').collect();

        // The URL and the request time must be distinct fields
        let required = self.url_field + 2;
        if fields.len() < required {
            return Err(LineError::TooFewFields {
                found: fields.len(),
                required,
            });
        }

        let url = fields[self.url_field];
        if url.is_empty() {
            return Err(LineError::EmptyUrl);
        }

        let raw_latency = fields[fields.len() - 1];
        let latency: f64 = raw_latency
            .parse()
            .map_err(|_| LineError::InvalidLatency(raw_latency.to_string()))?;
        if !latency.is_finite() || latency < 0.0 {
            return Err(LineError::InvalidLatency(raw_latency.to_string()));
        }

        Ok(ParsedRecord {
            url: url.to_string(),
            latency,
        })
    }

    /// Parse one raw line as read from disk
    pub fn parse_bytes(&self, line: &[u8]) -> Result<ParsedRecord, LineError> {
        let line = std::str::from_utf8(line).map_err(|_| LineError::NotUtf8)?;
        self.parse(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET /api/v2/banner/25019354 HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9 libwww-FM/2.14 SSL-MM/1.4.1 GNUTLS/2.10.5" "-" "1498697422-2190034393-4708-9752759" "dc7161be3" 0.390"#;

    #[test]
    fn test_parse_nginx_line() {
        let record = LineParser::default().parse(SAMPLE).unwrap();
        assert_eq!(record.url, "/api/v2/banner/25019354");
        assert_eq!(record.latency, 0.390);
    }

    #[test]
    fn test_parse_ignores_line_terminator() {
        let parser = LineParser::default();
        let unix = parser.parse(&format!("{}\n", SAMPLE)).unwrap();
        let windows = parser.parse(&format!("{}\r\n", SAMPLE)).unwrap();
        assert_eq!(unix.latency, 0.390);
        assert_eq!(windows.latency, 0.390);
    }

    #[test]
    fn test_parse_too_few_fields() {
        let result = LineParser::default().parse("1.2.3.4 - - /short 0.1");
        assert_eq!(
            result,
            Err(LineError::TooFewFields {
                found: 5,
                required: 9
            })
        );
    }

    #[test]
    fn test_parse_invalid_latency() {
        let line = SAMPLE.replace(" 0.390", " fast");
        let result = LineParser::default().parse(&line);
        assert_eq!(result, Err(LineError::InvalidLatency("fast".to_string())));
    }

    #[test]
    fn test_parse_rejects_negative_and_non_finite_latency() {
        let parser = LineParser::default();
        for bad in ["-0.5", "inf", "NaN"] {
            let line = SAMPLE.replace(" 0.390", &format!(" {}", bad));
            assert!(
                matches!(parser.parse(&line), Err(LineError::InvalidLatency(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_trailing_space_is_malformed() {
        let line = format!("{} ", SAMPLE);
        assert_eq!(
            LineParser::default().parse(&line),
            Err(LineError::InvalidLatency(String::new()))
        );
    }

    #[test]
    fn test_parse_empty_url() {
        let line = "a b c d e f g  h i 0.1";
        assert_eq!(LineParser::default().parse(line), Err(LineError::EmptyUrl));
    }

    #[test]
    fn test_parse_custom_url_field() {
        let record = LineParser::new(1).parse("GET /index 0.25").unwrap();
        assert_eq!(record.url, "/index");
        assert_eq!(record.latency, 0.25);
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let result = LineParser::default().parse_bytes(&[0xff, 0xfe, b' ', b'1']);
        assert_eq!(result, Err(LineError::NotUtf8));
    }
}
