use crate::error::LineError;

const TAG: &str = "EXT-X-STREAM-INF";

/// Represents parsed stream information from #EXT-X-STREAM-INF tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    pub bandwidth: u64,
    pub codecs: Option<String>,
}

impl StreamInfo {
    /// Parse from #EXT-X-STREAM-INF tag line.
    ///
    /// `BANDWIDTH` is mandatory. Unknown attributes are ignored, but every
    /// attribute must still be of the form `NAME=value`.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let content = line
            .trim()
            .strip_prefix("#EXT-X-STREAM-INF:")
            .ok_or(LineError::MalformedTag(TAG))?;

        let mut info = Self::default();
        let mut bandwidth: Option<u64> = None;

        for attr in Self::parse_attributes(content) {
            let Some((key, value)) = attr.split_once('=') else {
                return Err(LineError::MalformedAttribute {
                    tag: TAG,
                    attribute: attr.to_string(),
                });
            };

            let key = key.trim().to_uppercase();
            let value = value.trim();

            match key.as_str() {
                "BANDWIDTH" => {
                    bandwidth = Some(value.parse().map_err(|_| LineError::InvalidNumber {
                        tag: TAG,
                        field: "bandwidth",
                        value: value.to_string(),
                    })?);
                }
                "CODECS" => info.codecs = Some(value.trim_matches(['"', ' ']).to_string()),
                _ => {}
            }
        }

        info.bandwidth = bandwidth.ok_or(LineError::MissingAttribute {
            tag: TAG,
            attribute: "BANDWIDTH",
        })?;

        Ok(info)
    }

    fn parse_attributes(s: &str) -> Vec<&str> {
        let mut attrs = Vec::new();
        let mut start = 0;
        let mut in_quotes = false;

        for (i, c) in s.char_indices() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    attrs.push(s[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }

        if start < s.len() {
            attrs.push(s[start..].trim());
        }

        attrs
    }
}
