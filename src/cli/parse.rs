use saiten_core::format::OutputFormat;
use saiten_core::scoring::LeafInput;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a `KEY=VALUE` criterion score
pub fn parse_score(s: &str) -> std::result::Result<(String, LeafInput), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing criterion key in {:?}", s));
    }
    let input = value.trim().parse::<LeafInput>()?;
    Ok((key.to_string(), input))
}
