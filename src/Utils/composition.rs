use std::collections::HashMap;

/// Parses "NAME:value" pairs separated by commas into a map. Whitespace around names and
/// values is ignored; species names may contain parentheses, e.g. "PT(S):0.9, H(S):0.1".
pub fn parse_composition(text: &str) -> Result<HashMap<String, f64>, String> {
    let mut map = HashMap::new();
    for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, value) = item
            .rsplit_once(':')
            .ok_or_else(|| format!("expected NAME:value, got '{}'", item))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing species name in '{}'", item));
        }
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid amount in '{}'", item))?;
        if !value.is_finite() || value < 0.0 {
            return Err(format!("amount of {} must be non-negative, got {}", name, value));
        }
        if map.insert(name.to_string(), value).is_some() {
            return Err(format!("species {} given twice", name));
        }
    }
    if map.is_empty() {
        return Err("empty composition".to_string());
    }
    Ok(map)
}
