//! A small JSON path grammar sufficient for LLD macro-path mappings.
//!
//! Supported forms, chainable: `$`, `.name`, `["name"]`, `[N]`. This is
//! intentionally narrower than a general JSON path language — it only needs
//! to select one scalar out of one row, the same job `zbx_json_path_open` /
//! `zbx_json_value_dyn` do in the original.

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed, syntactically valid JSON path.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parses and syntactically validates `path`. Does not require the path
    /// to resolve against any particular document — this is the sole
    /// validation entry point [`crate::macro_path::MacroPathTable::load`]
    /// calls to reject a malformed path at load time.
    pub fn parse(path: &str) -> Result<Self, String> {
        let chars: Vec<char> = path.chars().collect();
        if chars.first() != Some(&'$') {
            return Err("path must start with '$'".to_string());
        }

        let mut segments = Vec::new();
        let mut i = 1;
        while i < chars.len() {
            match chars[i] {
                '.' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && chars[end] != '.' && chars[end] != '[' {
                        end += 1;
                    }
                    if end == start {
                        return Err(format!("empty member name at offset {i}"));
                    }
                    segments.push(Segment::Key(chars[start..end].iter().collect()));
                    i = end;
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|&c| c == ']')
                        .map(|p| i + p)
                        .ok_or_else(|| format!("unterminated '[' at offset {i}"))?;
                    let inner: String = chars[i + 1..close].iter().collect();
                    let trimmed = inner.trim();
                    if trimmed.is_empty() {
                        return Err(format!("empty index/key at offset {i}"));
                    }
                    if (trimmed.starts_with('"') && trimmed.ends_with('"'))
                        || (trimmed.starts_with('\'') && trimmed.ends_with('\''))
                    {
                        let key = &trimmed[1..trimmed.len() - 1];
                        segments.push(Segment::Key(key.to_string()));
                    } else {
                        let idx: usize = trimmed
                            .parse()
                            .map_err(|_| format!("invalid index '{trimmed}' at offset {i}"))?;
                        segments.push(Segment::Index(idx));
                    }
                    i = close + 1;
                }
                other => return Err(format!("unexpected character '{other}' at offset {i}")),
            }
        }

        Ok(JsonPath { segments })
    }

    /// Opens the path against `root` and extracts a scalar. Returns `None` if
    /// any segment fails to resolve, or if the terminal value is not a
    /// JSON string/number/bool.
    pub fn extract<'a>(&self, root: &'a serde_json::Value) -> Option<String> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (Segment::Key(k), serde_json::Value::Object(map)) => map.get(k)?,
                (Segment::Index(idx), serde_json::Value::Array(arr)) => arr.get(*idx)?,
                _ => return None,
            };
        }
        scalar_to_string(current)
    }
}

pub(crate) fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_member_access() {
        let path = JsonPath::parse("$.name").unwrap();
        let row = json!({"name": "eth0"});
        assert_eq!(path.extract(&row), Some("eth0".to_string()));
    }

    #[test]
    fn bracket_member_access() {
        let path = JsonPath::parse("$[\"name\"]").unwrap();
        let row = json!({"name": "eth0"});
        assert_eq!(path.extract(&row), Some("eth0".to_string()));
    }

    #[test]
    fn nested_chain() {
        let path = JsonPath::parse("$.interface.name").unwrap();
        let row = json!({"interface": {"name": "eth0"}});
        assert_eq!(path.extract(&row), Some("eth0".to_string()));
    }

    #[test]
    fn array_index() {
        let path = JsonPath::parse("$.items[1]").unwrap();
        let row = json!({"items": ["a", "b", "c"]});
        assert_eq!(path.extract(&row), Some("b".to_string()));
    }

    #[test]
    fn miss_does_not_resolve() {
        let path = JsonPath::parse("$.name").unwrap();
        let row = json!({"NAME": "eth0"});
        assert_eq!(path.extract(&row), None);
    }

    #[test]
    fn object_terminal_is_not_a_scalar() {
        let path = JsonPath::parse("$.interface").unwrap();
        let row = json!({"interface": {"name": "eth0"}});
        assert_eq!(path.extract(&row), None);
    }

    #[test]
    fn invalid_syntax_rejected() {
        assert!(JsonPath::parse("name").is_err());
        assert!(JsonPath::parse("$.").is_err());
        assert!(JsonPath::parse("$[unterminated").is_err());
    }
}
