//! Frontmatter parsing — the minimal subset Peck needs.
//!
//! A frontmatter block is a leading `---` fence, a run of `key: value`
//! lines, and a closing `---` fence. Only top-level scalar values are
//! recognised; nested mappings, block lists, and multi-line values are
//! skipped without error, because a note whose rating property is not a
//! plain scalar simply is not comparable.

use std::collections::BTreeMap;

/// Split `content` into its frontmatter scalars and the body. Returns
/// `None` when no well-formed frontmatter block is present.
pub fn extract_frontmatter(content: &str) -> Option<(BTreeMap<String, String>, &str)> {
  let rest = content.strip_prefix("---")?;
  // The opening fence must be a whole line.
  let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

  let mut fields = BTreeMap::new();
  let mut offset = 0usize;

  for line in rest.split_inclusive('\n') {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    if trimmed == "---" {
      let body = &rest[offset + line.len()..];
      return Some((fields, body));
    }
    if let Some((key, value)) = parse_scalar_line(trimmed) {
      fields.insert(key.to_string(), value.to_string());
    }
    offset += line.len();
  }

  // Unterminated fence: not frontmatter at all.
  None
}

/// Parse one `key: value` line. Indented lines, comments, list items, and
/// lines without a colon yield `None`.
fn parse_scalar_line(line: &str) -> Option<(&str, &str)> {
  if line.starts_with([' ', '\t', '#', '-']) {
    return None;
  }
  let (key, value) = line.split_once(':')?;
  let key = key.trim();
  if key.is_empty() {
    return None;
  }
  Some((key, unquote(value.trim())))
}

/// Strip one matching pair of single or double quotes.
fn unquote(value: &str) -> &str {
  let bytes = value.as_bytes();
  if bytes.len() >= 2
    && (bytes[0] == b'"' || bytes[0] == b'\'')
    && bytes[bytes.len() - 1] == bytes[0]
  {
    &value[1..value.len() - 1]
  } else {
    value
  }
}

/// Read `property` from parsed frontmatter as a number. `None` when the
/// property is absent, empty, or not numeric.
pub fn numeric_property(fields: &BTreeMap<String, String>, property: &str) -> Option<f64> {
  let raw = fields.get(property)?.trim();
  if raw.is_empty() {
    return None;
  }
  raw.parse::<f64>().ok().filter(|n| n.is_finite())
}
