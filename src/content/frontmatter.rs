//! Front-matter parsing

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                match item {
                    serde_yaml::Value::String(s) => vec.push(s),
                    serde_yaml::Value::Number(n) => vec.push(n.to_string()),
                    serde_yaml::Value::Bool(b) => vec.push(b.to_string()),
                    _ => {}
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Posts are published unless explicitly `published: false`
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            tags: Vec::new(),
            description: None,
            kind: None,
            published: true,
            extra: IndexMap::new(),
        }
    }
}

impl FrontMatter {
    /// Split a content file into front-matter and body
    ///
    /// Files without a well-formed `---` block, or whose block is not YAML,
    /// come back with default front-matter and the whole input as body.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start_matches('\u{feff}');

        let Some((yaml, body)) = split_block(content) else {
            return (FrontMatter::default(), content);
        };

        if yaml.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        if !looks_like_yaml(yaml) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                let fm = FrontMatter {
                    published: published_flag(yaml),
                    ..Default::default()
                };
                (fm, content)
            }
        }
    }

    /// Render front-matter and body back into a content file
    pub fn to_source(&self, body: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n\n{}", yaml, body))
    }
}

/// Publication flag of a block the typed parse rejected
///
/// Only a missing key or `published: true` keeps the post public; a block
/// that is not readable YAML at all counts as unpublished.
fn published_flag(yaml: &str) -> bool {
    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(value) => value
            .get("published")
            .map_or(true, |v| v.as_bool() == Some(true)),
        Err(_) => false,
    }
}

/// Locate the leading `---` ... `---` block, returning (yaml, body)
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// A block counts as YAML when some line has the `key: value` shape.
/// Keeps a leading markdown horizontal rule from being swallowed.
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
date: "2024-01-15"
tags: ["rust", "memo"]
description: "first post"
type: book
published: false
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.tags, vec!["rust", "memo"]);
        assert_eq!(fm.kind.as_deref(), Some("book"));
        assert!(!fm.published);
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_published_defaults_to_true() {
        let (fm, _) = FrontMatter::parse("---\ntitle: x\n---\nbody");
        assert!(fm.published);
    }

    #[test]
    fn test_single_string_tag() {
        let (fm, _) = FrontMatter::parse("---\ntitle: x\ntags: book\n---\nbody");
        assert_eq!(fm.tags, vec!["book"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("just text");
        assert!(fm.title.is_none());
        assert_eq!(body, "just text");
    }

    #[test]
    fn test_markdown_rule_not_yaml() {
        let content = "---\nSome prose with a link https://example.com\n---\nMore";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_draft_stays_unpublished() {
        let content = "---\ntitle: Secret\ntags: {a: 1}\npublished: false\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert!(!fm.published);
        assert_eq!(body, content);

        let (fm, _) = FrontMatter::parse("---\ntitle: [Secret, Two]\npublished: \"no\"\n---\n");
        assert!(!fm.published);

        let (fm, _) = FrontMatter::parse("---\ntitle: [a, b]\n---\nbody");
        assert!(fm.published);

        let (fm, _) = FrontMatter::parse("---\ntitle: x\nbad: [unclosed\n---\nbody");
        assert!(!fm.published);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let (fm, _) = FrontMatter::parse("---\ntitle: x\ncover: /images/x/a.png\n---\n");
        assert_eq!(
            fm.extra.get("cover").and_then(|v| v.as_str()),
            Some("/images/x/a.png")
        );
    }

    #[test]
    fn test_to_source_round_trips() {
        let fm = FrontMatter {
            title: Some("Draft".to_string()),
            date: Some("2024-03-01".to_string()),
            tags: vec!["memo".to_string()],
            published: false,
            ..Default::default()
        };
        let source = fm.to_source("Body text\n").unwrap();
        assert!(source.starts_with("---\n"));

        let (parsed, body) = FrontMatter::parse(&source);
        assert_eq!(parsed.title.as_deref(), Some("Draft"));
        assert_eq!(parsed.tags, vec!["memo"]);
        assert!(!parsed.published);
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");

        let dt = parse_date_string("2024-01-15T10:30:00+09:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "01:30");

        assert!(parse_date_string("someday").is_none());
    }
}
