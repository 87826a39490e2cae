// src/ingest/types.rs
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Whether the text is a submission or a reply; drives the keyphrase budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Post,
    #[default]
    Comment,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Post => "post",
            ItemKind::Comment => "comment",
        }
    }
}

/// One text unit handed over by a fetch layer (Reddit JSON walker, YouTube
/// comment pager, anything else). Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: String,
    /// Reddit score or YouTube like count.
    #[serde(default, alias = "like_count", alias = "likeCount")]
    pub score: i64,
    /// Unix seconds. Accepts a number or an RFC 3339 string on input.
    #[serde(
        default,
        alias = "created",
        alias = "published_at",
        alias = "publishedAt",
        deserialize_with = "deserialize_unix_ts"
    )]
    pub created_utc: Option<i64>,
    /// Raw text; `None` when the source had no body at all.
    #[serde(default, alias = "text", alias = "body_text")]
    pub body: Option<String>,
    #[serde(default)]
    pub kind: ItemKind,
    /// e.g. "reddit", "youtube"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl RawItem {
    pub fn comment(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn post(id: impl Into<String>, title: &str, selftext: &str) -> Self {
        // Reddit posts are analysed as "title\nselftext".
        Self {
            id: id.into(),
            body: Some(format!("{title}\n{selftext}")),
            kind: ItemKind::Post,
            ..Self::default()
        }
    }

    pub fn body_str(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TsRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_unix_ts<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<TsRepr> = Option::deserialize(de)?;
    Ok(v.and_then(|r| match r {
        TsRepr::Int(i) => Some(i),
        TsRepr::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        TsRepr::Float(_) => None,
        TsRepr::Text(s) => parse_timestamp(&s),
    }))
}

/// RFC 3339 (`2024-03-17T09:30:00Z`) or plain unix seconds in a string.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.timestamp());
    }
    t.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reddit_shape_with_float_ts() {
        let raw = r#"{"id":"k1","author":"a","score":12,"created_utc":1710667800.0,"body":"hi"}"#;
        let it: RawItem = serde_json::from_str(raw).unwrap();
        assert_eq!(it.created_utc, Some(1_710_667_800));
        assert_eq!(it.kind, ItemKind::Comment);
        assert_eq!(it.body_str(), Some("hi"));
    }

    #[test]
    fn youtube_shape_with_rfc3339_and_like_count() {
        let raw = r#"{"id":"y1","author":"b","likeCount":3,"publishedAt":"2024-03-17T09:30:00Z","text":"nice"}"#;
        let it: RawItem = serde_json::from_str(raw).unwrap();
        assert_eq!(it.score, 3);
        assert_eq!(it.created_utc, Some(1_710_667_800));
        assert_eq!(it.body_str(), Some("nice"));
    }

    #[test]
    fn missing_and_null_fields_default() {
        let it: RawItem = serde_json::from_str(r#"{"id":"z","body":null,"created_utc":null}"#).unwrap();
        assert!(it.body.is_none());
        assert!(it.created_utc.is_none());
        assert_eq!(it.score, 0);
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("1710667800"), Some(1_710_667_800));
    }
}
