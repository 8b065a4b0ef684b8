use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};

pub const FALLBACK_CATEGORY: &str = "Geral";
pub const FALLBACK_ICON:     &str = "Link";

/// Everything but encodeURIComponent's unreserved marks.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-').remove(b'_').remove(b'.').remove(b'!')
    .remove(b'~').remove(b'*').remove(b'\'').remove(b'(').remove(b')');

/// One bookmarked link as stored in the hub document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(deserialize_with = "de_id")]
    pub id:          String,
    pub title:       String,
    pub url:         String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category:    String,
    #[serde(default = "default_icon")]
    pub icon:        String,
    #[serde(default)]
    pub order:       i64,
}

/// Fields an admin supplies when adding or editing a link.
/// `None` means "leave as is" on edit and "use the fallback" on add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkDraft {
    pub title:       Option<String>,
    pub url:         Option<String>,
    pub description: Option<String>,
    pub category:    Option<String>,
    pub icon:        Option<String>,
    pub order:       Option<i64>,
}

impl LinkDraft {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            url:   Some(url.to_string()),
            ..Self::default()
        }
    }
}

impl LinkEntry {
    /// Thumbnail service URL used for link previews.
    pub fn preview_url(&self) -> String {
        format!("https://s0.wp.com/mshots/v1/{}?w=800", utf8_percent_encode(&self.url, COMPONENT))
    }
}

fn default_icon() -> String {
    FALLBACK_ICON.to_string()
}

// The web client generated numeric ids in some versions; accept both.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Num(serde_json::Number),
    }
    Ok(match RawId::deserialize(d)? {
        RawId::Text(s) => s,
        RawId::Num(n)  => n.to_string(),
    })
}
