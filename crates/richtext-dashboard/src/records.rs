//! Dashboard records that carry rich-text content

use richtext_core::{Document, HtmlOptions};
use serde::{Deserialize, Deserializer, Serialize};

use crate::access::{SchoolId, SchoolScoped};
use crate::store::Entity;

/// A reading-corner article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Document,
    /// Author name; older records spell the field `writter`
    #[serde(default, alias = "writter")]
    pub writer: String,
    #[serde(default)]
    pub school: Option<SchoolId>,
    /// Cover image URL. The store sends a media relation
    /// (`{"data": {"attributes": {"url": ...}}}`); a bare URL is accepted too.
    #[serde(default, deserialize_with = "media_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Reading {
    /// Render the article body for read-only display
    pub fn content_html(&self, options: &HtmlOptions) -> String {
        self.content.to_html(options)
    }

    /// First `max_chars` characters of the body text, for list views
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = self.content.plain_text();
        let text = text.trim();
        match text.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}…", text[..end].trim_end()),
            None => text.to_string(),
        }
    }

    /// The writable fields of this article
    pub fn to_draft(&self) -> ReadingDraft {
        ReadingDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            writer: self.writer.clone(),
            school: self.school,
            image: self.image.clone(),
        }
    }
}

impl Entity for Reading {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl SchoolScoped for Reading {
    fn school_id(&self) -> Option<SchoolId> {
        self.school
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MediaRepr {
    Url(String),
    Relation { data: Option<MediaData> },
}

#[derive(Deserialize)]
struct MediaData {
    attributes: Option<MediaAttributes>,
}

#[derive(Deserialize)]
struct MediaAttributes {
    url: Option<String>,
}

fn media_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<MediaRepr>::deserialize(deserializer)? {
        None => None,
        Some(MediaRepr::Url(url)) => Some(url),
        Some(MediaRepr::Relation { data }) => data
            .and_then(|data| data.attributes)
            .and_then(|attributes| attributes.url),
    })
}

/// Fields sent when creating or updating a [`Reading`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingDraft {
    pub title: String,
    pub content: Document,
    pub writer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<SchoolId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ReadingDraft {
    pub fn new(title: impl Into<String>, content: Document) -> Self {
        Self {
            title: title.into(),
            content,
            ..Default::default()
        }
    }

    pub fn with_writer(mut self, writer: impl Into<String>) -> Self {
        self.writer = writer.into();
        self
    }

    pub fn with_school(mut self, school: SchoolId) -> Self {
        self.school = Some(school);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// A draft needs a title and some visible body text
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.is_blank()
    }
}

/// A registered school
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: SchoolId,
    pub title: String,
    #[serde(default)]
    pub address: String,
    /// Free-form status label
    #[serde(default)]
    pub status: Option<String>,
    /// Registration status
    #[serde(default)]
    pub schools_status: SchoolStatus,
}

impl Entity for School {
    type Id = SchoolId;

    fn id(&self) -> SchoolId {
        self.id
    }
}

impl SchoolScoped for School {
    fn school_id(&self) -> Option<SchoolId> {
        Some(self.id)
    }
}

/// Registration status of a school
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchoolStatus {
    Active,
    Inactive,
    #[default]
    Pending,
    Suspended,
    /// Any status string the dashboard does not know
    #[serde(untagged)]
    Other(String),
}
