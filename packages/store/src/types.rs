use serde::{Deserialize, Serialize};

/// Publication state of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageStatus::Draft => write!(f, "draft"),
            PageStatus::Published => write!(f, "published"),
        }
    }
}

/// External page identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub status: PageStatus,
}

/// One persisted section of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub section_id: String,
    pub content_type: String,
    pub raw_text: String,
}

/// Seed for a page that `ensure_default_pages` guarantees exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPage {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub status: PageStatus,
}

impl DefaultPage {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, status: PageStatus) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            status,
        }
    }

    /// The stock page set: a published home page and a draft about page
    pub fn standard_set() -> Vec<DefaultPage> {
        vec![
            DefaultPage::new("home", "Home", PageStatus::Published),
            DefaultPage::new("about", "About", PageStatus::Draft),
        ]
    }

    pub fn to_page_ref(&self) -> PageRef {
        PageRef {
            id: page_id_for_slug(&self.slug),
            slug: self.slug.clone(),
            title: self.title.clone(),
            status: self.status,
        }
    }
}

/// Page ids are derived from slugs so seeding is deterministic
pub fn page_id_for_slug(slug: &str) -> String {
    format!("page-{}", slug)
}
