//! Wire format of the MangaDex API, limited to the fields we read.

use crate::models::MultiLanguageString;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LangField {
    pub en: String,
    pub ja: String,
    #[serde(rename = "ja-ro")]
    pub ja_ro: String,
    pub fr: String,
    pub ko: String,
    pub zh: String,
    #[serde(rename = "zh-hk")]
    pub zh_hk: String,
}

impl From<&LangField> for MultiLanguageString {
    fn from(field: &LangField) -> Self {
        MultiLanguageString {
            en: field.en.clone(),
            jp: field.ja.clone(),
            jp_ro: field.ja_ro.clone(),
            fr: field.fr.clone(),
            ko: field.ko.clone(),
            zh: field.zh.clone(),
            zh_hk: field.zh_hk.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationshipAttributes {
    pub name: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct Tag {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MangaAttributes {
    pub title: LangField,
    pub alt_titles: Vec<LangField>,
    pub description: LangField,
    pub original_language: String,
    pub status: Option<String>,
    pub state: Option<String>,
    pub tags: Vec<Tag>,
    pub available_translated_languages: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct Manga {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// `GET /manga`
#[derive(Debug, Deserialize)]
pub struct MangaListResponse {
    pub result: String,
    #[serde(default)]
    pub data: Vec<Manga>,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total: u64,
}

/// `GET /manga/{id}`
#[derive(Debug, Deserialize)]
pub struct MangaResponse {
    pub result: String,
    pub data: Option<Manga>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChapterAttributes {
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: String,
    pub external_url: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    pub id: String,
    #[serde(default)]
    pub attributes: ChapterAttributes,
}

/// `GET /manga/{id}/feed`
#[derive(Debug, Deserialize)]
pub struct ChapterListResponse {
    pub result: String,
    #[serde(default)]
    pub data: Vec<ChapterEntry>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    pub data: Vec<String>,
    pub data_saver: Vec<String>,
}

/// `GET /at-home/server/{chapterId}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeResponse {
    pub result: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub chapter: AtHomeChapter,
}
