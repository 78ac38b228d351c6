//! Canonical, provider-agnostic domain model.
//!
//! Every source adapter normalizes its catalog into these types. Field names
//! are serialized exactly as the outward JSON API expects them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a canonical taxonomy value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid {kind}")]
pub struct ParseCanonicalError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a provider, e.g. `mangadex`.
    SourceId
);
string_id!(
    /// Provider-scoped identifier of a serie.
    SerieId
);
string_id!(VolumeId);
string_id!(ChapterId);

macro_rules! canonical_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseCanonicalError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($value => Ok($name::$variant),)+
                    other => Err(ParseCanonicalError { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

canonical_enum!(
    /// Languages a serie or chapter can be published in.
    Language, "language" {
        En => "en",
        Jp => "jp",
        Fr => "fr",
        Ko => "ko",
        ZhHk => "zh-hk",
        Zh => "zh",
    }
);

canonical_enum!(
    /// Publication or scanlation state of a serie.
    Status, "status" {
        Ongoing => "ongoing",
        Completed => "completed",
        Hiatus => "hiatus",
        Canceled => "canceled",
        Publishing => "publishing",
        PublishingDone => "publishing_done",
        Published => "published",
        Scanlating => "scanlating",
        ScanlatingDone => "scanlating_done",
        Scanlated => "scanlated",
        Unknown => "unknown",
    }
);

canonical_enum!(
    SerieType, "type" {
        Manga => "manga",
        Manhwa => "manhwa",
        Manhua => "manhua",
        Webtoon => "webtoon",
        LightNovel => "lightnovel",
        Novel => "novel",
        Doujinshi => "doujinshi",
        Comic => "comic",
        Oel => "oel",
        Unknown => "unknown",
    }
);

canonical_enum!(
    Sort, "sort" {
        Latest => "Latest",
        Popularity => "Popularity",
        Relevance => "Relevance",
        Alphabetic => "Alphabetic",
    }
);

canonical_enum!(
    Order, "order" {
        Asc => "asc",
        Desc => "desc",
    }
);

canonical_enum!(
    Genre, "genre" {
        Unknown => "Unknown",
        Other => "Other",
        FourKoma => "4-Koma",
        Action => "Action",
        Adaptation => "Adaptation",
        Adult => "Adult",
        Adventure => "Adventure",
        Aliens => "Aliens",
        Animals => "Animals",
        Anthology => "Anthology",
        AwardWinning => "Award Winning",
        BoysLove => "Boy's Love",
        Comedy => "Comedy",
        Cooking => "Cooking",
        Crime => "Crime",
        Crossdressing => "Crossdressing",
        Delinquents => "Delinquents",
        Demons => "Demons",
        Doujinshi => "Doujinshi",
        Drama => "Drama",
        Ecchi => "Ecchi",
        FanColored => "Fan Colored",
        Fantasy => "Fantasy",
        FullColor => "Full Color",
        GenderBender => "Gender Bender",
        Genderswap => "Genderswap",
        Ghost => "Ghost",
        GirlsLove => "Girl's Love",
        Gore => "Gore",
        Gyaru => "Gyaru",
        Harem => "Harem",
        Hentai => "Hentai",
        Historical => "Historical",
        Horror => "Horror",
        Incest => "Incest",
        Isekai => "Isekai",
        Josei => "Josei",
        Kids => "Kids",
        Lolicon => "Lolicon",
        LongStrip => "Long Strip",
        Mafia => "Mafia",
        Magic => "Magic",
        MagicalGirls => "Magical Girls",
        MartialArts => "Martial Arts",
        Mature => "Mature",
        Mecha => "Mecha",
        Medical => "Medical",
        Military => "Military",
        MonsterGirls => "Monster Girls",
        Monsters => "Monsters",
        Music => "Music",
        Mystery => "Mystery",
        Ninja => "Ninja",
        OfficeWorkers => "Office Workers",
        OfficialColored => "Official Colored",
        OneShot => "One Shot",
        Philosophical => "Philosophical",
        Police => "Police",
        PostApocalyptic => "Post-Apocalyptic",
        Psychological => "Psychological",
        PsychologicalRomance => "Psychological Romance",
        Reincarnation => "Reincarnation",
        ReverseHarem => "Reverse Harem",
        Romance => "Romance",
        Samurai => "Samurai",
        SchoolLife => "School Life",
        SciFi => "Sci-Fi",
        Seinen => "Seinen",
        SelfPublished => "Self Published",
        SexualViolence => "Sexual Violence",
        Shotacon => "Shotacon",
        Shoujo => "Shoujo",
        ShoujoAi => "Shoujo Ai",
        Shounen => "Shounen",
        ShounenAi => "Shounen Ai",
        SliceOfLife => "Slice of Life",
        Smut => "Smut",
        Space => "Space",
        Sports => "Sports",
        Superhero => "Superhero",
        Supernatural => "Supernatural",
        Survival => "Survival",
        Suspense => "Suspense",
        Thriller => "Thriller",
        TimeTravel => "Time Travel",
        Toomics => "Toomics",
        TraditionalGames => "Traditional Games",
        Tragedy => "Tragedy",
        Vampires => "Vampires",
        VideoGames => "Video Games",
        Villainess => "Villainess",
        VirtualReality => "Virtual Reality",
        WebComic => "Web Comic",
        Wuxia => "Wuxia",
        Yaoi => "Yaoi",
        Yuri => "Yuri",
        Zombies => "Zombies",
    }
);

/// Text translated into the small set of languages the API exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLanguageString {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub en: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jp_ro: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ko: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zh: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zh_hk: String,
}

impl MultiLanguageString {
    /// English-only text, the common case for scraped sources.
    pub fn english(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFiltersGenres {
    pub included: bool,
    pub excluded: bool,
    #[serde(rename = "possibleValues")]
    pub possible_values: Vec<Genre>,
}

/// Search facets a source actually honors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFilters {
    pub query: bool,
    pub orders: Vec<Order>,
    pub sorts: Vec<Sort>,
    pub artists: bool,
    pub authors: bool,
    pub types: Vec<SerieType>,
    pub genres: SupportedFiltersGenres,
    pub status: Vec<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInformation {
    pub id: SourceId,
    pub name: String,
    pub url: String,
    #[serde(rename = "iconURL")]
    pub icon: String,
    pub languages: Vec<Language>,
    pub updated_at: DateTime<Utc>,
    pub version: String,
    /// Shortest interval, in seconds, between two refreshes of the same serie.
    pub minimum_update_interval: u64,
    pub nsfw: bool,
    pub search_filters: SupportedFilters,
}

/// Transport details of a source, consumed by tooling rather than end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceApiInformation {
    #[serde(rename = "apiURL")]
    pub api_url: String,
    /// Header name to values, as sent on every request.
    pub headers: BTreeMap<String, Vec<String>>,
    /// Per-call timeout in seconds.
    pub timeout: u64,
    pub can_block_scraping: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSearchSerieFilterGenres {
    #[serde(default)]
    pub include: Vec<Genre>,
    #[serde(default)]
    pub exclude: Vec<Genre>,
}

/// Canonical search request. Each source decides which fields it honors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSearchSerieFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub order: Option<Order>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub genres: FetchSearchSerieFilterGenres,
    #[serde(default)]
    pub types: Vec<SerieType>,
    #[serde(default)]
    pub status: Vec<Status>,
}

impl FetchSearchSerieFilter {
    pub fn sorted(sort: Sort, order: Order) -> Self {
        Self {
            sort: Some(sort),
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSmallSerie {
    pub id: SerieId,
    pub title: MultiLanguageString,
    pub cover: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedSmallSerie {
    pub has_next_page: bool,
    pub series: Vec<SourceSmallSerie>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSerieVolumeChapter {
    pub id: ChapterId,
    pub name: String,
    pub chapter_number: f64,
    pub language: Language,
    pub date_upload: Option<DateTime<Utc>>,
    #[serde(rename = "externalURL")]
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSerieVolume {
    pub id: VolumeId,
    pub name: String,
    pub volume_number: f64,
    pub chapters: Vec<SourceSerieVolumeChapter>,
    pub missing_chapters: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSerie {
    pub id: SerieId,
    pub title: MultiLanguageString,
    pub alternative_titles: Vec<MultiLanguageString>,
    pub cover: String,
    pub synopsis: MultiLanguageString,
    #[serde(rename = "type")]
    pub serie_type: SerieType,
    pub genres: Vec<Genre>,
    pub status: Vec<Status>,
    pub authors: Vec<String>,
    pub artists: Vec<String>,
    pub volumes: Vec<SourceSerieVolume>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterImage {
    pub index: usize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterText {
    pub index: usize,
    pub text: String,
}

/// Renderable content of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSerieVolumeChapterData {
    Image { images: Vec<ChapterImage> },
    Text { texts: Vec<ChapterText> },
}

impl SourceSerieVolumeChapterData {
    pub fn images(&self) -> &[ChapterImage] {
        match self {
            SourceSerieVolumeChapterData::Image { images } => images,
            SourceSerieVolumeChapterData::Text { .. } => &[],
        }
    }

    pub fn texts(&self) -> &[ChapterText] {
        match self {
            SourceSerieVolumeChapterData::Text { texts } => texts,
            SourceSerieVolumeChapterData::Image { .. } => &[],
        }
    }
}
