//! Offline provider returning canned data, for wiring tests and demos.

use crate::chapters::{aggregate_volumes, RawChapter};
use crate::error::{Result, SearchParam, SourceError};
use crate::models::{
    ChapterId, ChapterImage, FetchSearchSerieFilter, Genre, Language, MultiLanguageString, Order,
    PaginatedSmallSerie, SerieId, SerieType, Sort, SourceApiInformation, SourceId,
    SourceInformation, SourceSerie, SourceSerieVolumeChapter, SourceSerieVolumeChapterData,
    SourceSmallSerie, Status, SupportedFilters, SupportedFiltersGenres, VolumeId,
};
use crate::sources::{site_url, translate_axis, Source};
use crate::taxonomy::{Axis, Codec, TaxonomyError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use tokio_util::sync::CancellationToken;
use url::Url;

const SITE_URL: &str = "http://localhost:8080";
const API_URL: &str = "https://localhost:8080";
const COVER_URL: &str = "http://localhost:8080/files/image.jpg";
const SEARCH_ROWS: usize = 5;
const CHAPTER_IMAGES: usize = 3;

const LOG_TARGET: &str = "dokusho_sources::mock";

/// Codec where every canonical value is its own native label.
fn identity<C>(
    axis: Axis,
    all: &[C],
    label: fn(&C) -> &'static str,
) -> std::result::Result<Codec<C>, TaxonomyError>
where
    C: Copy + Eq + Hash + fmt::Display,
{
    let table: Vec<(&'static str, C)> = all.iter().map(|c| (label(c), *c)).collect();
    Codec::new(axis, &table)
}

struct MockCodecs {
    genre: Codec<Genre>,
    status: Codec<Status>,
    serie_type: Codec<SerieType>,
    sort: Codec<Sort>,
    order: Codec<Order>,
}

pub struct MockSource {
    information: SourceInformation,
    api_information: SourceApiInformation,
    codecs: MockCodecs,
}

impl MockSource {
    pub fn new() -> Result<Self> {
        let codecs = MockCodecs {
            genre: identity(Axis::Genre, Genre::ALL, Genre::as_str)?,
            status: identity(Axis::Status, Status::ALL, Status::as_str)?,
            serie_type: identity(Axis::Type, SerieType::ALL, SerieType::as_str)?,
            sort: identity(Axis::Sort, Sort::ALL, Sort::as_str)?,
            order: identity(Axis::Order, Order::ALL, Order::as_str)?,
        };

        let information = SourceInformation {
            id: SourceId::from("mock_source"),
            name: "Mock Source".to_string(),
            url: SITE_URL.to_string(),
            icon: COVER_URL.to_string(),
            languages: Language::ALL.to_vec(),
            updated_at: Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).single().unwrap_or_default(),
            version: "1.0.0".to_string(),
            minimum_update_interval: 0,
            nsfw: true,
            search_filters: SupportedFilters {
                query: true,
                orders: codecs.order.supported(),
                sorts: codecs.sort.supported(),
                artists: true,
                authors: true,
                types: codecs.serie_type.supported(),
                genres: SupportedFiltersGenres {
                    included: true,
                    excluded: true,
                    possible_values: codecs.genre.supported(),
                },
                status: codecs.status.supported(),
            },
        };

        let api_information = SourceApiInformation {
            api_url: API_URL.to_string(),
            headers: BTreeMap::new(),
            timeout: 1,
            can_block_scraping: false,
        };

        Ok(Self {
            information,
            api_information,
            codecs,
        })
    }

    fn chapter(id: &str, number: f64) -> SourceSerieVolumeChapter {
        SourceSerieVolumeChapter {
            id: ChapterId::from(id),
            name: format!("Chapter {}", number),
            chapter_number: number,
            language: Language::En,
            date_upload: Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).single(),
            external_url: None,
        }
    }
}

fn mock_title() -> MultiLanguageString {
    MultiLanguageString {
        en: "Mock".to_string(),
        jp: "Mock".to_string(),
        jp_ro: "Mock".to_string(),
        fr: "Mock".to_string(),
        ko: "Mock".to_string(),
        zh: "Mock".to_string(),
        zh_hk: "Mock".to_string(),
    }
}

#[async_trait]
impl Source for MockSource {
    fn information(&self) -> &SourceInformation {
        &self.information
    }

    fn api_information(&self) -> &SourceApiInformation {
        &self.api_information
    }

    async fn fetch_search_serie(
        &self,
        page: u32,
        filter: &FetchSearchSerieFilter,
        _cancel: &CancellationToken,
    ) -> Result<PaginatedSmallSerie> {
        let id = self.information.id.as_str();
        // Rows are fixed but filters are still validated.
        if let Some(sort) = filter.sort {
            self.codecs.sort.to_native(sort).map_err(SourceError::invalid_search(SearchParam::Sort))?;
        }
        if let Some(order) = filter.order {
            self.codecs.order.to_native(order).map_err(SourceError::invalid_search(SearchParam::Order))?;
        }
        translate_axis(id, Some(&self.codecs.genre), &filter.genres.include, SearchParam::Genres)?;
        translate_axis(id, Some(&self.codecs.genre), &filter.genres.exclude, SearchParam::Genres)?;
        translate_axis(id, Some(&self.codecs.status), &filter.status, SearchParam::Status)?;
        translate_axis(id, Some(&self.codecs.serie_type), &filter.types, SearchParam::Types)?;

        log::debug!(target: LOG_TARGET, "Serving search page {} ({:?})", page, filter.query);

        let series = (0..SEARCH_ROWS)
            .map(|_| SourceSmallSerie {
                id: SerieId::from("ID"),
                title: mock_title(),
                cover: COVER_URL.to_string(),
            })
            .collect();

        Ok(PaginatedSmallSerie {
            has_next_page: true,
            series,
        })
    }

    async fn fetch_serie_detail(
        &self,
        serie_id: &SerieId,
        _cancel: &CancellationToken,
    ) -> Result<SourceSerie> {
        log::debug!(target: LOG_TARGET, "Serving serie detail for {}", serie_id);

        let chapters = vec![
            RawChapter::new("2", Self::chapter("chapter-6", 6.0)),
            RawChapter::new("2", Self::chapter("chapter-4", 4.0)),
            RawChapter::new("1", Self::chapter("chapter-2.5", 2.5)),
            RawChapter::new("1", Self::chapter("chapter-2", 2.0)),
            RawChapter::new("", Self::chapter("chapter-1", 1.0)),
        ];

        Ok(SourceSerie {
            id: serie_id.clone(),
            title: mock_title(),
            alternative_titles: vec![MultiLanguageString::english("Mock Alternative")],
            cover: COVER_URL.to_string(),
            synopsis: MultiLanguageString::english("A serie served without touching the network."),
            serie_type: SerieType::Manga,
            genres: vec![Genre::Action, Genre::Comedy],
            status: vec![Status::Ongoing],
            authors: vec!["Mock Author".to_string()],
            artists: vec!["Mock Artist".to_string()],
            volumes: aggregate_volumes(chapters),
        })
    }

    async fn fetch_chapter_data(
        &self,
        _serie_id: &SerieId,
        _volume_id: &VolumeId,
        chapter_id: &ChapterId,
        _cancel: &CancellationToken,
    ) -> Result<SourceSerieVolumeChapterData> {
        log::debug!(target: LOG_TARGET, "Serving chapter data for {}", chapter_id);

        let images = (1..=CHAPTER_IMAGES)
            .map(|index| ChapterImage {
                index,
                url: COVER_URL.to_string(),
            })
            .collect();

        Ok(SourceSerieVolumeChapterData::Image { images })
    }

    fn serie_url(&self, serie_id: &SerieId) -> Result<Url> {
        site_url(SITE_URL, "serie", serie_id)
    }
}
