//! MangaDex, backed by its public JSON API.

pub mod codec;
pub mod schema;

use crate::chapters::{aggregate_volumes, RawChapter};
use crate::config::SourcesConfig;
use crate::error::{Result, SearchParam, SourceError};
use crate::helpers::parse_number;
use crate::http_client::{decode_json, read_text, SourceHttpClient};
use crate::models::{
    ChapterId, ChapterImage, FetchSearchSerieFilter, Genre, Language, MultiLanguageString,
    PaginatedSmallSerie, SerieId, SerieType, SourceApiInformation, SourceId, SourceInformation,
    SourceSerie, SourceSerieVolumeChapter, SourceSerieVolumeChapterData, SourceSmallSerie, Status,
    SupportedFilters, SupportedFiltersGenres, VolumeId,
};
use crate::pagination::{collect_pages, has_next_page, search_offset, FeedPage};
use crate::sources::{site_url, translate_axis, Source};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use codec::MangaDexCodecs;
use schema::{
    AtHomeResponse, ChapterListResponse, Manga, MangaListResponse, MangaResponse, Relationship,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const API_URL: &str = "https://api.mangadex.org";
pub const SITE_URL: &str = "https://mangadex.org";
const COVER_URL: &str = "https://uploads.mangadex.org/covers";
const NO_IMAGE_URL: &str = "https://i.imgur.com/6TrIues.jpeg";

const SEARCH_LIMIT: u32 = 20;
const FEED_LIMIT: u32 = 500;
const CONTENT_RATINGS: &[&str] = &["safe", "suggestive", "erotica"];

const LOG_TARGET: &str = "dokusho_sources::mangadex";

pub struct MangaDex {
    information: SourceInformation,
    api_information: SourceApiInformation,
    codecs: MangaDexCodecs,
    http: SourceHttpClient,
    api_url: Url,
    feed_page_delay: Duration,
    detail_deadline: Duration,
}

impl MangaDex {
    pub fn new(http: SourceHttpClient, config: &SourcesConfig) -> Result<Self> {
        Self::with_api_url(http, config, API_URL)
    }

    /// Same provider talking to another API host, e.g. a mirror or a local proxy.
    pub fn with_api_url(
        http: SourceHttpClient,
        config: &SourcesConfig,
        api_url: &str,
    ) -> Result<Self> {
        let codecs = MangaDexCodecs::new()?;
        let api_url = Url::parse(api_url).map_err(|source| SourceError::ParsingUrl {
            url: api_url.to_string(),
            source,
        })?;

        let information = SourceInformation {
            id: SourceId::from("mangadex"),
            name: "MangaDex".to_string(),
            url: SITE_URL.to_string(),
            icon: format!("{}/favicon.ico", SITE_URL),
            languages: vec![Language::En, Language::Fr, Language::Jp, Language::Ko, Language::Zh, Language::ZhHk],
            updated_at: Utc.with_ymd_and_hms(2025, 1, 7, 18, 0, 0).single().unwrap_or_default(),
            version: "1.0.0".to_string(),
            minimum_update_interval: 5 * 60,
            nsfw: false,
            search_filters: SupportedFilters {
                query: true,
                orders: codecs.order.supported(),
                sorts: codecs.sort.supported(),
                artists: false,
                authors: false,
                types: Vec::new(),
                genres: SupportedFiltersGenres {
                    included: true,
                    excluded: true,
                    possible_values: codecs.genre.supported(),
                },
                status: codecs.status.supported(),
            },
        };

        let api_information = SourceApiInformation {
            api_url: api_url.as_str().trim_end_matches('/').to_string(),
            headers: http.default_headers(),
            timeout: config.timeout_secs,
            can_block_scraping: true,
        };

        Ok(Self {
            information,
            api_information,
            codecs,
            http,
            api_url,
            feed_page_delay: config.feed_page_delay(),
            detail_deadline: config.detail_deadline(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::BuildingRequest {
                url: self.api_url.to_string(),
                reason: "api url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /manga` url for a search page.
    pub fn build_search_url(&self, page: u32, filter: &FetchSearchSerieFilter) -> Result<Url> {
        let id = self.information.id.as_str();
        let mut url = self.endpoint(&["manga"])?;

        let sort_order = match (filter.sort, filter.order) {
            (Some(sort), Some(order)) => Some((
                self.codecs.sort.to_native(sort).map_err(SourceError::invalid_search(SearchParam::Sort))?,
                self.codecs.order.to_native(order).map_err(SourceError::invalid_search(SearchParam::Order))?,
            )),
            (None, None) => None,
            _ => {
                log::debug!(target: LOG_TARGET, "Ignoring sort/order, both are required");
                None
            }
        };
        let included = translate_axis(id, Some(&self.codecs.genre), &filter.genres.include, SearchParam::Genres)?;
        let excluded = translate_axis(id, Some(&self.codecs.genre), &filter.genres.exclude, SearchParam::Genres)?;
        let status = translate_axis(id, Some(&self.codecs.status), &filter.status, SearchParam::Status)?;
        translate_axis::<SerieType>(id, None, &filter.types, SearchParam::Types)?;
        if !filter.artists.is_empty() || !filter.authors.is_empty() {
            log::debug!(target: LOG_TARGET, "Ignoring artist/author filters");
        }

        {
            let mut q = url.query_pairs_mut();
            q.append_pair("limit", &SEARCH_LIMIT.to_string());
            q.append_pair("offset", &search_offset(page, SEARCH_LIMIT).to_string());
            q.append_pair("includedTagsMode", "AND");
            q.append_pair("excludedTagsMode", "OR");
            for rating in CONTENT_RATINGS {
                q.append_pair("contentRating[]", rating);
            }
            for language in &self.information.languages {
                if let Ok(native) = self.codecs.language.to_native(*language) {
                    q.append_pair("availableTranslatedLanguage[]", native);
                }
            }
            q.append_pair("includes[]", "cover_art");
            if !filter.query.is_empty() {
                q.append_pair("title", &filter.query);
            }
            if let Some((sort, order)) = sort_order {
                q.append_pair(&format!("order[{}]", sort), order);
            }
            for tag in included {
                q.append_pair("includedTags[]", tag);
            }
            for tag in excluded {
                q.append_pair("excludedTags[]", tag);
            }
            for s in status {
                q.append_pair("status[]", s);
            }
        }

        Ok(url)
    }

    fn serie_detail_url(&self, serie_id: &SerieId) -> Result<Url> {
        let mut url = self.endpoint(&["manga", serie_id.as_str()])?;
        url.query_pairs_mut()
            .append_pair("includes[]", "author")
            .append_pair("includes[]", "artist")
            .append_pair("includes[]", "cover_art");
        Ok(url)
    }

    fn feed_url(&self, serie_id: &SerieId, languages: &[&'static str], offset: u32) -> Result<Url> {
        let mut url = self.endpoint(&["manga", serie_id.as_str(), "feed"])?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("order[volume]", "desc");
            q.append_pair("order[chapter]", "desc");
            q.append_pair("limit", &FEED_LIMIT.to_string());
            q.append_pair("offset", &offset.to_string());
            for language in languages {
                q.append_pair("translatedLanguage[]", language);
            }
        }
        Ok(url)
    }

    fn chapter_data_url(&self, chapter_id: &ChapterId) -> Result<Url> {
        let mut url = self.endpoint(&["at-home", "server", chapter_id.as_str()])?;
        url.query_pairs_mut().append_pair("forcePort443", "false");
        Ok(url)
    }

    pub fn parse_search(&self, body: &str) -> Result<PaginatedSmallSerie> {
        let response: MangaListResponse = decode_json(body, "mangadex search")?;
        ensure_ok(&response.result, "mangadex search")?;

        let mut series = Vec::with_capacity(response.data.len());
        for (index, manga) in response.data.iter().enumerate() {
            if manga.id.is_empty() {
                return Err(SourceError::InvalidSerieId {
                    url: self.api_url.to_string(),
                    index,
                });
            }
            series.push(SourceSmallSerie {
                id: SerieId::from(manga.id.as_str()),
                title: MultiLanguageString::from(&manga.attributes.title),
                cover: cover_url(&manga.id, &manga.relationships),
            });
        }

        Ok(PaginatedSmallSerie {
            has_next_page: has_next_page(response.offset, response.limit, response.total),
            series,
        })
    }

    /// Parses the serie metadata and returns it with the native codes of the
    /// languages its chapters should be fetched in. Volumes are left empty.
    pub fn parse_serie_detail(&self, body: &str) -> Result<(SourceSerie, Vec<&'static str>)> {
        let response: MangaResponse = decode_json(body, "mangadex serie detail")?;
        ensure_ok(&response.result, "mangadex serie detail")?;
        let manga = response.data.ok_or_else(|| SourceError::ExtractingData {
            url: self.api_url.to_string(),
            what: "serie data".to_string(),
        })?;

        let attributes = &manga.attributes;
        let languages: Vec<&'static str> = attributes
            .available_translated_languages
            .iter()
            .flatten()
            .filter_map(|code| self.codecs.language.to_canonical(code).ok())
            .filter_map(|language| self.codecs.language.to_native(language).ok())
            .collect();

        let mut status = Vec::with_capacity(2);
        if let Some(raw) = attributes.status.as_deref().filter(|s| !s.is_empty()) {
            status.push(self.codecs.status.to_canonical(raw).unwrap_or_else(|e| {
                log::warn!(target: LOG_TARGET, "Failed to convert status: {}", e);
                Status::Unknown
            }));
        }
        if let Some(raw) = attributes.state.as_deref().filter(|s| !s.is_empty()) {
            status.push(self.codecs.state.to_canonical(raw).unwrap_or_else(|e| {
                log::warn!(target: LOG_TARGET, "Failed to convert state: {}", e);
                Status::Unknown
            }));
        }

        let genres = self.genres(&manga);
        let serie = SourceSerie {
            id: SerieId::from(manga.id.as_str()),
            title: MultiLanguageString::from(&attributes.title),
            alternative_titles: attributes
                .alt_titles
                .iter()
                .map(MultiLanguageString::from)
                .filter(|t| !t.is_empty())
                .collect(),
            cover: cover_url(&manga.id, &manga.relationships),
            synopsis: MultiLanguageString::from(&attributes.description),
            serie_type: serie_type(&attributes.original_language, &genres),
            genres,
            status,
            authors: relationship_names(&manga.relationships, "author"),
            artists: relationship_names(&manga.relationships, "artist"),
            volumes: Vec::new(),
        };

        Ok((serie, languages))
    }

    /// One page of `GET /manga/{id}/feed`, as raw chapters waiting for their volume.
    pub fn parse_feed_page(&self, body: &str) -> Result<FeedPage<RawChapter>> {
        let response: ChapterListResponse = decode_json(body, "mangadex chapter feed")?;
        ensure_ok(&response.result, "mangadex chapter feed")?;

        let mut items = Vec::with_capacity(response.data.len());
        for entry in response.data {
            let attributes = entry.attributes;

            let language = match self.codecs.language.to_canonical(&attributes.translated_language) {
                Ok(language) => language,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Skipping chapter {}: {}", entry.id, e);
                    continue;
                }
            };

            let raw_number = attributes.chapter.unwrap_or_default();
            let chapter_number = parse_number(&raw_number).unwrap_or_else(|| {
                log::warn!(target: LOG_TARGET, "Failed to parse chapter number {:?} of {}", raw_number, entry.id);
                0.0
            });

            let name = match attributes.title.filter(|t| !t.trim().is_empty()) {
                Some(title) => title,
                None if !raw_number.is_empty() => format!("Chapter {}", raw_number),
                None => String::new(),
            };

            let date_upload = attributes.created_at.as_deref().and_then(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|d| d.with_timezone(&Utc))
                    .map_err(|e| log::warn!(target: LOG_TARGET, "Failed to parse date {:?}: {}", raw, e))
                    .ok()
            });

            items.push(RawChapter::new(
                attributes.volume.unwrap_or_default(),
                SourceSerieVolumeChapter {
                    id: ChapterId::from(entry.id),
                    name,
                    chapter_number,
                    language,
                    date_upload,
                    external_url: attributes.external_url.filter(|u| !u.is_empty()),
                },
            ));
        }

        Ok(FeedPage {
            items,
            total: response.total,
        })
    }

    pub fn parse_chapter_data(&self, body: &str) -> Result<SourceSerieVolumeChapterData> {
        let response: AtHomeResponse = decode_json(body, "mangadex chapter data")?;
        ensure_ok(&response.result, "mangadex chapter data")?;

        let base = Url::parse(&response.base_url).map_err(|source| SourceError::ParsingUrl {
            url: response.base_url.clone(),
            source,
        })?;
        let base = base.as_str().trim_end_matches('/');
        let hash = &response.chapter.hash;

        let images = response
            .chapter
            .data
            .iter()
            .enumerate()
            .map(|(i, file)| ChapterImage {
                index: i + 1,
                url: format!("{}/data/{}/{}", base, hash, file),
            })
            .collect();

        Ok(SourceSerieVolumeChapterData::Image { images })
    }

    fn genres(&self, manga: &Manga) -> Vec<Genre> {
        manga
            .attributes
            .tags
            .iter()
            .filter_map(|tag| match self.codecs.genre.to_canonical(&tag.id) {
                Ok(genre) => Some(genre),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Skipping tag: {}", e);
                    None
                }
            })
            .collect()
    }

    async fn fetch_chapters(
        &self,
        serie_id: &SerieId,
        languages: &[&'static str],
        cancel: &CancellationToken,
    ) -> Result<Vec<RawChapter>> {
        collect_pages(FEED_LIMIT, self.feed_page_delay, cancel, move |offset| async move {
            let url = self.feed_url(serie_id, languages, offset)?;
            log::info!(target: LOG_TARGET, "Fetching serie volumes: {}", url);

            let response = self.http.send(&url, cancel).await?;
            if !response.status().is_success() {
                log::warn!(target: LOG_TARGET, "Feed page {} answered {}, stopping", url, response.status());
                return Ok(None);
            }
            let body = read_text(&url, response, cancel).await?;
            self.parse_feed_page(&body).map(Some)
        })
        .await
    }

    async fn fetch_serie_detail_inner(
        &self,
        serie_id: &SerieId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerie> {
        let url = self.serie_detail_url(serie_id)?;
        log::info!(target: LOG_TARGET, "Fetching serie detail: {}", url);

        let body = self.http.get_text(&url, cancel).await?;
        let (mut serie, languages) = self.parse_serie_detail(&body)?;

        let chapters = self.fetch_chapters(serie_id, &languages, cancel).await?;
        log::debug!(target: LOG_TARGET, "Fetched {} chapters for {}", chapters.len(), serie_id);
        serie.volumes = aggregate_volumes(chapters);

        Ok(serie)
    }
}

#[async_trait]
impl Source for MangaDex {
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
        cancel: &CancellationToken,
    ) -> Result<PaginatedSmallSerie> {
        let url = self.build_search_url(page, filter)?;
        log::info!(target: LOG_TARGET, "Fetching search serie: {}", url);

        let body = self.http.get_text(&url, cancel).await?;
        self.parse_search(&body)
    }

    async fn fetch_serie_detail(
        &self,
        serie_id: &SerieId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerie> {
        match tokio::time::timeout(self.detail_deadline, self.fetch_serie_detail_inner(serie_id, cancel)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                stage: format!("mangadex serie detail {}", serie_id),
                secs: self.detail_deadline.as_secs(),
            }),
        }
    }

    async fn fetch_chapter_data(
        &self,
        _serie_id: &SerieId,
        _volume_id: &VolumeId,
        chapter_id: &ChapterId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerieVolumeChapterData> {
        let url = self.chapter_data_url(chapter_id)?;
        log::info!(target: LOG_TARGET, "Fetching chapter data: {}", url);

        let body = self.http.get_text(&url, cancel).await?;
        self.parse_chapter_data(&body)
    }

    fn serie_url(&self, serie_id: &SerieId) -> Result<Url> {
        site_url(SITE_URL, "title", serie_id)
    }
}

fn ensure_ok(result: &str, stage: &str) -> Result<()> {
    if result == "ok" {
        Ok(())
    } else {
        Err(SourceError::ResponseNotOk {
            stage: stage.to_string(),
            result: result.to_string(),
        })
    }
}

fn cover_url(serie_id: &str, relationships: &[Relationship]) -> String {
    if serie_id.is_empty() {
        return NO_IMAGE_URL.to_string();
    }

    relationships
        .iter()
        .filter(|r| r.kind == "cover_art")
        .filter_map(|r| r.attributes.as_ref()?.file_name.as_deref())
        .find(|file| !file.is_empty())
        .map(|file| format!("{}/{}/{}", COVER_URL, serie_id, file))
        .unwrap_or_else(|| NO_IMAGE_URL.to_string())
}

fn relationship_names(relationships: &[Relationship], kind: &str) -> Vec<String> {
    relationships
        .iter()
        .filter(|r| r.kind == kind)
        .filter_map(|r| r.attributes.as_ref()?.name.clone())
        .filter(|name| !name.is_empty())
        .collect()
}

/// MangaDex has no type field; derive it from the original language and tags.
fn serie_type(original_language: &str, genres: &[Genre]) -> SerieType {
    let long_strip = genres.contains(&Genre::LongStrip);
    let web_comic = genres.contains(&Genre::WebComic);
    let doujinshi = genres.contains(&Genre::Doujinshi);

    match original_language {
        "ja" => SerieType::Manga,
        "zh" | "zh-hk" => SerieType::Manhua,
        "en" if web_comic => SerieType::Comic,
        "ko" if long_strip || web_comic => SerieType::Webtoon,
        "ko" => SerieType::Manhwa,
        _ if doujinshi => SerieType::Doujinshi,
        _ => SerieType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, Sort};

    fn source() -> MangaDex {
        MangaDex::new(SourceHttpClient::new().unwrap(), &SourcesConfig::default()).unwrap()
    }

    fn query_values(url: &Url, key: &str) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    const SEARCH_JSON: &str = r#"{
        "result": "ok",
        "response": "collection",
        "data": [
            {
                "id": "a1c7c817-4e59-43b7-9365-09675a149a6f",
                "type": "manga",
                "attributes": {
                    "title": {"en": "One Piece"},
                    "altTitles": [{"ja": "ワンピース"}],
                    "description": {"en": "Pirates."},
                    "originalLanguage": "ja",
                    "status": "ongoing",
                    "state": "published",
                    "tags": []
                },
                "relationships": [
                    {"id": "c1", "type": "cover_art", "attributes": {"fileName": "cover.jpg"}}
                ]
            },
            {
                "id": "b2",
                "type": "manga",
                "attributes": {"title": {"ja-ro": "Sono Bisque"}},
                "relationships": []
            }
        ],
        "limit": 20,
        "offset": 0,
        "total": 45
    }"#;

    const DETAIL_JSON: &str = r#"{
        "result": "ok",
        "response": "entity",
        "data": {
            "id": "32d76d19-8a05-4db0-9fc2-e0b0648fe9d0",
            "type": "manga",
            "attributes": {
                "title": {"en": "Solo Leveling"},
                "altTitles": [{"ko": "나 혼자만 레벨업"}, {"de": "Nur ich"}],
                "description": [],
                "originalLanguage": "ko",
                "status": "completed",
                "state": "published",
                "tags": [
                    {"id": "391b0423-d847-456f-aff0-8b0cfc03066b", "type": "tag"},
                    {"id": "3e2b8dae-350e-4ab8-a8ce-016e844b9f0d", "type": "tag"},
                    {"id": "00000000-0000-0000-0000-000000000000", "type": "tag"}
                ],
                "availableTranslatedLanguages": ["en", "pt-br", "fr", null]
            },
            "relationships": [
                {"id": "au", "type": "author", "attributes": {"name": "Chugong"}},
                {"id": "ar", "type": "artist", "attributes": {"name": "DUBU"}},
                {"id": "cv", "type": "cover_art", "attributes": {"fileName": "sl.png"}}
            ]
        }
    }"#;

    const FEED_JSON: &str = r#"{
        "result": "ok",
        "response": "collection",
        "data": [
            {"id": "c3", "type": "chapter", "attributes": {"volume": "1", "chapter": "3", "title": "", "translatedLanguage": "en", "createdAt": "2021-05-23T15:34:21+00:00"}},
            {"id": "c1", "type": "chapter", "attributes": {"volume": "1", "chapter": "1", "title": "Start", "translatedLanguage": "en", "createdAt": "not a date"}},
            {"id": "c9", "type": "chapter", "attributes": {"volume": null, "chapter": "9.5", "translatedLanguage": "fr", "externalUrl": "https://example.com/9"}},
            {"id": "cx", "type": "chapter", "attributes": {"volume": "1", "chapter": "2", "translatedLanguage": "pt-br"}}
        ],
        "limit": 500,
        "offset": 0,
        "total": 4
    }"#;

    const AT_HOME_JSON: &str = r#"{
        "result": "ok",
        "baseUrl": "https://uploads.mangadex.org",
        "chapter": {"hash": "abc123", "data": ["1.png", "2.png"], "dataSaver": ["1.jpg", "2.jpg"]}
    }"#;

    #[test]
    fn test_parse_search() {
        let page = source().parse_search(SEARCH_JSON).unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.series.len(), 2);
        assert_eq!(page.series[0].title.en, "One Piece");
        assert_eq!(
            page.series[0].cover,
            "https://uploads.mangadex.org/covers/a1c7c817-4e59-43b7-9365-09675a149a6f/cover.jpg"
        );
        assert_eq!(page.series[1].cover, NO_IMAGE_URL);
        assert_eq!(page.series[1].title.jp_ro, "Sono Bisque");
    }

    #[test]
    fn test_parse_search_last_page() {
        let body = SEARCH_JSON.replace("\"offset\": 0", "\"offset\": 40");
        assert!(!source().parse_search(&body).unwrap().has_next_page);
    }

    #[test]
    fn test_parse_search_with_out_of_range_offset() {
        let body = r#"{"result":"ok","data":[],"limit":20,"offset":18446744073709551615,"total":45}"#;
        let page = source().parse_search(body).unwrap();
        assert!(!page.has_next_page);
        assert!(page.series.is_empty());
    }

    #[test]
    fn test_parse_search_rejects_error_envelope() {
        let err = source().parse_search(r#"{"result": "error", "errors": []}"#).unwrap_err();
        match &err {
            SourceError::ResponseNotOk { stage, result } => {
                assert_eq!(stage, "mangadex search");
                assert_eq!(result, "error");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = source().parse_search("<html>").unwrap_err();
        assert!(matches!(err, SourceError::ParsingJson { .. }));
    }

    #[test]
    fn test_parse_serie_detail() {
        let (serie, languages) = source().parse_serie_detail(DETAIL_JSON).unwrap();

        assert_eq!(serie.title.en, "Solo Leveling");
        assert_eq!(serie.alternative_titles.len(), 1);
        assert!(serie.synopsis.is_empty());
        assert_eq!(serie.serie_type, SerieType::Webtoon);
        assert_eq!(serie.genres, vec![Genre::Action, Genre::LongStrip]);
        assert_eq!(serie.status, vec![Status::Completed, Status::Published]);
        assert_eq!(serie.authors, vec!["Chugong".to_string()]);
        assert_eq!(serie.artists, vec!["DUBU".to_string()]);
        assert!(serie.cover.ends_with("/32d76d19-8a05-4db0-9fc2-e0b0648fe9d0/sl.png"));
        assert_eq!(languages, vec!["en", "fr"]);
    }

    #[test]
    fn test_unknown_status_degrades() {
        let body = DETAIL_JSON.replace("\"completed\"", "\"abandoned\"");
        let (serie, _) = source().parse_serie_detail(&body).unwrap();
        assert_eq!(serie.status, vec![Status::Unknown, Status::Published]);
    }

    #[test]
    fn test_parse_feed_page_and_aggregate() {
        let page = source().parse_feed_page(FEED_JSON).unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 3);

        let first = &page.items[0].chapter;
        assert_eq!(first.name, "Chapter 3");
        assert_eq!(first.date_upload.unwrap().to_rfc3339(), "2021-05-23T15:34:21+00:00");
        assert!(page.items[1].chapter.date_upload.is_none());
        assert_eq!(page.items[2].chapter.language, Language::Fr);
        assert_eq!(page.items[2].chapter.external_url.as_deref(), Some("https://example.com/9"));

        let volumes = aggregate_volumes(page.items);
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].id.as_str(), "volume-1");
        assert_eq!(volumes[0].chapters.len(), 3);
        assert_eq!(volumes[0].missing_chapters, vec![2.0]);
    }

    #[test]
    fn test_parse_chapter_data() {
        let data = source().parse_chapter_data(AT_HOME_JSON).unwrap();
        let images = data.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].index, 1);
        assert_eq!(images[1].url, "https://uploads.mangadex.org/data/abc123/2.png");
    }

    #[test]
    fn test_build_search_url() {
        let mut filter = FetchSearchSerieFilter::sorted(Sort::Popularity, Order::Desc);
        filter.query = "one piece".to_string();
        filter.genres.include = vec![Genre::Action];
        filter.status = vec![Status::Canceled];
        filter.types = vec![SerieType::Manga];

        let url = source().build_search_url(2, &filter).unwrap();
        assert_eq!(url.path(), "/manga");
        assert_eq!(query_values(&url, "offset"), vec!["20"]);
        assert_eq!(query_values(&url, "title"), vec!["one piece"]);
        assert_eq!(query_values(&url, "order[followedCount]"), vec!["desc"]);
        assert_eq!(query_values(&url, "includedTags[]"), vec!["391b0423-d847-456f-aff0-8b0cfc03066b"]);
        assert_eq!(query_values(&url, "status[]"), vec!["cancelled"]);
        assert_eq!(query_values(&url, "contentRating[]").len(), 3);
        assert_eq!(query_values(&url, "availableTranslatedLanguage[]").len(), 6);
    }

    #[test]
    fn test_build_search_url_rejects_untranslatable_values() {
        let mut filter = FetchSearchSerieFilter::default();
        filter.genres.exclude = vec![Genre::Unknown];
        let err = source().build_search_url(1, &filter).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSearch { param: SearchParam::Genres, .. }));

        let mut filter = FetchSearchSerieFilter::default();
        filter.status = vec![Status::Published];
        let err = source().build_search_url(1, &filter).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSearch { param: SearchParam::Status, .. }));
    }

    #[test]
    fn test_serie_type_heuristic() {
        assert_eq!(serie_type("ja", &[Genre::LongStrip]), SerieType::Manga);
        assert_eq!(serie_type("zh-hk", &[]), SerieType::Manhua);
        assert_eq!(serie_type("en", &[Genre::WebComic]), SerieType::Comic);
        assert_eq!(serie_type("ko", &[]), SerieType::Manhwa);
        assert_eq!(serie_type("fr", &[Genre::Doujinshi]), SerieType::Doujinshi);
        assert_eq!(serie_type("fr", &[]), SerieType::Unknown);
    }

    #[test]
    fn test_serie_url() {
        let url = source().serie_url(&SerieId::from("abc")).unwrap();
        assert_eq!(url.as_str(), "https://mangadex.org/title/abc");
    }

    #[test]
    fn test_supported_filters_round_trip() {
        let mangadex = source();
        let filters = &mangadex.information().search_filters;
        for genre in &filters.genres.possible_values {
            let native = mangadex.codecs.genre.to_native(*genre).unwrap();
            assert_eq!(mangadex.codecs.genre.to_canonical(native).unwrap(), *genre);
        }
        for status in &filters.status {
            let native = mangadex.codecs.status.to_native(*status).unwrap();
            assert_eq!(mangadex.codecs.status.to_canonical(native).unwrap(), *status);
        }
        for sort in &filters.sorts {
            let native = mangadex.codecs.sort.to_native(*sort).unwrap();
            assert_eq!(mangadex.codecs.sort.to_canonical(native).unwrap(), *sort);
        }
        for order in &filters.orders {
            let native = mangadex.codecs.order.to_native(*order).unwrap();
            assert_eq!(mangadex.codecs.order.to_canonical(native).unwrap(), *order);
        }
        for language in &mangadex.information().languages {
            let native = mangadex.codecs.language.to_native(*language).unwrap();
            assert_eq!(mangadex.codecs.language.to_canonical(native).unwrap(), *language);
        }
    }
}
