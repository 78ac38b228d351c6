//! WeebCentral, scraped from its server-rendered HTML.

pub mod codec;

use crate::chapters::{aggregate_volumes, RawChapter};
use crate::config::SourcesConfig;
use crate::error::{Result, SearchParam, SourceError};
use crate::helpers::{
    clean_text, extract_chapter_number, last_segment, second_to_last_segment, truncate_3,
};
use crate::http_client::SourceHttpClient;
use crate::models::{
    ChapterId, ChapterImage, FetchSearchSerieFilter, Language, MultiLanguageString,
    PaginatedSmallSerie, SerieId, SerieType, SourceApiInformation, SourceId, SourceInformation,
    SourceSerie, SourceSerieVolumeChapter, SourceSerieVolumeChapterData, SourceSmallSerie, Status,
    SupportedFilters, SupportedFiltersGenres, VolumeId,
};
use crate::pagination::search_offset;
use crate::sources::{site_url, translate_axis, Source};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use codec::WeebCentralCodecs;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const BASE_URL: &str = "https://weebcentral.com";
const SEARCH_LIMIT: u32 = 24;
const NEXT_PAGE_LABEL: &str = "View More Results...";
const UNKNOWN_TITLE: &str = "Unknown Title";

const LOG_TARGET: &str = "dokusho_sources::weebcentral";

struct Selectors {
    article: Selector,
    section: Selector,
    cover_source: Selector,
    div: Selector,
    link: Selector,
    next_page: Selector,
    main: Selector,
    heading: Selector,
    item: Selector,
    label: Selector,
    image: Selector,
    chapter: Selector,
    chapter_name: Selector,
    time: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            article: Selector::parse("body > article").unwrap(),
            section: Selector::parse("section").unwrap(),
            cover_source: Selector::parse("picture > source[srcset]").unwrap(),
            div: Selector::parse("div").unwrap(),
            link: Selector::parse("a").unwrap(),
            next_page: Selector::parse("button > span").unwrap(),
            main: Selector::parse("body > main").unwrap(),
            heading: Selector::parse("h1").unwrap(),
            item: Selector::parse("li").unwrap(),
            label: Selector::parse("strong").unwrap(),
            image: Selector::parse("img[src]").unwrap(),
            chapter: Selector::parse(r#"a.flex[href*="/chapters/"]"#).unwrap(),
            chapter_name: Selector::parse("span.flex > span").unwrap(),
            time: Selector::parse("time[datetime]").unwrap(),
        }
    }
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

pub struct WeebCentral {
    information: SourceInformation,
    api_information: SourceApiInformation,
    codecs: WeebCentralCodecs,
    http: SourceHttpClient,
    base_url: Url,
}

impl WeebCentral {
    pub fn new(http: SourceHttpClient, config: &SourcesConfig) -> Result<Self> {
        let codecs = WeebCentralCodecs::new()?;
        let base_url = Url::parse(BASE_URL).map_err(|source| SourceError::ParsingUrl {
            url: BASE_URL.to_string(),
            source,
        })?;

        let information = SourceInformation {
            id: SourceId::from("weebcentral"),
            name: "WeebCentral".to_string(),
            url: BASE_URL.to_string(),
            icon: format!("{}/favicon.ico", BASE_URL),
            languages: vec![Language::En],
            updated_at: Utc.with_ymd_and_hms(2024, 12, 26, 14, 22, 0).single().unwrap_or_default(),
            version: "1.0.0".to_string(),
            minimum_update_interval: 5 * 60,
            nsfw: false,
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
            api_url: BASE_URL.to_string(),
            headers: http.default_headers(),
            timeout: config.timeout_secs,
            can_block_scraping: true,
        };

        Ok(Self {
            information,
            api_information,
            codecs,
            http,
            base_url,
        })
    }

    fn page_url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|source| SourceError::ParsingUrl {
            url: path.to_string(),
            source,
        })
    }

    /// `GET /search/data` url for a search page.
    pub fn build_search_url(&self, page: u32, filter: &FetchSearchSerieFilter) -> Result<Url> {
        let id = self.information.id.as_str();
        let sort = filter
            .sort
            .map(|s| self.codecs.sort.to_native(s))
            .transpose()
            .map_err(SourceError::invalid_search(SearchParam::Sort))?;
        let order = filter
            .order
            .map(|o| self.codecs.order.to_native(o))
            .transpose()
            .map_err(SourceError::invalid_search(SearchParam::Order))?;
        let types = translate_axis(id, Some(&self.codecs.serie_type), &filter.types, SearchParam::Types)?;
        let status = translate_axis(id, Some(&self.codecs.status), &filter.status, SearchParam::Status)?;
        let included = translate_axis(id, Some(&self.codecs.genre), &filter.genres.include, SearchParam::Genres)?;
        let excluded = translate_axis(id, Some(&self.codecs.genre), &filter.genres.exclude, SearchParam::Genres)?;

        let mut url = self.page_url("/search/data")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("limit", &SEARCH_LIMIT.to_string());
            let offset = search_offset(page, SEARCH_LIMIT);
            if offset > 0 {
                q.append_pair("offset", &offset.to_string());
            }
            q.append_pair("official", "Any");
            q.append_pair("display_mode", "Full Display");
            if !filter.query.is_empty() {
                q.append_pair("text", &filter.query);
            }
            if let Some(sort) = sort {
                q.append_pair("sort", sort);
            }
            if let Some(order) = order {
                q.append_pair("order", order);
            }
            for t in types {
                q.append_pair("included_type", t);
            }
            for s in status {
                q.append_pair("included_status", s);
            }
            for g in included {
                q.append_pair("included_tag", g);
            }
            for g in excluded {
                q.append_pair("excluded_tag", g);
            }
            for name in filter.artists.iter().chain(&filter.authors) {
                q.append_pair("author", name);
            }
        }

        Ok(url)
    }

    pub fn parse_search(&self, html: &str) -> Result<PaginatedSmallSerie> {
        let doc = Html::parse_document(html);
        let s = &*SELECTORS;

        let mut series = Vec::new();
        for (index, article) in doc.select(&s.article).enumerate() {
            let sections: Vec<ElementRef> = article.select(&s.section).collect();
            let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
                return Err(SourceError::InvalidSerieId {
                    url: format!("{}/search/data", BASE_URL),
                    index,
                });
            };

            let cover = first
                .select(&s.cover_source)
                .next()
                .and_then(|e| e.value().attr("srcset"))
                .and_then(|srcset| srcset.split(',').next())
                .and_then(|candidate| candidate.split_whitespace().next())
                .unwrap_or_default()
                .to_string();

            let mut title = last
                .select(&s.div)
                .next()
                .and_then(|div| div.select(&s.link).next())
                .map(text_of)
                .unwrap_or_default();
            if title.is_empty() {
                log::warn!(target: LOG_TARGET, "Empty title in search row {}", index);
                title = UNKNOWN_TITLE.to_string();
            }

            let id = first
                .select(&s.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| self.base_url.join(href).ok())
                .and_then(|url| second_to_last_segment(url.path()).map(str::to_string))
                .unwrap_or_default();

            if id.is_empty() {
                return Err(SourceError::InvalidSerieId {
                    url: format!("{}/search/data", BASE_URL),
                    index,
                });
            }
            if cover.is_empty() {
                return Err(SourceError::InvalidCover {
                    url: format!("{}/search/data", BASE_URL),
                    index,
                });
            }

            series.push(SourceSmallSerie {
                id: SerieId::from(id),
                title: MultiLanguageString::english(title),
                cover,
            });
        }
        log::debug!(target: LOG_TARGET, "Found {} series in search html", series.len());

        let has_next_page = doc
            .select(&s.next_page)
            .next()
            .map(|span| text_of(span) == NEXT_PAGE_LABEL)
            .unwrap_or(false);

        Ok(PaginatedSmallSerie { has_next_page, series })
    }

    /// Builds the serie from its page and its full chapter list fragment.
    pub fn parse_serie_detail(
        &self,
        serie_id: &SerieId,
        serie_html: &str,
        chapters_html: &str,
    ) -> Result<SourceSerie> {
        let chapters = self.parse_chapter_list(chapters_html);
        log::debug!(target: LOG_TARGET, "Found {} chapters for {}", chapters.len(), serie_id);

        let doc = Html::parse_document(serie_html);
        let s = &*SELECTORS;
        let main = doc.select(&s.main).next().ok_or_else(|| SourceError::ParsingHtml {
            url: format!("{}/series/{}", BASE_URL, serie_id),
            reason: "no main content".to_string(),
        })?;

        let title = main.select(&s.heading).next().map(text_of).unwrap_or_default();
        if title.is_empty() {
            log::warn!(target: LOG_TARGET, "Empty title for {}", serie_id);
        }

        let synopsis = labelled_item(main, "Description")
            .and_then(|li| child_elements(li, "p").next())
            .map(text_of)
            .unwrap_or_default();

        let raw_type = labelled_item(main, "Type")
            .and_then(|li| child_elements(li, "a").next())
            .map(text_of)
            .unwrap_or_default();
        let serie_type = self.codecs.serie_type.to_canonical(&raw_type).unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "Failed to parse type: {}", e);
            SerieType::Unknown
        });

        let raw_status = labelled_item(main, "Status")
            .and_then(|li| child_elements(li, "a").next())
            .map(text_of)
            .unwrap_or_default();
        let status = self.codecs.status.to_canonical(&raw_status).unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "Failed to parse status: {}", e);
            Status::Unknown
        });

        let genres = labelled_links(main, "Tags")
            .into_iter()
            .filter_map(|raw| match self.codecs.genre.to_canonical(&raw) {
                Ok(genre) => Some(genre),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Failed to parse genre: {}", e);
                    None
                }
            })
            .collect();

        let cover = main
            .select(&s.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if cover.is_empty() {
            log::warn!(target: LOG_TARGET, "Empty cover for {}", serie_id);
        }

        Ok(SourceSerie {
            id: serie_id.clone(),
            title: MultiLanguageString::english(title),
            alternative_titles: Vec::new(),
            cover,
            synopsis: MultiLanguageString::english(synopsis),
            serie_type,
            genres,
            status: vec![status],
            authors: labelled_links(main, "Author"),
            artists: Vec::new(),
            volumes: aggregate_volumes(chapters),
        })
    }

    fn parse_chapter_list(&self, html: &str) -> Vec<RawChapter> {
        let doc = Html::parse_document(html);
        let s = &*SELECTORS;

        doc.select(&s.chapter)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                let id = self
                    .base_url
                    .join(href)
                    .ok()
                    .and_then(|url| last_segment(url.path()).map(str::to_string))
                    .filter(|id| !id.is_empty());
                let Some(id) = id else {
                    log::warn!(target: LOG_TARGET, "Skipping chapter link without id: {}", href);
                    return None;
                };

                let name = a.select(&s.chapter_name).next().map(text_of).unwrap_or_default();

                let raw_date = a
                    .select(&s.time)
                    .next()
                    .and_then(|t| t.value().attr("datetime"))
                    .unwrap_or_default();
                let date_upload = match DateTime::parse_from_rfc3339(raw_date) {
                    Ok(date) => Some(date.with_timezone(&Utc)),
                    Err(e) => {
                        log::warn!(target: LOG_TARGET, "Failed to parse date {:?}: {}", raw_date, e);
                        None
                    }
                };

                let chapter_number = match extract_chapter_number(&name) {
                    Some(number) => truncate_3(number),
                    None => {
                        log::warn!(target: LOG_TARGET, "Failed to find chapter number in {:?}", name);
                        0.0
                    }
                };

                Some(RawChapter::new(
                    "",
                    SourceSerieVolumeChapter {
                        id: ChapterId::from(id),
                        name,
                        chapter_number,
                        language: Language::En,
                        date_upload,
                        external_url: None,
                    },
                ))
            })
            .collect()
    }

    pub fn parse_chapter_data(&self, html: &str) -> Result<SourceSerieVolumeChapterData> {
        let doc = Html::parse_document(html);

        let images = doc
            .select(&SELECTORS.image)
            .filter_map(|img| img.value().attr("src").map(str::trim))
            .filter(|src| !src.is_empty())
            .enumerate()
            .map(|(i, src)| ChapterImage {
                index: i + 1,
                url: src.to_string(),
            })
            .collect();

        Ok(SourceSerieVolumeChapterData::Image { images })
    }
}

#[async_trait]
impl Source for WeebCentral {
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
        log::info!(target: LOG_TARGET, "Fetching search url: {}", url);

        let html = self.http.get_text(&url, cancel).await?;
        self.parse_search(&html)
    }

    async fn fetch_serie_detail(
        &self,
        serie_id: &SerieId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerie> {
        let serie_url = self.serie_url(serie_id)?;
        let mut chapters_url = serie_url.clone();
        chapters_url
            .path_segments_mut()
            .map_err(|_| SourceError::BuildingUrl {
                serie_id: serie_id.to_string(),
                reason: "serie url cannot be a base".to_string(),
            })?
            .push("full-chapter-list");

        log::info!(target: LOG_TARGET, "Fetching serie detail: {} and {}", serie_url, chapters_url);

        let serie_html = self.http.get_text(&serie_url, cancel).await?;
        let chapters_html = self.http.get_text(&chapters_url, cancel).await?;

        self.parse_serie_detail(serie_id, &serie_html, &chapters_html)
    }

    async fn fetch_chapter_data(
        &self,
        _serie_id: &SerieId,
        _volume_id: &VolumeId,
        chapter_id: &ChapterId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerieVolumeChapterData> {
        let mut url = self.page_url("/chapters/")?;
        url.path_segments_mut()
            .map_err(|_| SourceError::BuildingRequest {
                url: BASE_URL.to_string(),
                reason: "base url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend([chapter_id.as_str(), "images"]);
        url.query_pairs_mut().append_pair("reading_style", "long_strip");

        log::info!(target: LOG_TARGET, "Fetching chapter data: {}", url);

        let html = self.http.get_text(&url, cancel).await?;
        self.parse_chapter_data(&html)
    }

    fn serie_url(&self, serie_id: &SerieId) -> Result<Url> {
        site_url(BASE_URL, "series", serie_id)
    }
}

fn text_of(el: ElementRef) -> String {
    clean_text(&el.text().collect::<String>())
}

fn child_elements<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

/// The `li` whose `strong` label mentions `label`, e.g. `<strong>Author(s):</strong>`.
fn labelled_item<'a>(main: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    let s = &*SELECTORS;
    main.select(&s.item)
        .find(|li| li.select(&s.label).any(|strong| text_of(strong).contains(label)))
}

/// Texts of the `span > a` links of a labelled item.
fn labelled_links(main: ElementRef, label: &str) -> Vec<String> {
    let Some(li) = labelled_item(main, label) else {
        return Vec::new();
    };
    child_elements(li, "span")
        .flat_map(|span| child_elements(span, "a"))
        .map(text_of)
        .map(|text| text.trim_end_matches(',').trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Order, Sort};

    fn source() -> WeebCentral {
        WeebCentral::new(SourceHttpClient::new().unwrap(), &SourcesConfig::default()).unwrap()
    }

    fn query_values(url: &Url, key: &str) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    const SEARCH_HTML: &str = r#"
        <article>
            <section>
                <a href="https://weebcentral.com/series/01J76XYCERXE60T7FKXVCCAQ0H/One-Piece">
                    <article>
                        <picture>
                            <source srcset="https://temp.compsci88.com/cover/normal/01J76XYCERXE60T7FKXVCCAQ0H.webp" type="image/webp">
                            <img src="https://temp.compsci88.com/cover/fallback/01J76XYCERXE60T7FKXVCCAQ0H.jpg">
                        </picture>
                    </article>
                </a>
            </section>
            <section>
                <div><a href="https://weebcentral.com/series/01J76XYCERXE60T7FKXVCCAQ0H/One-Piece">One Piece</a></div>
            </section>
        </article>
        <article>
            <section>
                <a href="/series/01J76XYDGDQERFSK333582BNBZ/Berserk">
                    <article><picture><source srcset="https://temp.compsci88.com/cover/normal/berserk.webp 1x"></picture></article>
                </a>
            </section>
            <section><div><a href="/series/01J76XYDGDQERFSK333582BNBZ/Berserk">  Berserk
            </a></div></section>
        </article>
        <button><span>View More Results...</span></button>
    "#;

    const SERIE_HTML: &str = r##"
        <html><body><main>
            <section>
                <picture><img src="https://temp.compsci88.com/cover/fallback/01J76XYCERXE60T7FKXVCCAQ0H.jpg" alt="cover"></picture>
                <ul>
                    <li><strong>Author(s): </strong><span><a href="/search?author=Oda">ODA Eiichiro</a></span></li>
                    <li><strong>Tags(s): </strong>
                        <span><a href="#">Action</a>,</span>
                        <span><a href="#">Adventure</a>,</span>
                        <span><a href="#">Pirates</a></span>
                    </li>
                    <li><strong>Type: </strong><a href="#">Manga</a></li>
                    <li><strong>Status: </strong><a href="#">Ongoing</a></li>
                </ul>
            </section>
            <section>
                <h1>One Piece</h1>
                <ul>
                    <li><strong>Description</strong><p>Gol D. Roger was known as the Pirate King.</p></li>
                </ul>
            </section>
        </main></body></html>
    "##;

    const CHAPTERS_HTML: &str = r#"
        <a href="https://weebcentral.com/chapters/01JD3KEK7PHF5M0Y8P0Z1A2B3C" class="hover:bg-base-300 flex-1 flex items-center p-2">
            <span class="flex items-center gap-2"><span>Chapter 4</span></span>
            <time datetime="2024-11-22T03:04:05.000Z">Nov 22</time>
        </a>
        <a href="https://weebcentral.com/chapters/01JD3KEK7PHF5M0Y8P0Z1A2B3B" class="flex items-center p-2">
            <span class="flex items-center gap-2"><span>Chapter 2.5</span></span>
            <time datetime="2024-11-20T03:04:05.000Z">Nov 20</time>
        </a>
        <a href="https://weebcentral.com/chapters/01JD3KEK7PHF5M0Y8P0Z1A2B3A" class="flex items-center p-2">
            <span class="flex items-center gap-2"><span>Chapter 1</span></span>
            <time datetime="yesterday">?</time>
        </a>
        <a href="https://weebcentral.com/series/01J76XYCERXE60T7FKXVCCAQ0H" class="flex">Back</a>
    "#;

    const IMAGES_HTML: &str = r#"
        <section>
            <img src="https://scans.lastation.us/manga/One-Piece/1129-001.png" alt="Page 1">
            <img src="" alt="broken">
            <img src="https://scans.lastation.us/manga/One-Piece/1129-002.png" alt="Page 2">
        </section>
    "#;

    #[test]
    fn test_parse_search() {
        let page = source().parse_search(SEARCH_HTML).unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.series.len(), 2);

        let first = &page.series[0];
        assert_eq!(first.id.as_str(), "01J76XYCERXE60T7FKXVCCAQ0H");
        assert_eq!(first.title.en, "One Piece");
        assert_eq!(
            first.cover,
            "https://temp.compsci88.com/cover/normal/01J76XYCERXE60T7FKXVCCAQ0H.webp"
        );

        let second = &page.series[1];
        assert_eq!(second.id.as_str(), "01J76XYDGDQERFSK333582BNBZ");
        assert_eq!(second.title.en, "Berserk");
        assert_eq!(second.cover, "https://temp.compsci88.com/cover/normal/berserk.webp");
    }

    #[test]
    fn test_parse_search_last_and_empty_page() {
        let html = SEARCH_HTML.replace("View More Results...", "No more results");
        assert!(!source().parse_search(&html).unwrap().has_next_page);

        let page = source().parse_search("<p>No results found</p>").unwrap();
        assert!(page.series.is_empty());
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_parse_search_row_without_cover_fails_page() {
        let html = SEARCH_HTML.replace(
            r#"srcset="https://temp.compsci88.com/cover/normal/berserk.webp 1x""#,
            r#"srcset="""#,
        );
        let err = source().parse_search(&html).unwrap_err();
        assert!(matches!(err, SourceError::InvalidCover { index: 1, .. }));
    }

    #[test]
    fn test_parse_search_row_without_id_fails_page() {
        let html = SEARCH_HTML.replacen(
            "https://weebcentral.com/series/01J76XYCERXE60T7FKXVCCAQ0H/One-Piece",
            "/",
            1,
        );
        let err = source().parse_search(&html).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSerieId { index: 0, .. }));
    }

    #[test]
    fn test_parse_serie_detail() {
        let id = SerieId::from("01J76XYCERXE60T7FKXVCCAQ0H");
        let serie = source().parse_serie_detail(&id, SERIE_HTML, CHAPTERS_HTML).unwrap();

        assert_eq!(serie.title.en, "One Piece");
        assert_eq!(serie.synopsis.en, "Gol D. Roger was known as the Pirate King.");
        assert_eq!(serie.serie_type, SerieType::Manga);
        assert_eq!(serie.status, vec![Status::Ongoing]);
        assert_eq!(serie.genres, vec![Genre::Action, Genre::Adventure]);
        assert_eq!(serie.authors, vec!["ODA Eiichiro".to_string()]);
        assert!(serie.cover.ends_with("01J76XYCERXE60T7FKXVCCAQ0H.jpg"));

        assert_eq!(serie.volumes.len(), 1);
        let volume = &serie.volumes[0];
        assert_eq!(volume.id.as_str(), "volume-1");
        assert_eq!(volume.name, "Volume 1");
        assert_eq!(volume.chapters.len(), 3);
        assert_eq!(volume.missing_chapters, vec![2.0, 3.0]);

        let latest = &volume.chapters[0];
        assert_eq!(latest.id.as_str(), "01JD3KEK7PHF5M0Y8P0Z1A2B3C");
        assert_eq!(latest.name, "Chapter 4");
        assert_eq!(latest.chapter_number, 4.0);
        assert!(latest.date_upload.is_some());
        assert_eq!(volume.chapters[1].chapter_number, 2.5);
        assert!(volume.chapters[2].date_upload.is_none());
    }

    #[test]
    fn test_parse_serie_detail_degrades_unknown_labels() {
        let html = SERIE_HTML
            .replace(r##"<a href="#">Manga</a>"##, r##"<a href="#">Webcomic</a>"##)
            .replace(r##"<a href="#">Ongoing</a>"##, r##"<a href="#">Paused</a>"##);
        let serie = source()
            .parse_serie_detail(&SerieId::from("x"), &html, "")
            .unwrap();
        assert_eq!(serie.serie_type, SerieType::Unknown);
        assert_eq!(serie.status, vec![Status::Unknown]);
        assert!(serie.volumes.is_empty());
    }

    #[test]
    fn test_parse_serie_detail_requires_main() {
        let err = source()
            .parse_serie_detail(&SerieId::from("x"), "<html><body></body></html>", "")
            .unwrap_err();
        assert!(matches!(err, SourceError::ParsingHtml { .. }));
    }

    #[test]
    fn test_parse_chapter_data() {
        let data = source().parse_chapter_data(IMAGES_HTML).unwrap();
        let images = data.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].index, 1);
        assert_eq!(images[1].index, 2);
        assert!(images[1].url.ends_with("1129-002.png"));
    }

    #[test]
    fn test_build_search_url() {
        let mut filter = FetchSearchSerieFilter::sorted(Sort::Latest, Order::Desc);
        filter.query = "berserk".to_string();
        filter.types = vec![SerieType::Manhwa];
        filter.status = vec![Status::Completed];
        filter.genres.include = vec![Genre::SciFi];
        filter.genres.exclude = vec![Genre::Yaoi];
        filter.authors = vec!["Miura".to_string()];

        let url = source().build_search_url(1, &filter).unwrap();
        assert_eq!(url.path(), "/search/data");
        assert!(query_values(&url, "offset").is_empty());
        assert_eq!(query_values(&url, "limit"), vec!["24"]);
        assert_eq!(query_values(&url, "text"), vec!["berserk"]);
        assert_eq!(query_values(&url, "sort"), vec!["Latest Updates"]);
        assert_eq!(query_values(&url, "order"), vec!["Descending"]);
        assert_eq!(query_values(&url, "included_type"), vec!["Manhwa"]);
        assert_eq!(query_values(&url, "included_status"), vec!["Complete"]);
        assert_eq!(query_values(&url, "included_tag"), vec!["Sci-fi"]);
        assert_eq!(query_values(&url, "excluded_tag"), vec!["Yaoi"]);
        assert_eq!(query_values(&url, "author"), vec!["Miura"]);
        assert_eq!(query_values(&url, "display_mode"), vec!["Full Display"]);

        let url = source().build_search_url(3, &FetchSearchSerieFilter::default()).unwrap();
        assert_eq!(query_values(&url, "offset"), vec!["48"]);
    }

    #[test]
    fn test_build_search_url_rejects_untranslatable_values() {
        let mut filter = FetchSearchSerieFilter::default();
        filter.types = vec![SerieType::Webtoon];
        let err = source().build_search_url(1, &filter).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSearch { param: SearchParam::Types, .. }));

        let mut filter = FetchSearchSerieFilter::default();
        filter.genres.include = vec![Genre::Zombies];
        let err = source().build_search_url(1, &filter).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSearch { param: SearchParam::Genres, .. }));
    }

    #[test]
    fn test_serie_url() {
        let url = source().serie_url(&SerieId::from("01J76XYCERXE60T7FKXVCCAQ0H")).unwrap();
        assert_eq!(url.as_str(), "https://weebcentral.com/series/01J76XYCERXE60T7FKXVCCAQ0H");
    }

    #[test]
    fn test_supported_filters_round_trip() {
        let weebcentral = source();
        let filters = &weebcentral.information().search_filters;
        let codecs = &weebcentral.codecs;
        for genre in &filters.genres.possible_values {
            assert_eq!(codecs.genre.to_canonical(codecs.genre.to_native(*genre).unwrap()).unwrap(), *genre);
        }
        for t in &filters.types {
            assert_eq!(codecs.serie_type.to_canonical(codecs.serie_type.to_native(*t).unwrap()).unwrap(), *t);
        }
        for status in &filters.status {
            assert_eq!(codecs.status.to_canonical(codecs.status.to_native(*status).unwrap()).unwrap(), *status);
        }
        for sort in &filters.sorts {
            assert_eq!(codecs.sort.to_canonical(codecs.sort.to_native(*sort).unwrap()).unwrap(), *sort);
        }
        for order in &filters.orders {
            assert_eq!(codecs.order.to_canonical(codecs.order.to_native(*order).unwrap()).unwrap(), *order);
        }
    }
}
