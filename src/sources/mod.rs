//! Source contract and the registry of available providers.

pub mod mangadex;
pub mod mock;
pub mod weebcentral;

use crate::config::Config;
use crate::error::{Result, SearchParam, SourceError};
use crate::http_client::SourceHttpClient;
use crate::models::{
    ChapterId, FetchSearchSerieFilter, Order, PaginatedSmallSerie, SerieId, Sort,
    SourceApiInformation, SourceId, SourceInformation, SourceSerie, SourceSerieVolumeChapterData,
    VolumeId,
};
use crate::taxonomy::Codec;
use async_trait::async_trait;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Capabilities every content provider exposes.
///
/// Remote methods observe `cancel`; once it fires they return
/// [`SourceError::Cancelled`] without waiting for in-flight requests.
#[async_trait]
pub trait Source: Send + Sync {
    fn information(&self) -> &SourceInformation;

    fn api_information(&self) -> &SourceApiInformation;

    async fn fetch_popular_serie(
        &self,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<PaginatedSmallSerie> {
        let filter = FetchSearchSerieFilter::sorted(Sort::Popularity, Order::Desc);
        self.fetch_search_serie(page, &filter, cancel).await
    }

    async fn fetch_latest_updates(
        &self,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<PaginatedSmallSerie> {
        let filter = FetchSearchSerieFilter::sorted(Sort::Latest, Order::Desc);
        self.fetch_search_serie(page, &filter, cancel).await
    }

    async fn fetch_search_serie(
        &self,
        page: u32,
        filter: &FetchSearchSerieFilter,
        cancel: &CancellationToken,
    ) -> Result<PaginatedSmallSerie>;

    async fn fetch_serie_detail(
        &self,
        serie_id: &SerieId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerie>;

    async fn fetch_chapter_data(
        &self,
        serie_id: &SerieId,
        volume_id: &VolumeId,
        chapter_id: &ChapterId,
        cancel: &CancellationToken,
    ) -> Result<SourceSerieVolumeChapterData>;

    fn serie_url(&self, serie_id: &SerieId) -> Result<Url>;
}

/// Translates one list-valued search axis.
///
/// `codec` is `None` when the provider does not support the axis: requested
/// values are then ignored. Otherwise every value must translate.
pub(crate) fn translate_axis<C>(
    source: &str,
    codec: Option<&Codec<C>>,
    values: &[C],
    param: SearchParam,
) -> Result<Vec<&'static str>>
where
    C: Copy + Eq + Hash + fmt::Display,
{
    if values.is_empty() {
        return Ok(Vec::new());
    }
    match codec {
        Some(codec) => codec.to_natives(values).map_err(SourceError::invalid_search(param)),
        None => {
            log::debug!("{} ignores unsupported {} filter", source, param);
            Ok(Vec::new())
        }
    }
}

/// `<site>/<section>/<id>`
pub(crate) fn site_url(site: &str, section: &str, serie_id: &SerieId) -> Result<Url> {
    let building = |reason: String| SourceError::BuildingUrl {
        serie_id: serie_id.to_string(),
        reason,
    };
    let mut url = Url::parse(site).map_err(|e| building(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| building(format!("{} cannot be a base", site)))?
        .pop_if_empty()
        .extend([section, serie_id.as_str()]);
    Ok(url)
}

/// Providers available to callers, selected by [`SourceId`].
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Builds every provider, sharing one HTTP client between them.
    pub fn build(config: &Config) -> Result<Self> {
        let http = SourceHttpClient::with_config(config.sources.http_client_config())?;

        let mut sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(weebcentral::WeebCentral::new(http.clone(), &config.sources)?),
            Arc::new(mangadex::MangaDex::new(http, &config.sources)?),
        ];

        if config.sources.use_mock {
            sources.push(Arc::new(mock::MockSource::new()?));
        }

        log::info!(
            "Registered sources: {}",
            sources
                .iter()
                .map(|s| s.information().id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { sources })
    }

    pub fn get(&self, id: &SourceId) -> Result<Arc<dyn Source>> {
        self.sources
            .iter()
            .find(|s| &s.information().id == id)
            .cloned()
            .ok_or_else(|| SourceError::UnknownSource(id.to_string()))
    }

    pub fn ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.information().id.clone()).collect()
    }

    pub fn informations(&self) -> Vec<SourceInformation> {
        self.sources.iter().map(|s| s.information().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use crate::taxonomy::{Axis, TaxonomyError};

    #[test]
    fn test_translate_axis_ignores_unsupported() {
        let natives = translate_axis::<Genre>("test", None, &[Genre::Action], SearchParam::Genres).unwrap();
        assert!(natives.is_empty());
    }

    #[test]
    fn test_translate_axis_rejects_unknown_value() {
        let codec = Codec::new(Axis::Genre, &[("Action", Genre::Action)]).unwrap();
        let err = translate_axis("test", Some(&codec), &[Genre::Yuri], SearchParam::Genres).unwrap_err();
        match err {
            SourceError::InvalidSearch { param, source } => {
                assert_eq!(param, SearchParam::Genres);
                assert!(matches!(source, TaxonomyError::Unsupported { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
