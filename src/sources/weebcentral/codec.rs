use crate::models::{Genre, Order, SerieType, Sort, Status};
use crate::taxonomy::{Axis, Codec, TaxonomyError};

/// Tag labels as shown on the site and accepted by the search form.
const GENRES: &[(&str, Genre)] = &[
    ("Action", Genre::Action),
    ("Adult", Genre::Adult),
    ("Adventure", Genre::Adventure),
    ("Comedy", Genre::Comedy),
    ("Doujinshi", Genre::Doujinshi),
    ("Drama", Genre::Drama),
    ("Ecchi", Genre::Ecchi),
    ("Fantasy", Genre::Fantasy),
    ("Gender Bender", Genre::GenderBender),
    ("Harem", Genre::Harem),
    ("Hentai", Genre::Hentai),
    ("Historical", Genre::Historical),
    ("Horror", Genre::Horror),
    ("Isekai", Genre::Isekai),
    ("Josei", Genre::Josei),
    ("Lolicon", Genre::Lolicon),
    ("Martial Arts", Genre::MartialArts),
    ("Mature", Genre::Mature),
    ("Mecha", Genre::Mecha),
    ("Mystery", Genre::Mystery),
    ("Psychological", Genre::Psychological),
    ("Romance", Genre::Romance),
    ("School Life", Genre::SchoolLife),
    ("Sci-fi", Genre::SciFi),
    ("Seinen", Genre::Seinen),
    ("Shotacon", Genre::Shotacon),
    ("Shoujo", Genre::Shoujo),
    ("Shoujo Ai", Genre::ShoujoAi),
    ("Shounen", Genre::Shounen),
    ("Shounen Ai", Genre::ShounenAi),
    ("Slice of Life", Genre::SliceOfLife),
    ("Smut", Genre::Smut),
    ("Sports", Genre::Sports),
    ("Supernatural", Genre::Supernatural),
    ("Tragedy", Genre::Tragedy),
    ("Yaoi", Genre::Yaoi),
    ("Yuri", Genre::Yuri),
    ("Other", Genre::Other),
];

const TYPES: &[(&str, SerieType)] = &[
    ("Manga", SerieType::Manga),
    ("Manhwa", SerieType::Manhwa),
    ("Manhua", SerieType::Manhua),
    ("OEL", SerieType::Oel),
];

const STATUSES: &[(&str, Status)] = &[
    ("Ongoing", Status::Ongoing),
    ("Complete", Status::Completed),
    ("Hiatus", Status::Hiatus),
    ("Canceled", Status::Canceled),
];

const SORTS: &[(&str, Sort)] = &[
    ("Best Match", Sort::Relevance),
    ("Popularity", Sort::Popularity),
    ("Latest Updates", Sort::Latest),
    ("Alphabet", Sort::Alphabetic),
];

const ORDERS: &[(&str, Order)] = &[("Ascending", Order::Asc), ("Descending", Order::Desc)];

#[derive(Debug, Clone)]
pub struct WeebCentralCodecs {
    pub genre: Codec<Genre>,
    pub serie_type: Codec<SerieType>,
    pub status: Codec<Status>,
    pub sort: Codec<Sort>,
    pub order: Codec<Order>,
}

impl WeebCentralCodecs {
    pub fn new() -> Result<Self, TaxonomyError> {
        Ok(Self {
            genre: Codec::new(Axis::Genre, GENRES)?,
            serie_type: Codec::new(Axis::Type, TYPES)?,
            status: Codec::new(Axis::Status, STATUSES)?,
            sort: Codec::new(Axis::Sort, SORTS)?,
            order: Codec::new(Axis::Order, ORDERS)?,
        })
    }
}
