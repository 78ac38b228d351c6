use crate::models::{Genre, Language, Order, Sort, Status};
use crate::taxonomy::{Axis, Codec, TaxonomyError};

/// MangaDex tag UUIDs.
const GENRES: &[(&str, Genre)] = &[
    ("b11fda93-8f1d-4bef-b2ed-8803d3733170", Genre::FourKoma),
    ("391b0423-d847-456f-aff0-8b0cfc03066b", Genre::Action),
    ("f4122d1c-3b44-44d0-9936-ff7502c39ad3", Genre::Adaptation),
    ("87cc87cd-a395-47af-b27a-93258283bbc6", Genre::Adventure),
    ("e64f6742-c834-471d-8d72-dd51fc02b835", Genre::Aliens),
    ("3de8c75d-8ee3-48ff-98ee-e20a65c86451", Genre::Animals),
    ("51d83883-4103-437c-b4b1-731cb73d786c", Genre::Anthology),
    ("0a39b5a1-b235-4886-a747-1d05d216532d", Genre::AwardWinning),
    ("5920b825-4181-4a17-beeb-9918b0ff7a30", Genre::BoysLove),
    ("4d32cc48-9f00-4cca-9b5a-a839f0764984", Genre::Comedy),
    ("ea2bc92d-1c26-4930-9b7c-d5c0dc1b6869", Genre::Cooking),
    ("5ca48985-9a9d-4bd8-be29-80dc0303db72", Genre::Crime),
    ("9ab53f92-3eed-4e9b-903a-917c86035ee3", Genre::Crossdressing),
    ("da2d50ca-3018-4cc0-ac7a-6b7d472a29ea", Genre::Delinquents),
    ("39730448-9a5f-48a2-85b0-a70db87b1233", Genre::Demons),
    ("b13b2a48-c720-44a9-9c77-39c9979373fb", Genre::Doujinshi),
    ("b9af3a63-f058-46de-a9a0-e0c13906197a", Genre::Drama),
    ("7b2ce280-79ef-4c09-9b58-12b7c23a9b78", Genre::FanColored),
    ("cdc58593-87dd-415e-bbc0-2ec27bf404cc", Genre::Fantasy),
    ("f5ba408b-0e7a-484d-8d49-4e9125ac96de", Genre::FullColor),
    ("2bd2e8d0-f146-434a-9b51-fc9ff2c5fe6a", Genre::Genderswap),
    ("3bb26d85-09d5-4d2e-880c-c34b974339e9", Genre::Ghost),
    ("a3c67850-4684-404e-9b7f-c69850ee5da6", Genre::GirlsLove),
    ("b29d6a3d-1569-4e7a-8caf-7557bc92cd5d", Genre::Gore),
    ("fad12b5e-68ba-460e-b933-9ae8318f5b65", Genre::Gyaru),
    ("aafb99c1-7f60-43fa-b75f-fc9502ce29c7", Genre::Harem),
    ("33771934-028e-4cb3-8744-691e866a923e", Genre::Historical),
    ("cdad7e68-1419-41dd-bdce-27753074a640", Genre::Horror),
    ("5bd0e105-4481-44ca-b6e7-7544da56b1a3", Genre::Incest),
    ("ace04997-f6bd-436e-b261-779182193d3d", Genre::Isekai),
    ("2d1f5d56-a1e5-4d0d-a961-2193588b08ec", Genre::Lolicon),
    ("3e2b8dae-350e-4ab8-a8ce-016e844b9f0d", Genre::LongStrip),
    ("85daba54-a71c-4554-8a28-9901a8b0afad", Genre::Mafia),
    ("a1f53773-c69a-4ce5-8cab-fffcd90b1565", Genre::Magic),
    ("81c836c9-914a-4eca-981a-560dad663e73", Genre::MagicalGirls),
    ("799c202e-7daa-44eb-9cf7-8a3c0441531e", Genre::MartialArts),
    ("50880a9d-5440-4732-9afb-8f457127e836", Genre::Mecha),
    ("c8cbe35b-1b2b-4a3f-9c37-db84c4514856", Genre::Medical),
    ("ac72833b-c4e9-4878-b9db-6c8a4a99444a", Genre::Military),
    ("dd1f77c5-dea9-4e2b-97ae-224af09caf99", Genre::MonsterGirls),
    ("36fd93ea-e8b8-445e-b836-358f02b3d33d", Genre::Monsters),
    ("f42fbf9e-188a-447b-9fdc-f19dc1e4d685", Genre::Music),
    ("ee968100-4191-4968-93d3-f82d72be7e46", Genre::Mystery),
    ("489dd859-9b61-4c37-af75-5b18e88daafc", Genre::Ninja),
    ("92d6d951-ca5e-429c-ac78-451071cbf064", Genre::OfficeWorkers),
    ("320831a8-4026-470b-94f6-8353740e6f04", Genre::OfficialColored),
    ("0234a31e-a729-4e28-9d6a-3f87c4966b9e", Genre::OneShot),
    ("b1e97889-25b4-4258-b28b-cd7f4d28ea9b", Genre::Philosophical),
    ("df33b754-73a3-4c54-80e6-1a74a8058539", Genre::Police),
    ("9467335a-1b83-4497-9231-765337a00b96", Genre::PostApocalyptic),
    ("3b60b75c-a2d7-4860-ab56-05f391bb889c", Genre::Psychological),
    ("0bc90acb-ccc1-44ca-a34a-b9f3a73259d0", Genre::Reincarnation),
    ("65761a2a-415e-47f3-bef2-a9dababba7a6", Genre::ReverseHarem),
    ("423e2eae-a7a2-4a8b-ac03-a8351462d71d", Genre::Romance),
    ("81183756-1453-4c81-aa9e-f6e1b63be016", Genre::Samurai),
    ("caaa44eb-cd40-4177-b930-79d3ef2afe87", Genre::SchoolLife),
    ("256c8bd9-4904-4360-bf4f-508a76d67183", Genre::SciFi),
    ("891cf039-b895-47f0-9229-bef4c96eccd4", Genre::SelfPublished),
    ("97893a4c-12af-4dac-b6be-0dffb353568e", Genre::SexualViolence),
    ("ddefd648-5140-4e5f-ba18-4eca4071d19b", Genre::Shotacon),
    ("e5301a23-ebd9-49dd-a0cb-2add944c7fe9", Genre::SliceOfLife),
    ("69964a64-2f90-4d33-beeb-f3ed2875eb4c", Genre::Sports),
    ("7064a261-a137-4d3a-8848-2d385de3a99c", Genre::Superhero),
    ("eabc5b4c-6aff-42f3-b657-3e90cbd00b75", Genre::Supernatural),
    ("5fff9cde-849c-4d78-aab0-0d52b2ee1d25", Genre::Survival),
    ("07251805-a27e-4d59-b488-f0bfbec15168", Genre::Thriller),
    ("292e862b-2d17-4062-90a2-0356caa4ae27", Genre::TimeTravel),
    ("31932a7e-5b8e-49a6-9f12-2afa39dc544c", Genre::TraditionalGames),
    ("f8f62932-27da-4fe4-8ee1-6779a8c5edba", Genre::Tragedy),
    ("d7d1730f-6eb0-4ba6-9437-602cac38664c", Genre::Vampires),
    ("9438db5a-7e2a-4ac0-b39e-e0d95a34b8a8", Genre::VideoGames),
    ("d14322ac-4d6f-4e9b-afd9-629d5f4d8a41", Genre::Villainess),
    ("8c86611e-fab7-4986-9dec-d1a2f44acdd5", Genre::VirtualReality),
    ("e197df38-d0e7-43b5-9b09-2842d0c326dd", Genre::WebComic),
    ("acc803a4-c95a-4c22-86fc-eb6b582d82a2", Genre::Wuxia),
    ("631ef465-9aba-4afb-b0fc-ea10efe274a8", Genre::Zombies),
];

/// Publication status, the only one the search endpoint filters on.
const STATUSES: &[(&str, Status)] = &[
    ("ongoing", Status::Ongoing),
    ("completed", Status::Completed),
    ("hiatus", Status::Hiatus),
    ("cancelled", Status::Canceled),
];

/// Moderation state reported next to the status.
const STATES: &[(&str, Status)] = &[("published", Status::Published)];

const SORTS: &[(&str, Sort)] = &[
    ("relevance", Sort::Relevance),
    ("followedCount", Sort::Popularity),
    ("latestUploadedChapter", Sort::Latest),
    ("title", Sort::Alphabetic),
];

const ORDERS: &[(&str, Order)] = &[("asc", Order::Asc), ("desc", Order::Desc)];

const LANGUAGES: &[(&str, Language)] = &[
    ("en", Language::En),
    ("fr", Language::Fr),
    ("ko", Language::Ko),
    ("ja", Language::Jp),
    ("zh-hk", Language::ZhHk),
    ("zh", Language::Zh),
];

#[derive(Debug, Clone)]
pub struct MangaDexCodecs {
    pub genre: Codec<Genre>,
    pub status: Codec<Status>,
    pub state: Codec<Status>,
    pub sort: Codec<Sort>,
    pub order: Codec<Order>,
    pub language: Codec<Language>,
}

impl MangaDexCodecs {
    pub fn new() -> Result<Self, TaxonomyError> {
        Ok(Self {
            genre: Codec::new(Axis::Genre, GENRES)?,
            status: Codec::new(Axis::Status, STATUSES)?,
            state: Codec::new(Axis::Status, STATES)?,
            sort: Codec::new(Axis::Sort, SORTS)?,
            order: Codec::new(Axis::Order, ORDERS)?,
            language: Codec::new(Axis::Language, LANGUAGES)?,
        })
    }
}
