use profilescout::ProfileSearch;

#[derive(Clone)]
pub struct AppState {
    pub search: ProfileSearch,
}
