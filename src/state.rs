use crate::actor::Representation;
use druid::Data;

/// Application state
#[derive(Clone, Data)]
pub struct AppState {
    /// How every actor in the scene is drawn
    pub representation: Representation,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            representation: Representation::Surface,
        }
    }
}
