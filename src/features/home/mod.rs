mod intent;
mod reducer;
mod state;
mod view;

pub use intent::HomeIntent;
pub use reducer::HomeReducer;
pub use state::{CategoryState, HomeState};
pub use view::{HomeTransformer, HomeView, MovieSection, SectionKind};
