//! Results presentation: advice and nearby providers, merged at render time.

pub mod render;
pub mod session;
pub mod view;

pub use render::render_results;
pub use session::ResultsCoordinator;
pub use view::{ResultsSession, ResultsView, SlotUpdate};
