pub mod session_viewmodel;
pub mod positions_viewmodel;

pub use session_viewmodel::SessionViewModel;
pub use positions_viewmodel::{PositionAction, PositionsViewModel};
