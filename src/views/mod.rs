pub mod app;
pub mod login;
pub mod register;
pub mod dashboard;
pub mod shared;

pub use app::render_app;
pub use login::render_login;
pub use register::render_register;
pub use dashboard::render_dashboard;
