pub mod controller;
pub mod state;
pub mod ui;

pub use controller::{Dashboard, DashboardView, IntroContent, Panel, PanelBody, TabContent};
pub use state::App;
