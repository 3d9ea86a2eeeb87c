mod db;
pub use db::DbDump;

mod display;
pub use display::format_date;

mod stats;
pub use stats::{compute_stats, ExpertStat};

mod viewer;
pub use viewer::Viewer;

pub mod api {
    pub use eyesfood_api::*;
}
