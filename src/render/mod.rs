pub mod bar;
pub mod export;
pub mod figure;
pub mod html;
pub mod map;
pub mod text;

pub use bar::bar_chart;
pub use export::{Chart, Exporter};
pub use figure::Figure;
pub use html::html_page;
pub use map::animated_map;
