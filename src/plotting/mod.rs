pub mod chart;
pub mod render;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{
    album_sunburst, habits_bubble, minutes_area, ranked_bar, word_cloud, ChartSpec, ColorScale, Palette,
};
pub use render::{render_chart, PlotError, RenderedChart};
pub use styles::{ChartStyle, ChartTheme};
