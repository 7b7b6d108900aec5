pub mod dataset;
pub mod queries;
pub mod words;


pub use dataset::{Dataset, PlayView};
pub use queries::{
    daily_minutes, top_albums, top_by_minutes, weekday_hour_matrix, Dimension, MetricLabels, Summary,
};
pub use words::{normalize_text, normalize_titles, word_frequencies};
