mod lrclib;
mod megalobiz;

pub use lrclib::LrcLibProvider;
pub use megalobiz::MegalobizProvider;
