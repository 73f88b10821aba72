pub mod filter;

pub use filter::{
    classify, file_stem, last_name_part, Classification, NamePartSplitter, PlaceholderFilter,
    Verdict, DEFAULT_SPLITTER,
};
