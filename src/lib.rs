// Sediment: topic clustering and sentiment mapping for crawled web text
//
// This is the library root. Each module corresponds to one stage of the
// crawl -> extract -> cluster -> sentiment pipeline, plus its shared
// plumbing.

pub mod cluster;
pub mod config;
pub mod crawler;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod status;
