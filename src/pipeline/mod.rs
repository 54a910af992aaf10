// Pipeline stages that turn extracted text into cluster and sentiment
// artifacts.

pub mod cluster;
pub mod sentiment;
