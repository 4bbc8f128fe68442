use crate::config::EndpointConfig;
use crate::download::FetchOptions;
use crate::table::{DatasetRecord, TableSource};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub endpoints: EndpointConfig,
    pub source: TableSource,
    pub output_dir: PathBuf,
    pub options: FetchOptions,
}

#[derive(Debug, Clone)]
pub struct VerifyParams {
    pub endpoints: EndpointConfig,
    pub file_path: PathBuf,
    pub file_id: String,
    pub options: FetchOptions,
}

#[derive(Debug, Clone)]
pub struct ResolveParams {
    pub endpoints: EndpointConfig,
    pub record: DatasetRecord,
    pub output_dir: PathBuf,
}
