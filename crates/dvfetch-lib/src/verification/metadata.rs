use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct MetadataResponse {
    #[serde(default)]
    pub data: Option<MetadataData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MetadataData {
    #[serde(default)]
    pub checksum: Option<RemoteChecksum>,
    #[serde(default)]
    pub filesize: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteChecksum {
    #[serde(rename = "type", default)]
    pub checksum_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// What the remote service declares about a datafile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    pub checksum_type: Option<String>,
    pub checksum_value: Option<String>,
    pub filesize: Option<u64>,
}

impl MetadataResponse {
    /// Only a response carrying a `data.checksum` object counts as metadata.
    pub(super) fn into_metadata(self) -> Option<RemoteMetadata> {
        let data = self.data?;
        let checksum = data.checksum?;
        Some(RemoteMetadata {
            checksum_type: checksum.checksum_type,
            checksum_value: checksum.value,
            filesize: data.filesize,
        })
    }
}
