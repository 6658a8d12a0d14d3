//! NFT metadata types, used in metadata-changing proposals

use serde::{Deserialize, Serialize};

/// Token metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Uri pointing to off-chain metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    /// On-chain metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
}

/// On-chain metadata extension
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    /// Url to the token's image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Raw image data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// External url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Trait>>,
    /// Background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Animation url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    /// Youtube url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    /// Media files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaFile>>,
    /// Attribute keys whose values live in private metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_attributes: Option<Vec<String>>,
}

/// A single displayable attribute
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    /// How the trait should be displayed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    /// Trait name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trait_type: Option<String>,
    /// Trait value
    pub value: String,
    /// Optional maximum value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
}

/// A media file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    /// File type, e.g. "image" or "video"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// File extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Optional decryption authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    /// Url to the file
    pub url: String,
}

/// Decryption authentication for protected media
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    /// Decryption key or password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_metadata_serializes_minimally() {
        let meta = Metadata {
            token_uri: Some("ipfs://Qm".to_string()),
            extension: None,
        };
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"token_uri":"ipfs://Qm"}"#
        );
    }

    #[test]
    fn test_extension_round_trip() {
        let meta = Metadata {
            token_uri: None,
            extension: Some(Extension {
                name: Some("piece #1".to_string()),
                attributes: Some(vec![Trait {
                    trait_type: Some("rarity".to_string()),
                    value: "legendary".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
