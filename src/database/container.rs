use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entrypoint applied when a create payload omits it
pub const DEFAULT_ENTRYPOINT: &str = "";

/// Image applied when a create payload omits it
pub const DEFAULT_IMAGE: &str = "ubuntu";

/// A container record as stored and as returned over the API.
///
/// Field names on the wire keep their capitalised form (`Hostname`,
/// `Entrypoint`, `Image`); only `id` is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: u64,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "Entrypoint")]
    pub entrypoint: String,
    #[serde(rename = "Image")]
    pub image: String,
}

impl Container {
    /// Overwrite every recognised field present in `fields`, keeping the rest.
    /// `id` is never touched.
    pub fn merge(&mut self, fields: ContainerFields) {
        if let Some(hostname) = fields.hostname {
            self.hostname = hostname;
        }
        if let Some(entrypoint) = fields.entrypoint {
            self.entrypoint = entrypoint;
        }
        if let Some(image) = fields.image {
            self.image = image;
        }
    }
}

/// The writable subset of a container, as found in a request payload.
///
/// Anything the payload carries beyond these three keys (including `id`)
/// is dropped during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFields {
    pub hostname: Option<String>,
    pub entrypoint: Option<String>,
    pub image: Option<String>,
}

impl ContainerFields {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..Self::default()
        }
    }

    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Pull the recognised fields out of an arbitrary JSON payload.
    /// Non-object payloads and non-string values yield nothing.
    pub fn from_json(payload: &Value) -> Self {
        match payload.as_object() {
            Some(object) => Self {
                hostname: string_field(object, "Hostname"),
                entrypoint: string_field(object, "Entrypoint"),
                image: string_field(object, "Image"),
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hostname.is_none() && self.entrypoint.is_none() && self.image.is_none()
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_owned)
}
