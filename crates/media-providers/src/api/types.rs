use serde::{Deserialize, Deserializer};

/// The API sends `null` for absent values; those decode as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobKind {
    Song,
    Video,
}

impl JobKind {
    pub(crate) fn as_path(&self) -> &'static str {
        match self {
            JobKind::Song => "song",
            JobKind::Video => "video",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ApiTrack>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiTrack {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
}

impl ApiTrack {
    /// Whole seconds; fractional parts are dropped.
    pub fn duration_secs(&self) -> u64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            self.duration.trunc() as u64
        } else {
            0
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    pub format: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}
