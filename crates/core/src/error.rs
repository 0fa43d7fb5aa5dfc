use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchDataError {
    /// Brand name not in the catalog while unknown brands are rejected.
    UnknownBrand { brand: String },
    /// HTTP 200 but the body is not a JSON array of objects.
    Decode { url: String, detail: String },
}

impl fmt::Display for WatchDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBrand { brand } => write!(f, "no brand code found for brand {brand}"),
            Self::Decode { url, detail } => {
                write!(f, "watch data response is not decodable (url={url}): {detail}")
            }
        }
    }
}

impl std::error::Error for WatchDataError {}
