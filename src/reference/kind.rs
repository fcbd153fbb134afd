//! Attribute value types carried by a [`Reference`](super::Reference).

use std::fmt;
use std::str::FromStr;

use crate::utils::mime;

/// Fetch destination emitted as the `as` attribute of a preload hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Audio,
    Document,
    Embed,
    Fetch,
    Font,
    Image,
    Object,
    Script,
    Style,
    Track,
    Video,
    Worker,
}

impl Destination {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Embed => "embed",
            Self::Fetch => "fetch",
            Self::Font => "font",
            Self::Image => "image",
            Self::Object => "object",
            Self::Script => "script",
            Self::Style => "style",
            Self::Track => "track",
            Self::Video => "video",
            Self::Worker => "worker",
        }
    }

    /// Infer the destination from a URL path.
    ///
    /// Only scripts and stylesheets are inferred. Every other asset needs an
    /// explicit `as`, so a font or image URL alone never becomes preloadable.
    pub fn infer(path: &str) -> Option<Self> {
        match mime::from_url_path(path)? {
            mime::types::JAVASCRIPT => Some(Self::Script),
            mime::types::CSS => Some(Self::Style),
            _ => None,
        }
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "audio" => Self::Audio,
            "document" => Self::Document,
            "embed" => Self::Embed,
            "fetch" => Self::Fetch,
            "font" => Self::Font,
            "image" => Self::Image,
            "object" => Self::Object,
            "script" => Self::Script,
            "style" => Self::Style,
            "track" => Self::Track,
            "video" => Self::Video,
            "worker" => Self::Worker,
            _ => return Err(s.to_string()),
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CORS mode emitted as the `crossorigin` attribute.
///
/// "Not marked" is expressed as `Option::<CrossOrigin>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossOrigin {
    #[default]
    Anonymous,
    UseCredentials,
}

impl CrossOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::UseCredentials => "use-credentials",
        }
    }
}

impl FromStr for CrossOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(Self::Anonymous),
            "use-credentials" => Ok(Self::UseCredentials),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for CrossOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_destination() {
        assert_eq!(Destination::infer("/path/to/known.js"), Some(Destination::Script));
        assert_eq!(Destination::infer("/path/to/known.css"), Some(Destination::Style));
        assert_eq!(Destination::infer("/path/to/unknown"), None);
        assert_eq!(Destination::infer("/fonts/inter.woff2"), None);
    }

    #[test]
    fn test_destination_from_str() {
        assert_eq!("font".parse::<Destination>(), Ok(Destination::Font));
        assert_eq!("script".parse::<Destination>(), Ok(Destination::Script));
        assert_eq!("Script".parse::<Destination>(), Err("Script".to_string()));
        assert_eq!("".parse::<Destination>(), Err(String::new()));
    }

    #[test]
    fn test_cross_origin_round_trip_names() {
        for mode in [CrossOrigin::Anonymous, CrossOrigin::UseCredentials] {
            assert_eq!(mode.as_str().parse::<CrossOrigin>(), Ok(mode));
        }
        assert!("same-origin".parse::<CrossOrigin>().is_err());
    }
}
