//! Library profiles - static table of asset locations and templates
//!
//! A profile is selected by the library major version (`ol3`, `ol2`). Two
//! auxiliary profiles (`jquery`, `bootstrap3`) only contribute assets.
//!
//! Every asset has two locations: the upstream URL used in remote mode and a
//! path relative to the assets directory used in local-copy mode.

use std::fmt;

use crate::error::{Result, ScaffoldError};

/// Version key used when none is given
pub const DEFAULT_VERSION: &str = "ol3";

/// Where one asset can be obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetLocation {
    /// Upstream URL (remote mode)
    pub url: &'static str,
    /// Path relative to the assets directory (local-copy mode)
    pub local: &'static str,
}

/// Library profile for one supported major version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub key: &'static str,
    pub script: AssetLocation,
    pub style: AssetLocation,
    /// Index template file name, relative to the templates directory
    pub index_template: &'static str,
    /// App template file name, relative to the templates directory
    pub app_template: &'static str,
}

/// Helper or framework bundle (no templates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxProfile {
    pub key: &'static str,
    pub script: AssetLocation,
    pub style: Option<AssetLocation>,
}

pub const OL3: Profile = Profile {
    key: "ol3",
    script: AssetLocation {
        url: "http://openlayers.org/en/v3.1.1/build/ol.js",
        local: "ol3/ol.js",
    },
    style: AssetLocation {
        url: "http://openlayers.org/en/v3.1.1/css/ol.css",
        local: "ol3/ol.css",
    },
    index_template: "index.ol3.template",
    app_template: "app.ol3.template",
};

pub const OL2: Profile = Profile {
    key: "ol2",
    script: AssetLocation {
        url: "http://cdnjs.cloudflare.com/ajax/libs/openlayers/2.13.1/OpenLayers.js",
        local: "ol2/OpenLayers.js",
    },
    style: AssetLocation {
        url: "http://cdnjs.cloudflare.com/ajax/libs/openlayers/2.13.1/theme/default/style.css",
        local: "ol2/style.css",
    },
    index_template: "index.ol2.template",
    app_template: "app.ol2.template",
};

pub const JQUERY: AuxProfile = AuxProfile {
    key: "jquery",
    script: AssetLocation {
        url: "http://code.jquery.com/jquery-1.11.1.min.js",
        local: "jquery/jquery.js",
    },
    style: None,
};

pub const BOOTSTRAP3: AuxProfile = AuxProfile {
    key: "bootstrap3",
    script: AssetLocation {
        url: "http://maxcdn.bootstrapcdn.com/bootstrap/3.3.1/js/bootstrap.min.js",
        local: "bootstrap3/bootstrap.min.js",
    },
    style: Some(AssetLocation {
        url: "http://maxcdn.bootstrapcdn.com/bootstrap/3.3.1/css/bootstrap.min.css",
        local: "bootstrap3/bootstrap.min.css",
    }),
};

/// All library profiles, newest first
pub const PROFILES: &[Profile] = &[OL3, OL2];

impl Profile {
    /// Look up a profile by version key.
    ///
    /// Case-insensitive; `v3`/`3` and `v2`/`2` are accepted as aliases.
    pub fn resolve(key: &str) -> Result<&'static Profile> {
        let normalized = match key.trim().to_lowercase().as_str() {
            "ol3" | "v3" | "3" => "ol3",
            "ol2" | "v2" | "2" => "ol2",
            other => {
                return Err(ScaffoldError::Configuration(format!(
                    "unknown library version '{}' (valid: {})",
                    other,
                    valid_keys().join(", ")
                )))
            }
        };

        PROFILES
            .iter()
            .find(|p| p.key == normalized)
            .ok_or_else(|| ScaffoldError::Configuration(format!("no profile for '{}'", key)))
    }
}

/// Keys of every library profile
pub fn valid_keys() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.key).collect()
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_ol3() {
        let profile = Profile::resolve(DEFAULT_VERSION).unwrap();
        assert_eq!(profile.key, "ol3");
        assert_eq!(profile.index_template, "index.ol3.template");
        assert!(profile.script.url.ends_with("ol.js"));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Profile::resolve("OL2").unwrap().key, "ol2");
        assert_eq!(Profile::resolve("v2").unwrap().key, "ol2");
        assert_eq!(Profile::resolve("3").unwrap().key, "ol3");
    }

    #[test]
    fn test_unknown_version_is_configuration_error() {
        let err = Profile::resolve("ol99").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("ol99"));
        assert!(err.to_string().contains("ol3, ol2"));
    }

    #[test]
    fn test_aux_profiles() {
        assert!(JQUERY.style.is_none());
        assert!(BOOTSTRAP3.style.is_some());
        assert!(BOOTSTRAP3.script.local.starts_with("bootstrap3/"));
    }
}
