//! Built-in license templates.
//!
//! The catalog is seeded from [`SEEDS`] and the two sentinel seeds, a fixed
//! table of string ids. The
//! ids are resolved through a [`StringResolver`] supplied by the embedding
//! application, so the displayed text can come from a localisation system.
//! [`DefaultStrings`] provides the English texts.

use std::collections::HashMap;

/// Key of the entry used when a library declares no license code.
pub const NONE_KEY: &str = "none";

/// Key of the entry used when a declared code matches nothing.
pub const UNRECOGNISED_KEY: &str = "unrecognised";

/// Resolves a symbolic string id to display text.
pub trait StringResolver: Send + Sync {
    /// Returns `None` when the id is unknown. An empty string is a valid
    /// answer.
    fn string_for(&self, id: &str) -> Option<String>;
}

impl<F> StringResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn string_for(&self, id: &str) -> Option<String> {
        self(id)
    }
}

/// One row of the seed table.
#[derive(Clone, Copy, Debug)]
pub struct Seed {
    pub key: &'static str,
    pub name_id: &'static str,
    pub url_id: &'static str,
    pub description_id: &'static str,
}

const EMPTY: &str = "homage_empty_license";

/// The ordinary built-in templates. The two sentinels are seeded separately
/// from [`NONE_SEED`] and [`UNRECOGNISED_SEED`].
pub const SEEDS: &[Seed] = &[
    Seed {
        key: "apache-2.0",
        name_id: "homage_license_apache_2_0_name",
        url_id: "homage_license_apache_2_0_website",
        description_id: "homage_license_apache_2_0_description",
    },
    Seed {
        key: "bsd-2-clause",
        name_id: "homage_license_bsd_2_name",
        url_id: "homage_license_bsd_2_website",
        description_id: "homage_license_bsd_2_description",
    },
    Seed {
        key: "bsd-3-clause",
        name_id: "homage_license_bsd_3_name",
        url_id: "homage_license_bsd_3_website",
        description_id: "homage_license_bsd_3_description",
    },
    Seed {
        key: "cc0-1.0",
        name_id: "homage_license_cc0_1_0_name",
        url_id: "homage_license_cc0_1_0_website",
        description_id: "homage_license_cc0_1_0_description",
    },
    Seed {
        key: "cc-3.0",
        name_id: "homage_license_cc_3_0_name",
        url_id: "homage_license_cc_3_0_website",
        description_id: "homage_license_cc_3_0_description",
    },
    Seed {
        key: "lgpl-3.0",
        name_id: "homage_license_lgpl_3_0_name",
        url_id: "homage_license_lgpl_3_0_website",
        description_id: "homage_license_lgpl_3_0_description",
    },
    Seed {
        key: "mit",
        name_id: "homage_license_mit_name",
        url_id: "homage_license_mit_website",
        description_id: "homage_license_mit_description",
    },
];

/// Seed of the [`NONE_KEY`] sentinel.
pub const NONE_SEED: Seed = Seed {
    key: NONE_KEY,
    name_id: EMPTY,
    url_id: EMPTY,
    description_id: EMPTY,
};

/// Seed of the [`UNRECOGNISED_KEY`] sentinel.
pub const UNRECOGNISED_SEED: Seed = Seed {
    key: UNRECOGNISED_KEY,
    name_id: EMPTY,
    url_id: EMPTY,
    description_id: "homage_unrecognised_license",
};

/// English texts for every seeded id. Descriptions use the HTML
/// subset understood by [`RichText::from_html`](crate::RichText::from_html).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStrings;

impl StringResolver for DefaultStrings {
    fn string_for(&self, id: &str) -> Option<String> {
        let text = match id {
            EMPTY => "",
            "homage_unrecognised_license" => {
                "The license for this library was not recognised. \
                 Please refer to the library's website for licensing details."
            }

            "homage_license_apache_2_0_name" => "Apache License 2.0",
            "homage_license_apache_2_0_website" => "https://www.apache.org/licenses/LICENSE-2.0",
            "homage_license_apache_2_0_description" => {
                "A <b>permissive</b> license that also provides an express grant of patent \
                 rights from contributors to users.<br><br>Licensed works, modifications and \
                 larger works may be distributed under different terms and without source code, \
                 provided the license and a notice of any changes are included."
            }

            "homage_license_bsd_2_name" => "BSD 2-Clause \"Simplified\" License",
            "homage_license_bsd_2_website" => "https://opensource.org/licenses/BSD-2-Clause",
            "homage_license_bsd_2_description" => {
                "A <b>permissive</b> license that comes in two variants, the BSD 2-Clause \
                 and BSD 3-Clause.<br><br>Both have very minute differences to the MIT \
                 license: redistributions must retain the copyright notice, the list of \
                 conditions and the disclaimer."
            }

            "homage_license_bsd_3_name" => "BSD 3-Clause \"New\" or \"Revised\" License",
            "homage_license_bsd_3_website" => "https://opensource.org/licenses/BSD-3-Clause",
            "homage_license_bsd_3_description" => {
                "A <b>permissive</b> license similar to the BSD 2-Clause License, but with a \
                 third clause that prohibits others from using the name of the project or its \
                 contributors to promote derived products without written consent."
            }

            "homage_license_cc0_1_0_name" => "Creative Commons Zero v1.0 Universal",
            "homage_license_cc0_1_0_website" => {
                "https://creativecommons.org/publicdomain/zero/1.0/"
            }
            "homage_license_cc0_1_0_description" => {
                "The Creative Commons CC0 Public Domain Dedication <b>waives copyright \
                 interest</b> in a work you've created and dedicates it to the world-wide \
                 public domain."
            }

            "homage_license_cc_3_0_name" => "Creative Commons Attribution 3.0",
            "homage_license_cc_3_0_website" => "https://creativecommons.org/licenses/by/3.0/",
            "homage_license_cc_3_0_description" => {
                "You are free to <b>share</b> and <b>adapt</b> the material for any purpose, \
                 even commercially, as long as you give appropriate credit, provide a link to \
                 the license, and indicate if changes were made."
            }

            "homage_license_lgpl_3_0_name" => "GNU Lesser General Public License v3.0",
            "homage_license_lgpl_3_0_website" => "https://www.gnu.org/licenses/lgpl-3.0.html",
            "homage_license_lgpl_3_0_description" => {
                "Permissions of this <b>copyleft</b> license are conditioned on making \
                 available complete source code of licensed works and modifications under the \
                 same license.<br><br>However, a larger work using the licensed work through \
                 interfaces provided by the licensed work may be distributed under different \
                 terms and without source code for the larger work."
            }

            "homage_license_mit_name" => "MIT License",
            "homage_license_mit_website" => "https://opensource.org/licenses/MIT",
            "homage_license_mit_description" => {
                "A short and simple <b>permissive</b> license with conditions only requiring \
                 preservation of copyright and license notices.<br><br>Licensed works, \
                 modifications, and larger works may be distributed under different terms and \
                 without source code."
            }

            _ => return None,
        };
        Some(text.to_string())
    }
}

/// A [`StringResolver`] backed by a map, falling back to another resolver.
///
/// Useful for overriding a handful of texts (a translation, a custom
/// sentinel message) while keeping the defaults for the rest.
pub struct MapStrings {
    strings: HashMap<String, String>,
    fallback: Option<Box<dyn StringResolver>>,
}

impl MapStrings {
    pub fn new() -> Self {
        Self {
            strings: HashMap::new(),
            fallback: None,
        }
    }

    /// Start from [`DefaultStrings`] and override on top.
    pub fn over_defaults() -> Self {
        Self {
            strings: HashMap::new(),
            fallback: Some(Box::new(DefaultStrings)),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.strings.insert(id.into(), text.into());
        self
    }
}

impl Default for MapStrings {
    fn default() -> Self {
        Self::new()
    }
}

impl StringResolver for MapStrings {
    fn string_for(&self, id: &str) -> Option<String> {
        self.strings
            .get(id)
            .cloned()
            .or_else(|| self.fallback.as_ref()?.string_for(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_seeds() -> impl Iterator<Item = &'static Seed> {
        SEEDS.iter().chain([&NONE_SEED, &UNRECOGNISED_SEED])
    }

    #[test]
    fn default_strings_cover_every_seed() {
        for seed in all_seeds() {
            for id in [seed.name_id, seed.url_id, seed.description_id] {
                assert!(
                    DefaultStrings.string_for(id).is_some(),
                    "missing default string {id} for {}",
                    seed.key
                );
            }
        }
    }

    #[test]
    fn seed_keys_are_unique_and_lowercase() {
        let keys: Vec<&str> = all_seeds().map(|seed| seed.key).collect();
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(*key, key.to_lowercase());
            assert!(keys[i + 1..].iter().all(|other| other != key));
        }
    }

    #[test]
    fn unknown_id_is_none() {
        assert_eq!(DefaultStrings.string_for("homage_license_gpl_name"), None);
    }

    #[test]
    fn map_strings_override_then_fall_back() {
        let mut strings = MapStrings::over_defaults();
        strings.insert("homage_license_mit_name", "Licence MIT");
        assert_eq!(
            strings.string_for("homage_license_mit_name").as_deref(),
            Some("Licence MIT")
        );
        assert_eq!(
            strings.string_for("homage_license_mit_website").as_deref(),
            Some("https://opensource.org/licenses/MIT")
        );
        assert_eq!(MapStrings::new().string_for("homage_license_mit_name"), None);
    }

    #[test]
    fn closures_are_resolvers() {
        let upper = |id: &str| Some(id.to_uppercase());
        assert_eq!(upper.string_for("abc").as_deref(), Some("ABC"));
    }
}
