// Location codes of the Thuringian student canteens
use crate::model::{ConfigError, ScrapeError};
use crate::utils::title_case_slug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub code: String,
    pub region: String,
    pub slug: String,
}

impl LocationEntry {
    pub fn new(code: &str, region: &str, slug: &str) -> Self {
        Self {
            code: code.to_string(),
            region: region.to_string(),
            slug: slug.to_string(),
        }
    }
}

const DEFAULT_LOCATIONS: &[(&str, &str, &str)] = &[
    // Erfurt
    ("MNS", "erfurt", "mensa-nordhaeuser-strasse"),
    ("MAS", "erfurt", "mensa-altonaer-strasse"),
    ("CH7", "erfurt", "cafeteria-hoersaal-7"),
    ("GBX", "erfurt", "glasbox"),
    ("CSL", "erfurt", "cafeteria-schlueterstrasse"),
    ("CLS", "erfurt", "cafeteria-leipziger-strasse"),
    // Jena
    ("EAP", "jena", "mensa-ernst-abbe-platz"),
    ("CZP", "jena", "mensa-carl-zeiss-promenade"),
    ("PW", "jena", "mensa-philosophenweg"),
    ("UHG", "jena", "mensa-uni-hauptgebaeude"),
    ("MVRS", "jena", "moritz-von-rohr-strasse"),
    ("CCZ", "jena", "cafeteria-carl-zeiss-strasse-3"),
    ("CZR", "jena", "cafeteria-zur-rosen"),
    ("CBIB", "jena", "cafeteria-bibliothek"),
    // Weimar
    ("MAP", "weimar", "mensa-am-park"),
    ("CAH", "weimar", "cafeteria-am-horn"),
    ("CMP", "weimar", "cafeteria-mensa-am-park"),
    // Ilmenau
    ("MEH", "ilmenau", "mensa-ehrenberg"),
    ("CME", "ilmenau", "cafeteria-mensa-ehrenberg"),
    ("CMI", "ilmenau", "cafeteria-mini"),
    ("NANO", "ilmenau", "nanoteria"),
    ("TWC", "ilmenau", "tower-cafe"),
    ("CRB", "ilmenau", "cafeteria-roentgenbau"),
    // Schmalkalden
    ("MBH", "schmalkalden", "mensa-blechhammer"),
    ("CMB", "schmalkalden", "cafeteria-mensa-blechhammer"),
    // Gera
    ("MWF", "gera", "mensa-weg-der-freundschaft"),
    // Eisenach
    ("MAW", "eisenach", "mensa-am-wartenberg"),
    // Nordhausen
    ("MWH", "nordhausen", "mensa-weinberghof"),
];

/// Static mapping of short codes to `(region, slug)` pairs.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    entries: Vec<LocationEntry>,
}

impl LocationRegistry {
    /// Builds a registry from custom entries. Codes must be unique.
    pub fn from_entries(entries: Vec<LocationEntry>) -> Result<Self, ConfigError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.code == entry.code) {
                return Err(ConfigError::DuplicateLocation(entry.code.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn resolve(&self, code: &str) -> Result<&LocationEntry, ScrapeError> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .ok_or_else(|| ScrapeError::UnknownLocation(code.to_string()))
    }

    pub fn all_codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.code.as_str())
    }

    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    /// Human readable name, e.g. `MAP` -> `Mensa Am Park`.
    /// Unknown codes are transformed as if they were a slug.
    pub fn display_name(&self, code: &str) -> String {
        match self.resolve(code) {
            Ok(entry) => title_case_slug(&entry.slug),
            Err(_) => title_case_slug(code),
        }
    }

    /// `<base_url>/<region>/<slug>.html`
    pub fn address(&self, base_url: &str, code: &str) -> Result<String, ScrapeError> {
        let entry = self.resolve(code)?;
        Ok(format!(
            "{}/{}/{}.html",
            base_url.trim_end_matches('/'),
            entry.region,
            entry.slug
        ))
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self {
            entries: DEFAULT_LOCATIONS
                .iter()
                .map(|(code, region, slug)| LocationEntry::new(code, region, slug))
                .collect(),
        }
    }
}
