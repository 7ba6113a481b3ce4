//! Country Factor Table
//!
//! Per-category multipliers approximating regional emission intensity.
//! Exactly one profile is active per computation; any code the table does not
//! know resolves to the designated fallback profile (global average).

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::TableError;
use crate::category::Category;

/// Code of the built-in fallback profile
pub const GLOBAL_COUNTRY_CODE: &str = "GL";

/// Multipliers and display metadata for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    pub factors: FxHashMap<Category, f64>,
}

impl CountryProfile {
    /// Multiplier for a category (1.0 when the profile does not list it)
    pub fn factor(&self, category: Category) -> f64 {
        self.factors.get(&category).copied().unwrap_or(1.0)
    }
}

/// Short country description carried in results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
    pub flag: String,
}

impl From<&CountryProfile> for CountrySummary {
    fn from(profile: &CountryProfile) -> Self {
        Self {
            code: profile.code.clone(),
            name: profile.name.clone(),
            flag: profile.flag.clone(),
        }
    }
}

#[derive(Deserialize)]
struct FactorTableFile {
    fallback: String,
    countries: Vec<CountryProfile>,
}

/// All country profiles plus the fallback code
#[derive(Debug, Clone)]
pub struct FactorTable {
    profiles: Vec<CountryProfile>,
    index: FxHashMap<String, usize>,
    fallback: usize,
}

impl FactorTable {
    /// Build a table, normalizing codes and checking multipliers
    pub fn new(profiles: Vec<CountryProfile>, fallback: &str) -> Result<Self, TableError> {
        let mut profiles = profiles;
        let mut index = FxHashMap::default();

        for (i, profile) in profiles.iter_mut().enumerate() {
            profile.code = normalize_code(&profile.code);
            for (category, factor) in &profile.factors {
                if !factor.is_finite() || *factor < 0.0 {
                    return Err(TableError::InvalidFactor {
                        country: profile.code.clone(),
                        category: *category,
                        factor: *factor,
                    });
                }
            }
            if index.insert(profile.code.clone(), i).is_some() {
                return Err(TableError::DuplicateCountry(profile.code.clone()));
            }
        }

        let fallback_code = normalize_code(fallback);
        let fallback = *index
            .get(&fallback_code)
            .ok_or(TableError::MissingFallback(fallback_code))?;

        Ok(Self { profiles, index, fallback })
    }

    /// Built-in factor table
    pub fn builtin() -> Self {
        let profiles = BUILTIN_COUNTRIES
            .iter()
            .map(|(code, name, flag, factors)| CountryProfile {
                code: code.to_string(),
                name: name.to_string(),
                flag: flag.to_string(),
                factors: Category::ALL.iter().copied().zip(factors.iter().copied()).collect(),
            })
            .collect();

        Self::new(profiles, GLOBAL_COUNTRY_CODE)
            .unwrap_or_else(|e| unreachable!("built-in factor table is invalid: {}", e))
    }

    /// Load factor table from JSON file
    ///
    /// Shape: `{ "fallback": "GL", "countries": [ { "code", "name", "flag", "factors": {..} } ] }`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read country factors: {:?}", path))?;

        let file: FactorTableFile = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse country factors JSON")?;

        Self::new(file.countries, &file.fallback)
            .with_context(|| format!("Invalid country factors: {:?}", path))
    }

    /// Profile for a code, falling back to the default profile for unknown codes
    pub fn resolve(&self, code: &str) -> &CountryProfile {
        self.get(code).unwrap_or(&self.profiles[self.fallback])
    }

    /// Exact lookup without fallback
    pub fn get(&self, code: &str) -> Option<&CountryProfile> {
        self.index
            .get(&normalize_code(code))
            .map(|&i| &self.profiles[i])
    }

    /// Whether the code has its own profile
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(&normalize_code(code))
    }

    /// The fallback profile
    pub fn fallback(&self) -> &CountryProfile {
        &self.profiles[self.fallback]
    }

    /// All profiles in table order
    pub fn profiles(&self) -> &[CountryProfile] {
        &self.profiles
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Trim and uppercase a country code ("us " → "US")
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

// ============================================================================
// EMBEDDED COUNTRY FACTORS
// Order: housing, transport, food, digital, shopping, misc
// ============================================================================

type CountryDef = (&'static str, &'static str, &'static str, [f64; 6]);

static BUILTIN_COUNTRIES: &[CountryDef] = &[
    ("IN", "India", "🇮🇳", [0.8, 0.6, 0.8, 0.7, 0.8, 0.8]),
    ("US", "United States", "🇺🇸", [1.1, 1.2, 1.1, 1.0, 1.1, 1.0]),
    ("GB", "United Kingdom", "🇬🇧", [0.9, 0.9, 0.9, 0.9, 0.95, 0.95]),
    ("AU", "Australia", "🇦🇺", [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
    ("DE", "Germany", "🇩🇪", [0.9, 0.9, 0.9, 0.9, 0.95, 0.95]),
    ("GL", "Global Avg", "🌍", [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
];
