//! User-configured rename and spice rules.
//!
//! Rules are always passed in explicitly; nothing here keeps global state, so
//! concurrent imports may use different rule sets.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::ImportError;
use crate::model::Ingredient;

/// Collapses one or more synonyms into a canonical ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: Vec<String>,
    pub to: String,
}

impl RenameRule {
    pub fn new<I, S>(from: I, to: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into_iter().map(Into::into).collect(),
            to: to.into(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.from.iter().any(|from| from == name)
    }
}

/// Which bare ingredient names count as spices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpiceRules {
    #[serde(default)]
    pub spices: BTreeSet<String>,
    /// Combined phrases ("Salz und Pfeffer") expanding to several spices.
    #[serde(default)]
    pub spice_map: HashMap<String, Vec<String>>,
}

impl SpiceRules {
    /// Classifies a name as one or more spices.
    ///
    /// Alias members that are not listed in `spices` are ignored; an alias
    /// with no listed member does not classify at all.
    pub fn classify(&self, name: &str) -> Option<Vec<String>> {
        if self.spices.contains(name) {
            return Some(vec![name.to_string()]);
        }

        let members = self.spice_map.get(name)?;
        let known: Vec<String> = members
            .iter()
            .filter(|spice| self.spices.contains(spice.as_str()))
            .cloned()
            .collect();

        if known.len() < members.len() {
            debug!("Ignoring unknown spices in alias {:?}", name);
        }

        if known.is_empty() {
            None
        } else {
            Some(known)
        }
    }

    /// Aliases referencing spices outside `spices`, with the offending members.
    pub fn unknown_aliases(&self) -> Vec<(String, Vec<String>)> {
        let mut invalid: Vec<(String, Vec<String>)> = self
            .spice_map
            .iter()
            .filter_map(|(alias, members)| {
                let missing: Vec<String> = members
                    .iter()
                    .filter(|spice| !self.spices.contains(spice.as_str()))
                    .cloned()
                    .collect();
                (!missing.is_empty()).then(|| (alias.clone(), missing))
            })
            .collect();
        invalid.sort();
        invalid
    }
}

/// Ingredients split into the remaining list and the extracted spices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classified {
    pub ingredients: Vec<Ingredient>,
    pub spices: Vec<String>,
}

/// The complete rule configuration used by an import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportRules {
    #[serde(default)]
    pub rename_rules: Vec<RenameRule>,
    #[serde(default)]
    pub spice_rules: SpiceRules,
}

impl ImportRules {
    /// Returns the canonical name for `name`; the first matching rule wins.
    pub fn rename<'a>(&'a self, name: &'a str) -> &'a str {
        self.rename_rules
            .iter()
            .find(|rule| rule.matches(name))
            .map_or(name, |rule| rule.to.as_str())
    }

    /// Renames every ingredient, then moves bare-name spices out of the list.
    ///
    /// Only ingredients without amount, unit or note are considered spices;
    /// "1 Prise Salz" stays an ingredient.
    pub fn apply(&self, ingredients: Vec<Ingredient>) -> Classified {
        let mut classified = Classified::default();

        for mut ingredient in ingredients {
            let renamed = self.rename(&ingredient.name);
            if renamed != ingredient.name {
                debug!("Renaming {:?} to {:?}", ingredient.name, renamed);
                ingredient.name = renamed.to_string();
            }

            if ingredient.is_bare_name() && !ingredient.name.is_empty() {
                if let Some(spices) = self.spice_rules.classify(&ingredient.name) {
                    classified.spices.extend(spices);
                    continue;
                }
            }

            classified.ingredients.push(ingredient);
        }

        classified
    }

    /// Rejects rule sets that must not be stored.
    pub fn validate(&self) -> Result<(), ImportError> {
        for (index, rule) in self.rename_rules.iter().enumerate() {
            if rule.from.is_empty() {
                return Err(ImportError::InvalidRules(format!(
                    "rename rule {index} has no source names"
                )));
            }
            if rule.to.trim().is_empty() {
                return Err(ImportError::InvalidRules(format!(
                    "rename rule {index} has an empty target"
                )));
            }
        }

        if self.spice_rules.spices.iter().any(|s| s.trim().is_empty()) {
            return Err(ImportError::InvalidRules("blank spice name".to_string()));
        }

        let mut aliases: Vec<_> = self.spice_rules.spice_map.iter().collect();
        aliases.sort();
        for (alias, members) in aliases {
            if alias.trim().is_empty() {
                return Err(ImportError::InvalidRules("blank spice alias".to_string()));
            }
            if members.iter().any(|member| member.trim().is_empty()) {
                return Err(ImportError::InvalidRules(format!(
                    "spice alias {alias:?} has a blank member"
                )));
            }
            let mut seen = BTreeSet::new();
            if let Some(duplicate) = members.iter().find(|member| !seen.insert(member.as_str())) {
                return Err(ImportError::InvalidRules(format!(
                    "spice alias {alias:?} lists {duplicate:?} twice"
                )));
            }
        }

        let invalid = self.spice_rules.unknown_aliases();
        if !invalid.is_empty() {
            let details = invalid
                .iter()
                .map(|(alias, missing)| format!("{alias}: {}", missing.join(", ")))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ImportError::InvalidRules(format!(
                "spice_map items must exist in spices ({details})"
            )));
        }

        Ok(())
    }

    /// Reads rules from a JSON file. A missing file yields empty rules.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No rules file at {}, using empty rules", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let rules: ImportRules = serde_json::from_str(&raw)?;

        for (alias, missing) in rules.spice_rules.unknown_aliases() {
            warn!(
                "Spice alias {:?} references unknown spices: {}",
                alias,
                missing.join(", ")
            );
        }

        Ok(rules)
    }

    /// Validates and writes rules as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImportError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
