//! Candidate catalogs for mention autocomplete.

use fitmark_core::{AutocompleteConfig, EntityReference, EntityType, Error, Result};
use serde::{Deserialize, Serialize};

/// One catalog row as supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "id")]
    pub entity_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    exercises: Vec<CatalogEntry>,
    anatomy: Vec<CatalogEntry>,
}

/// Read-only exercise and anatomy catalogs, in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub exercises: Vec<EntityReference>,
    pub anatomy: Vec<EntityReference>,
}

impl Catalogs {
    pub fn new(exercises: Vec<EntityReference>, anatomy: Vec<EntityReference>) -> Self {
        Self {
            exercises,
            anatomy,
        }
    }

    /// Parse catalogs from YAML:
    ///
    /// ```yaml
    /// exercises:
    ///   - name: Bicep Curl
    ///     id: ex_123
    /// anatomy:
    ///   - displayName: Biceps Brachii
    ///     entityId: biceps_brachii
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::parse_error(format!("Invalid catalog: {}", e)))?;

        let into_refs =
            |entries: Vec<CatalogEntry>, entity_type: EntityType| -> Vec<EntityReference> {
                entries
                    .into_iter()
                    .map(|entry| {
                        EntityReference::new(
                            entry.display_name,
                            entity_type.clone(),
                            entry.entity_id,
                        )
                    })
                    .collect()
            };

        Ok(Self {
            exercises: into_refs(file.exercises, EntityType::Exercise),
            anatomy: into_refs(file.anatomy, EntityType::Anatomy),
        })
    }

    pub fn len(&self) -> usize {
        self.exercises.len() + self.anatomy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.anatomy.is_empty()
    }

    /// Candidates whose display name contains `query`.
    ///
    /// Exercises come first, then anatomy, each in catalog order. No
    /// re-ranking beyond containment; the result is capped at
    /// `config.max_candidates`.
    ///
    /// # Example
    /// ```
    /// use fitmark_core::{AutocompleteConfig, EntityReference};
    /// use fitmark_editor::Catalogs;
    ///
    /// let catalogs = Catalogs::new(
    ///     vec![EntityReference::exercise("Bicep Curl", "ex_123")],
    ///     vec![EntityReference::anatomy("Biceps Brachii", "biceps_brachii")],
    /// );
    /// let hits = catalogs.filter("BIC", &AutocompleteConfig::default());
    /// assert_eq!(hits.len(), 2);
    /// assert_eq!(hits[0].entity_id, "ex_123");
    /// ```
    pub fn filter(&self, query: &str, config: &AutocompleteConfig) -> Vec<EntityReference> {
        let needle = if config.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };

        let hits: Vec<EntityReference> = self
            .exercises
            .iter()
            .chain(self.anatomy.iter())
            .filter(|candidate| {
                if config.case_sensitive {
                    candidate.display_name.contains(&needle)
                } else {
                    candidate.display_name.to_lowercase().contains(&needle)
                }
            })
            .take(config.max_candidates)
            .cloned()
            .collect();

        if hits.is_empty() {
            log::trace!("No candidates for query {:?}", query);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs::new(
            vec![
                EntityReference::exercise("Bicep Curl", "ex_123"),
                EntityReference::exercise("Hammer Curl", "ex_124"),
                EntityReference::exercise("Squat", "ex_200"),
            ],
            vec![
                EntityReference::anatomy("Biceps Brachii", "biceps_brachii"),
                EntityReference::anatomy("Quadriceps", "quads"),
            ],
        )
    }

    #[test]
    fn test_filter_concatenates_in_catalog_order() {
        let hits = catalogs().filter("c", &AutocompleteConfig::default());
        let ids: Vec<_> = hits.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["ex_123", "ex_124", "biceps_brachii", "quads"]);
    }

    #[test]
    fn test_filter_case_insensitive_by_default() {
        let hits = catalogs().filter("CURL", &AutocompleteConfig::default());
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_filter_case_sensitive() {
        let config = AutocompleteConfig {
            case_sensitive: true,
            ..AutocompleteConfig::default()
        };
        assert!(catalogs().filter("CURL", &config).is_empty());
        assert_eq!(catalogs().filter("Curl", &config).len(), 2);
    }

    #[test]
    fn test_empty_query_lists_everything_up_to_cap() {
        let config = AutocompleteConfig {
            max_candidates: 3,
            ..AutocompleteConfig::default()
        };
        let hits = catalogs().filter("", &config);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[2].entity_id, "ex_200");
    }

    #[test]
    fn test_default_cap_is_ten() {
        let exercises = (0..25)
            .map(|i| EntityReference::exercise(format!("Row {}", i), format!("ex_{}", i)))
            .collect();
        let catalogs = Catalogs::new(exercises, Vec::new());
        assert_eq!(catalogs.filter("row", &AutocompleteConfig::default()).len(), 10);
    }

    #[test]
    fn test_empty_catalogs_yield_nothing() {
        let catalogs = Catalogs::default();
        assert!(catalogs.is_empty());
        assert!(catalogs.filter("x", &AutocompleteConfig::default()).is_empty());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "exercises:\n  - name: Bicep Curl\n    id: ex_123\nanatomy:\n  - displayName: Biceps Brachii\n    entityId: biceps_brachii\n";
        let catalogs = Catalogs::from_yaml(yaml).unwrap();
        assert_eq!(catalogs.len(), 2);
        assert_eq!(catalogs.exercises[0], EntityReference::exercise("Bicep Curl", "ex_123"));
        assert_eq!(
            catalogs.anatomy[0],
            EntityReference::anatomy("Biceps Brachii", "biceps_brachii")
        );
    }

    #[test]
    fn test_from_yaml_missing_lists() {
        let catalogs = Catalogs::from_yaml("anatomy: []\n").unwrap();
        assert!(catalogs.is_empty());
        assert!(Catalogs::from_yaml("exercises: 5").is_err());
    }
}
