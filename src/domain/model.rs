use clap::ValueEnum;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Key of the concatenated group, only emitted on main-branch runs.
pub const ALL_SERVICES_KEY: &str = "all-services";

/// Language family a service is implemented in.
///
/// Declaration order is output order: groups are serialized and concatenated
/// into `all-services` in the order of [`LanguageGroup::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageGroup {
    Java,
    Python,
}

impl LanguageGroup {
    pub const ALL: [LanguageGroup; 2] = [LanguageGroup::Java, LanguageGroup::Python];

    /// Parameter key the downstream pipeline declares for this group.
    pub fn key(self) -> &'static str {
        match self {
            LanguageGroup::Java => "java-services",
            LanguageGroup::Python => "python-services",
        }
    }

    pub fn members(self) -> &'static [&'static str] {
        match self {
            LanguageGroup::Java => &["balancereader", "ledgerwriter", "transactionhistory"],
            LanguageGroup::Python => &["frontend", "contacts", "userservice"],
        }
    }

    /// Looks up the group a service belongs to, `None` for unknown names.
    pub fn of(service: &str) -> Option<LanguageGroup> {
        CLASSIFICATION.get(service).copied()
    }
}

static CLASSIFICATION: LazyLock<HashMap<&'static str, LanguageGroup>> = LazyLock::new(|| {
    LanguageGroup::ALL
        .iter()
        .flat_map(|group| group.members().iter().map(move |name| (*name, *group)))
        .collect()
});

/// Services selected for this run before partitioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceSelection {
    /// Main-branch run: every known service, filter file ignored.
    All,
    /// Changed services in the order the filter file lists them.
    Filtered(Vec<String>),
}

/// What to do with a group that ends up with no services on a filtered run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroupPolicy {
    #[default]
    Omit,
    Include,
}

/// Pipeline parameters handed to the downstream CI configuration.
///
/// Serializes as a JSON object whose keys follow group declaration order,
/// with `all-services` last when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    groups: Vec<(LanguageGroup, Vec<String>)>,
    all_services: Option<Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: LanguageGroup, services: Vec<String>) -> Self {
        self.groups.retain(|(existing, _)| *existing != group);
        self.groups.push((group, services));
        self.groups.sort_by_key(|(g, _)| {
            LanguageGroup::ALL
                .iter()
                .position(|candidate| candidate == g)
                .unwrap_or(usize::MAX)
        });
        self
    }

    pub fn with_all_services(mut self, services: Vec<String>) -> Self {
        self.all_services = Some(services);
        self
    }

    pub fn group(&self, group: LanguageGroup) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, services)| services.as_slice())
    }

    pub fn all_services(&self) -> Option<&[String]> {
        self.all_services.as_deref()
    }

    pub fn groups(&self) -> impl Iterator<Item = (LanguageGroup, &[String])> {
        self.groups.iter().map(|(g, s)| (*g, s.as_slice()))
    }

    /// Number of services across the language groups.
    pub fn service_count(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.all_services.is_none()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.groups.len() + usize::from(self.all_services.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (group, services) in &self.groups {
            map.serialize_entry(group.key(), services)?;
        }
        if let Some(all) = &self.all_services {
            map.serialize_entry(ALL_SERVICES_KEY, all)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_member_maps_back_to_its_group() {
        for group in LanguageGroup::ALL {
            for name in group.members() {
                assert_eq!(LanguageGroup::of(name), Some(group));
            }
        }
    }

    #[test]
    fn test_unknown_service_has_no_group() {
        assert_eq!(LanguageGroup::of("loadgenerator"), None);
        assert_eq!(LanguageGroup::of(""), None);
        assert_eq!(LanguageGroup::of("Frontend"), None);
    }

    #[test]
    fn test_groups_do_not_overlap() {
        let java = LanguageGroup::Java.members();
        assert!(LanguageGroup::Python
            .members()
            .iter()
            .all(|name| !java.contains(name)));
    }

    #[test]
    fn test_serialize_keeps_declaration_order() {
        let params = Parameters::new()
            .with_group(LanguageGroup::Python, vec!["frontend".to_string()])
            .with_group(LanguageGroup::Java, vec!["ledgerwriter".to_string()]);

        assert_eq!(
            params.to_json().unwrap(),
            r#"{"java-services":["ledgerwriter"],"python-services":["frontend"]}"#
        );
    }

    #[test]
    fn test_with_group_replaces_existing_entry() {
        let params = Parameters::new()
            .with_group(LanguageGroup::Java, vec!["balancereader".to_string()])
            .with_group(LanguageGroup::Java, vec!["ledgerwriter".to_string()]);

        assert_eq!(
            params.group(LanguageGroup::Java),
            Some(&["ledgerwriter".to_string()][..])
        );
        assert_eq!(params.service_count(), 1);
    }

    #[test]
    fn test_empty_parameters_serialize_to_empty_object() {
        let params = Parameters::new();
        assert!(params.is_empty());
        assert_eq!(params.to_json().unwrap(), "{}");
    }
}
