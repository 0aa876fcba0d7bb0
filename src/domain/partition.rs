use crate::domain::model::{EmptyGroupPolicy, LanguageGroup, Parameters, ServiceSelection};

/// Splits a service selection into language groups.
///
/// `All` yields every group in full plus `all-services`. `Filtered` keeps every
/// occurrence of a classified name, duplicates included, in input order. Unknown
/// names are dropped. The empty-group policy applies to filtered runs only.
pub fn partition(selection: &ServiceSelection, policy: EmptyGroupPolicy) -> Parameters {
    match selection {
        ServiceSelection::All => all_services(),
        ServiceSelection::Filtered(services) => filtered(services, policy),
    }
}

fn all_services() -> Parameters {
    let mut params = Parameters::new();
    let mut all = Vec::new();

    for group in LanguageGroup::ALL {
        let members: Vec<String> = group.members().iter().map(|s| s.to_string()).collect();
        all.extend(members.iter().cloned());
        params = params.with_group(group, members);
    }

    params.with_all_services(all)
}

fn filtered(services: &[String], policy: EmptyGroupPolicy) -> Parameters {
    let mut buckets: Vec<(LanguageGroup, Vec<String>)> =
        LanguageGroup::ALL.iter().map(|g| (*g, Vec::new())).collect();

    for name in services {
        let Some(group) = LanguageGroup::of(name) else {
            tracing::debug!("Dropping unclassified service '{}'", name);
            continue;
        };
        if let Some((_, bucket)) = buckets.iter_mut().find(|(g, _)| *g == group) {
            bucket.push(name.clone());
        }
    }

    buckets
        .into_iter()
        .filter(|(_, members)| policy == EmptyGroupPolicy::Include || !members.is_empty())
        .fold(Parameters::new(), |params, (group, members)| {
            params.with_group(group, members)
        })
}
