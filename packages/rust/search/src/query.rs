//! Query-variant generation.
//!
//! A single input field fans out into a fixed set of search strings, each
//! targeting a different mentor persona. Order is deterministic: it fixes
//! the submission order of the concurrent search branches.

/// Role/context suffixes appended to the input field, in dispatch order.
const QUERY_TEMPLATES: [&str; 4] = [
    "entrepreneur founder linkedin",
    "startup CEO linkedin profile",
    "business mentor linkedin",
    "industry expert linkedin",
];

/// Build the four query variants for `field`, optionally suffixed with a
/// location. Identical variants (possible for degenerate inputs) are issued
/// as-is; duplicates collapse later at the candidate level.
pub fn build_queries(field: &str, location: Option<&str>) -> Vec<String> {
    QUERY_TEMPLATES
        .iter()
        .map(|template| match location {
            Some(loc) => format!("{field} {template} {loc}"),
            None => format!("{field} {template}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_variants_in_fixed_order() {
        let queries = build_queries("fintech", None);
        assert_eq!(queries.len(), 4);
        assert_eq!(queries[0], "fintech entrepreneur founder linkedin");
        assert_eq!(queries[1], "fintech startup CEO linkedin profile");
        assert_eq!(queries[2], "fintech business mentor linkedin");
        assert_eq!(queries[3], "fintech industry expert linkedin");
    }

    #[test]
    fn location_suffixes_every_variant() {
        let queries = build_queries("fintech", Some("Berlin"));
        assert_eq!(queries.len(), 4);
        assert!(queries.iter().all(|q| q.ends_with(" Berlin")));
        assert_eq!(queries[0], "fintech entrepreneur founder linkedin Berlin");
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(
            build_queries("healthtech", Some("NYC")),
            build_queries("healthtech", Some("NYC"))
        );
    }
}
