//! Moment description lookup.
//!
//! Callers send `momentos` keyed however their client names them, which
//! drifts from the registry's canonical keys. Resolution falls back through
//! progressively looser comparisons before giving up with an empty cell.

use indexmap::IndexMap;

use crate::registry::MomentSpec;

/// Which comparison produced the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Caller key equals the canonical key.
    Exact,
    /// Keys match ignoring case and spaces.
    Folded,
    /// Label (or key) contains, or is contained by, a caller key.
    Containment,
    /// Nothing matched; the cell stays blank.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMoment<'a> {
    pub text: &'a str,
    pub tier: MatchTier,
}

/// Find the caller's description for `moment`.
pub fn resolve_moment<'a>(
    moment: &MomentSpec,
    momentos: &'a IndexMap<String, String>,
) -> ResolvedMoment<'a> {
    if let Some(text) = momentos.get(&moment.key) {
        return ResolvedMoment {
            text,
            tier: MatchTier::Exact,
        };
    }

    let folded_key = fold_compact(&moment.key);
    if let Some((_, text)) = momentos.iter().find(|(k, _)| fold_compact(k) == folded_key) {
        return ResolvedMoment {
            text,
            tier: MatchTier::Folded,
        };
    }

    for needle in [moment.label.to_lowercase(), moment.key.to_lowercase()] {
        let hit = momentos.iter().find(|(k, _)| {
            let k = k.trim().to_lowercase();
            !k.is_empty() && (needle.contains(&k) || k.contains(&needle))
        });
        if let Some((_, text)) = hit {
            return ResolvedMoment {
                text,
                tier: MatchTier::Containment,
            };
        }
    }

    ResolvedMoment {
        text: "",
        tier: MatchTier::Missing,
    }
}

fn fold_compact(s: &str) -> String {
    s.to_lowercase().replace(' ', "")
}
