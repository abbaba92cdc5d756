// src/view/resolve.rs
use std::borrow::Cow;

use super::fields::Fields;

/// First candidate key whose value is non-empty, checked in priority order.
pub fn first_non_empty<'a, F: Fields + ?Sized>(
    fields: &'a F,
    candidates: &[&str],
) -> Option<Cow<'a, str>> {
    candidates
        .iter()
        .filter_map(|key| fields.field(key))
        .find(|v| !v.is_empty())
}

/// [`first_non_empty`] with a fallback for when no candidate matches.
pub fn resolve_or<F: Fields + ?Sized>(fields: &F, candidates: &[&str], fallback: &str) -> String {
    first_non_empty(fields, candidates)
        .map(Cow::into_owned)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::records_from_text;

    #[test]
    fn picks_first_non_empty_in_priority_order() {
        let recs = records_from_text("Team,Team (Race 2),Team (Race 1)\nBase,Loan,\n");
        let keys = ["Team (Race 1)", "Team (Race 2)", "Team"];
        assert_eq!(first_non_empty(&recs[0], &keys).as_deref(), Some("Loan"));
    }

    #[test]
    fn skips_absent_keys() {
        let recs = records_from_text("Points\n12\n");
        assert_eq!(resolve_or(&recs[0], &["Final Points", "Pts", "Points"], "0"), "12");
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        let recs = records_from_text("Final Points,Other\n,x\n");
        assert_eq!(resolve_or(&recs[0], &["Final Points", "Pts"], "0"), "0");
        assert_eq!(first_non_empty(&recs[0], &["Nope"]), None);
    }
}
