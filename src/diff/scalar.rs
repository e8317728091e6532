//! Scalar property differ
//!
//! Single-valued descriptive properties are compared against the graph's
//! current value. A blank survey answer never retracts anything, and an
//! unchanged answer produces no triples at all. Answers are trimmed of
//! surrounding whitespace before comparison, as composite fields are.

use crate::graph::{Iri, Literal, Term, Triple};

/// Triples needed to move one property from its current to its proposed value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarDiff {
    pub add: Option<Triple>,
    pub sub: Option<Triple>,
}

impl ScalarDiff {
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.sub.is_none()
    }
}

/// Compute the diff for `subject predicate` from `current` to `proposed`.
///
/// The retraction, when there is one, carries the current term exactly as
/// stored so that it matches the graph statement it removes.
pub fn diff(subject: &Iri, predicate: &str, current: Option<&Term>, proposed: &str) -> ScalarDiff {
    let proposed = proposed.trim();
    if proposed.is_empty() {
        return ScalarDiff::default();
    }
    let current = current.filter(|term| !term.is_blank());
    if current.is_some_and(|term| term.lexical() == proposed) {
        return ScalarDiff::default();
    }

    ScalarDiff {
        sub: current.map(|term| Triple::new(subject.clone(), predicate, term.clone())),
        add: Some(Triple::new(subject.clone(), predicate, Literal::plain(proposed))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::vocab::{vivo, xsd};

    fn subject() -> Iri {
        Iri::from("http://vivo.ufl.edu/individual/n25562")
    }

    #[test]
    fn blank_answer_is_a_noop_whatever_the_graph_holds() {
        for current in [None, Some(Term::plain("")), Some(Term::plain("eRA1"))] {
            assert!(diff(&subject(), vivo::ERA_COMMONS_ID, current.as_ref(), "").is_empty());
            assert!(diff(&subject(), vivo::ERA_COMMONS_ID, current.as_ref(), "   ").is_empty());
        }
    }

    #[test]
    fn new_value_with_no_current_only_adds() {
        let d = diff(&subject(), vivo::ERA_COMMONS_ID, None, "MCONLON");
        assert_eq!(d.sub, None);
        assert_eq!(
            d.add,
            Some(Triple::new(subject(), vivo::ERA_COMMONS_ID, Literal::plain("MCONLON")))
        );
    }

    #[test]
    fn blank_current_is_not_retracted() {
        let current = Term::plain("  ");
        let d = diff(&subject(), vivo::ERA_COMMONS_ID, Some(&current), "MCONLON");
        assert_eq!(d.sub, None);
        assert!(d.add.is_some());
    }

    #[test]
    fn changed_value_retracts_stored_term() {
        let current = Term::Literal(Literal::typed("OLDID", xsd::STRING));
        let d = diff(&subject(), vivo::ERA_COMMONS_ID, Some(&current), "NEWID");
        assert_eq!(
            d.sub,
            Some(Triple::new(subject(), vivo::ERA_COMMONS_ID, current.clone()))
        );
        assert_eq!(d.add.map(|t| t.object), Some(Term::plain("NEWID")));
    }

    #[test]
    fn surrounding_whitespace_is_not_a_change() {
        let current = Term::plain("MCONLON");
        assert!(diff(&subject(), vivo::ERA_COMMONS_ID, Some(&current), "MCONLON ").is_empty());
        assert!(diff(&subject(), vivo::ERA_COMMONS_ID, Some(&current), "\tMCONLON").is_empty());

        let d = diff(&subject(), vivo::ERA_COMMONS_ID, None, "  MCONLON  ");
        assert_eq!(d.add.map(|t| t.object), Some(Term::plain("MCONLON")));
    }

    #[test]
    fn unchanged_value_is_idempotent() {
        let first = diff(&subject(), vivo::RESEARCH_OVERVIEW, None, "Pulmonary research");
        let applied = first.add.map(|t| t.object);
        let second = diff(
            &subject(),
            vivo::RESEARCH_OVERVIEW,
            applied.as_ref(),
            "Pulmonary research",
        );
        assert!(second.is_empty());
    }
}
