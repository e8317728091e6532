//! Editorial service role codes

use super::{lookup_in, CodeLookup};
use crate::graph::vocab::vivo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRoleCode {
    EditorInChief,
    AssociateEditor,
    EditorialBoardMember,
    Reviewer,
}

const TABLE: &[(&str, ServiceRoleCode)] = &[
    ("1", ServiceRoleCode::EditorInChief),
    ("2", ServiceRoleCode::AssociateEditor),
    ("3", ServiceRoleCode::EditorialBoardMember),
    ("4", ServiceRoleCode::Reviewer),
];

impl ServiceRoleCode {
    pub const ALL: [ServiceRoleCode; 4] = [
        ServiceRoleCode::EditorInChief,
        ServiceRoleCode::AssociateEditor,
        ServiceRoleCode::EditorialBoardMember,
        ServiceRoleCode::Reviewer,
    ];

    pub fn from_code(code: &str) -> CodeLookup<ServiceRoleCode> {
        lookup_in(TABLE, code)
    }

    pub fn code(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, r)| *r == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceRoleCode::EditorInChief => "Editor-in-Chief",
            ServiceRoleCode::AssociateEditor => "Associate Editor",
            ServiceRoleCode::EditorialBoardMember => "Editorial Board Member",
            ServiceRoleCode::Reviewer => "Reviewer",
        }
    }

    /// Role class asserted for the minted role entity
    pub fn role_class(self) -> &'static str {
        match self {
            ServiceRoleCode::EditorInChief | ServiceRoleCode::AssociateEditor => vivo::EDITOR_ROLE,
            ServiceRoleCode::EditorialBoardMember => vivo::MEMBER_ROLE,
            ServiceRoleCode::Reviewer => vivo::REVIEWER_ROLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_codes_to_role_classes() {
        let role = ServiceRoleCode::from_code("3").known().unwrap();
        assert_eq!(role, ServiceRoleCode::EditorialBoardMember);
        assert_eq!(role.role_class(), vivo::MEMBER_ROLE);
        assert_eq!(ServiceRoleCode::AssociateEditor.role_class(), vivo::EDITOR_ROLE);
    }

    #[test]
    fn codes_round_trip() {
        for role in ServiceRoleCode::ALL {
            assert_eq!(ServiceRoleCode::from_code(role.code()), CodeLookup::Known(role));
        }
    }

    #[test]
    fn zero_means_no_role() {
        assert_eq!(ServiceRoleCode::from_code("0"), CodeLookup::Blank);
    }
}
