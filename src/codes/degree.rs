//! Degree choice codes → academic degree individuals

use super::{lookup_in, CodeLookup};
use crate::graph::vocab::degree;
use crate::graph::Iri;

/// Degrees offered by the survey's degree choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeCode {
    BachelorOfArts,
    BachelorOfScience,
    MasterOfArts,
    MasterOfScience,
    MasterOfBusinessAdministration,
    MasterOfPublicHealth,
    DoctorOfMedicine,
    DoctorOfDentalMedicine,
    DoctorOfVeterinaryMedicine,
    DoctorOfPharmacy,
    JurisDoctor,
    DoctorOfPhilosophy,
}

const TABLE: &[(&str, DegreeCode)] = &[
    ("11", DegreeCode::BachelorOfArts),
    ("12", DegreeCode::BachelorOfScience),
    ("21", DegreeCode::MasterOfArts),
    ("22", DegreeCode::MasterOfScience),
    ("23", DegreeCode::MasterOfBusinessAdministration),
    ("24", DegreeCode::MasterOfPublicHealth),
    ("41", DegreeCode::DoctorOfMedicine),
    ("42", DegreeCode::DoctorOfDentalMedicine),
    ("43", DegreeCode::DoctorOfVeterinaryMedicine),
    ("44", DegreeCode::DoctorOfPharmacy),
    ("45", DegreeCode::JurisDoctor),
    ("49", DegreeCode::DoctorOfPhilosophy),
];

impl DegreeCode {
    pub const ALL: [DegreeCode; 12] = [
        DegreeCode::BachelorOfArts,
        DegreeCode::BachelorOfScience,
        DegreeCode::MasterOfArts,
        DegreeCode::MasterOfScience,
        DegreeCode::MasterOfBusinessAdministration,
        DegreeCode::MasterOfPublicHealth,
        DegreeCode::DoctorOfMedicine,
        DegreeCode::DoctorOfDentalMedicine,
        DegreeCode::DoctorOfVeterinaryMedicine,
        DegreeCode::DoctorOfPharmacy,
        DegreeCode::JurisDoctor,
        DegreeCode::DoctorOfPhilosophy,
    ];

    pub fn from_code(code: &str) -> CodeLookup<DegreeCode> {
        lookup_in(TABLE, code)
    }

    /// The survey code for this degree
    pub fn code(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, d)| *d == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            DegreeCode::BachelorOfArts => "BA",
            DegreeCode::BachelorOfScience => "BS",
            DegreeCode::MasterOfArts => "MA",
            DegreeCode::MasterOfScience => "MS",
            DegreeCode::MasterOfBusinessAdministration => "MBA",
            DegreeCode::MasterOfPublicHealth => "MPH",
            DegreeCode::DoctorOfMedicine => "MD",
            DegreeCode::DoctorOfDentalMedicine => "DMD",
            DegreeCode::DoctorOfVeterinaryMedicine => "DVM",
            DegreeCode::DoctorOfPharmacy => "PharmD",
            DegreeCode::JurisDoctor => "JD",
            DegreeCode::DoctorOfPhilosophy => "PhD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DegreeCode::BachelorOfArts => "Bachelor of Arts",
            DegreeCode::BachelorOfScience => "Bachelor of Science",
            DegreeCode::MasterOfArts => "Master of Arts",
            DegreeCode::MasterOfScience => "Master of Science",
            DegreeCode::MasterOfBusinessAdministration => "Master of Business Administration",
            DegreeCode::MasterOfPublicHealth => "Master of Public Health",
            DegreeCode::DoctorOfMedicine => "Doctor of Medicine",
            DegreeCode::DoctorOfDentalMedicine => "Doctor of Dental Medicine",
            DegreeCode::DoctorOfVeterinaryMedicine => "Doctor of Veterinary Medicine",
            DegreeCode::DoctorOfPharmacy => "Doctor of Pharmacy",
            DegreeCode::JurisDoctor => "Juris Doctor",
            DegreeCode::DoctorOfPhilosophy => "Doctor of Philosophy",
        }
    }

    /// Index of the degree individual in the degree ontology
    fn individual_number(self) -> u32 {
        match self {
            DegreeCode::DoctorOfPhilosophy => 4,
            DegreeCode::BachelorOfArts => 12,
            DegreeCode::BachelorOfScience => 15,
            DegreeCode::DoctorOfDentalMedicine => 27,
            DegreeCode::DoctorOfVeterinaryMedicine => 33,
            DegreeCode::JurisDoctor => 40,
            DegreeCode::MasterOfArts => 46,
            DegreeCode::MasterOfBusinessAdministration => 48,
            DegreeCode::MasterOfPublicHealth => 58,
            DegreeCode::MasterOfScience => 62,
            DegreeCode::DoctorOfMedicine => 77,
            DegreeCode::DoctorOfPharmacy => 81,
        }
    }

    /// The graph identifier of the degree individual
    pub fn iri(self) -> Iri {
        Iri::new(format!("{}academicDegree{}", degree::NS, self.individual_number()))
    }
}
