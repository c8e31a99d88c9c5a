use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn codes() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.code()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

coded_enum! {
    Sex {
        Female => "F",
        Male => "M",
    }
}

coded_enum! {
    AgeBand {
        Y15To24 => "Y15-24",
        Y25To34 => "Y25-34",
        Y35To44 => "Y35-44",
        Y45To54 => "Y45-54",
        Y55To64 => "Y55-64",
    }
}

coded_enum! {
    /// Eurostat `hlth_pb` codes: difficulty seeing, hearing, walking, remembering.
    DisabilityCategory {
        Vision => "PB1040",
        Hearing => "PB1041",
        Mobility => "PB1070",
        Memory => "PB1071",
    }
}

coded_enum! {
    /// ISCED 1997 attainment groups. `NRP` means no response.
    EducationLevel {
        Basic => "ED0-2",
        Secondary => "ED3_4",
        Tertiary => "ED5_6",
        NoResponse => "NRP",
    }
}

pub const MIN_YEAR: i64 = 2011;
pub const MAX_YEAR: i64 = 2030;

/// Upper-case country code, trimmed of any padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub(crate) fn new_unchecked(code: &str) -> Self {
        Self(code.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw `/predict` body before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub sex: String,
    pub age: String,
    pub hlth_pb: String,
    pub isced97: String,
    pub geo: String,
    pub time: i64,
}

/// A fully validated request. Only [`crate::core::validator::validate_request`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub sex: Sex,
    pub age: AgeBand,
    pub category: DisabilityCategory,
    pub education: EducationLevel,
    pub country: CountryCode,
    pub year: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AccessLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl AccessLevel {
    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::VeryLow => "Very Low",
            AccessLevel::Low => "Low",
            AccessLevel::Moderate => "Moderate",
            AccessLevel::High => "High",
            AccessLevel::VeryHigh => "Very High",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AccessLevel::VeryLow => "Very limited access to education",
            AccessLevel::Low => "Limited access to education",
            AccessLevel::Moderate => "Moderate access to education",
            AccessLevel::High => "Good access to education",
            AccessLevel::VeryHigh => "Excellent access to education",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const UNIT_THOUSANDS: &str = "thousands";

/// Response body of `/predict`. `None` fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPrediction {
    pub predicted_access: f64,
    pub european_baseline: Option<f64>,
    pub african_adjustment_factor: Option<f64>,
    pub access_level: AccessLevel,
    pub access_description: String,
    pub african_recommendation: String,
    pub policy_suggestion: String,
    pub unit: String,
}
