//! User profiles for drivers and riders.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Rider looking for a seat.
    Poolee,
    /// Driver offering seats.
    Owner,
    /// Campus organisation posting event rides.
    Organization,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chattiness {
    Quiet,
    Chatty,
    Depends,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Chattiness {
    pub fn as_str(self) -> &'static str {
        match self {
            Chattiness::Quiet => "Quiet",
            Chattiness::Chatty => "Chatty",
            Chattiness::Depends => "Depends",
            Chattiness::NotApplicable => "N/A",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceTier {
    Standard,
    Premium,
    Plus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub music: String,
    pub chattiness: Chattiness,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub university: String,
    pub role: Role,
    pub preferences: Preferences,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub service_tier: Option<ServiceTier>,
}
