use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct RateCube {
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "@rate")]
    pub rate: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct TimeCube {
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "Cube", default)]
    pub cubes: Vec<RateCube>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct RootCube {
    #[serde(rename = "Cube", default)]
    pub cubes: Vec<TimeCube>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Sender {
    #[serde(rename = "name", alias = "gesmes:name")]
    pub name: String,
}

/// ECB `eurofxref` document: `Envelope > Cube > Cube[time] > Cube[currency, rate]`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename = "Envelope")]
pub struct Envelope {
    #[serde(rename = "Sender", alias = "gesmes:Sender")]
    pub sender: Sender,
    #[serde(rename = "Cube")]
    pub cube: RootCube,
}
