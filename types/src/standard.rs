//! Language standard revisions selectable per lint run.
//!
//! These drive tool argument construction only; the engine itself does not
//! interpret the source language.

use serde::Deserialize;

/// IEEE 1364 Verilog revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum VerilogStandard {
    #[serde(rename = "1995")]
    V1995,
    #[serde(rename = "2001")]
    V2001,
    #[default]
    #[serde(rename = "2005")]
    V2005,
}

/// IEEE 1800 SystemVerilog revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SystemVerilogStandard {
    #[serde(rename = "2005")]
    SV2005,
    #[serde(rename = "2009")]
    SV2009,
    #[serde(rename = "2012")]
    SV2012,
    #[default]
    #[serde(rename = "2017")]
    SV2017,
}

impl std::fmt::Display for VerilogStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let year = match self {
            Self::V1995 => "1995",
            Self::V2001 => "2001",
            Self::V2005 => "2005",
        };
        write!(f, "{year}")
    }
}

impl std::fmt::Display for SystemVerilogStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let year = match self {
            Self::SV2005 => "2005",
            Self::SV2009 => "2009",
            Self::SV2012 => "2012",
            Self::SV2017 => "2017",
        };
        write!(f, "{year}")
    }
}
