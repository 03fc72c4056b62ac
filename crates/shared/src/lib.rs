//! Wire types shared between the analysis client and anything that speaks its protocol.

pub mod domain;
pub mod protocol;
