pub mod canonical;
pub mod verifier;
