/*
    Chomsky normal form grammars: bounded derivation and CYK recognition
*/

pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod rules;
