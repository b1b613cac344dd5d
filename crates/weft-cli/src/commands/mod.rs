pub mod ast;
pub mod diagnose;
pub mod generate;
pub mod inputs;

#[cfg(test)]
mod inputs_tests;
