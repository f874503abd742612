mod basic_tests;
mod invariant_tests;
