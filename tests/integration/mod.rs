mod basic_integration;
mod scenarios;
