mod env_to_report;
mod properties;
mod scenarios;
