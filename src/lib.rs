pub mod cli;
pub mod commands;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod dates;
pub mod problem;
pub mod problem_list;
pub mod report;
pub mod revision;
pub mod row_factories;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod time_format;
