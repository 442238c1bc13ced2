pub mod achievements;
pub mod answer;
pub mod challenge;
pub mod complete;
pub mod finish_scenario;
pub mod init;
pub mod pathway;
pub mod reset;
pub mod status;
pub mod validate;
