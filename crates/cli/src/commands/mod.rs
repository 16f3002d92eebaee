pub mod doctor;
pub mod prompt;
pub mod serve;
