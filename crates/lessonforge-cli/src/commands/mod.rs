pub mod generate;
pub mod init;
pub mod prompt;
pub mod quiz;
pub mod score;
pub mod slides;
