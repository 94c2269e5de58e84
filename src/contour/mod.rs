pub mod labels;
pub mod prompt;
pub mod reader;
pub mod report;
