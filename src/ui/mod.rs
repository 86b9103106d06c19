pub mod charts;
pub mod dashboard;
pub mod layout;
pub mod panels;
pub mod tables;
