pub mod header;
pub mod indicators;
pub mod medal_bar;
