pub mod board;
pub mod screens;
