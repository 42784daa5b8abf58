pub mod board;
pub mod calibrate;
pub mod cell;
pub mod moves;
pub mod pile;
pub mod player;
pub mod priority_set;
pub mod search;
