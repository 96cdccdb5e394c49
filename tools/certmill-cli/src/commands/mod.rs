pub mod check;
pub mod preview;
pub mod run;
