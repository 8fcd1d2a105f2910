mod dashboard;
mod health;
mod learn;
mod quiz;

pub use dashboard::*;
pub use health::*;
pub use learn::*;
pub use quiz::*;

#[cfg(test)]
mod tests;
