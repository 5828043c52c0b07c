pub mod characteristic;
pub mod food;
pub mod quantity;
pub mod sample;
