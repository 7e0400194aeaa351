pub mod generate;
pub mod kinds;

pub mod util;
