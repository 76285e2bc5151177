pub mod entities;
pub mod tenure;
pub mod use_cases;
