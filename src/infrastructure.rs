pub mod db;
pub mod render;
