pub mod cv;
pub mod home;
pub mod system;
