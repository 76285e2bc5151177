pub mod cv;
pub mod experience;
pub mod skill;
pub mod user;
pub mod user_skill;
