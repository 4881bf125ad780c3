pub mod education;
pub mod experience;
pub mod skill;
pub mod user;
