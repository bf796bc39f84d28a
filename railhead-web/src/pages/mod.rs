pub mod game;
pub mod home;
pub mod info;
pub mod reference;
pub mod user;
