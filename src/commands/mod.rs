pub mod locate;
pub mod output;
pub mod suite;
pub mod verify;
