pub mod export;
pub mod list;
pub mod locate;
pub mod show;
pub mod submit;
