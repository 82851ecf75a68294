pub mod init;
pub mod play;
pub mod show;
pub mod validate;
