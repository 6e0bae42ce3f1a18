pub mod build;
pub mod feed;
pub mod init;
pub mod preview;
pub mod validate;
