pub mod init;
pub mod mine;
