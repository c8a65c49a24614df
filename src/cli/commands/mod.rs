pub mod add;
pub mod delete;
pub mod export;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod reset_password;
pub mod show;
pub mod update;
