pub mod check;
pub mod groups;
pub mod init;
pub mod menu;
pub mod roles;
pub mod templates;
