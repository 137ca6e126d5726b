pub mod about;
pub mod alienboot;
pub mod cat;
pub mod cd;
pub mod clear;
pub mod exit;
pub mod games;
pub mod help;
pub mod history;
pub mod ls;
pub mod mylinks;
pub mod neofetch;
pub mod portfolio;
pub mod pwd;
pub mod switchtheme;
pub mod theme;
pub mod whoami;
